//! Stores for managed configuration files

mod directive_registry;
mod fragment_store;
mod module_library;

pub use directive_registry::DirectiveRegistry;
pub use fragment_store::{
    read_optional as read_optional_file, remove_if_present, Fragment, FragmentStore,
};
pub use module_library::{ManagedFile, ModuleLibrary};
