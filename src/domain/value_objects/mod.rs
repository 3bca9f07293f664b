//! Domain Value Objects
//!
//! Validated names that every operation takes as input.

mod names;
mod validate;

pub use names::{DbIdentifier, DomainName, ModuleName, ProxyTarget, VersionTag};
pub use validate::{
    validate_db_identifier, validate_domain, validate_module_name, validate_proxy_target,
    validate_version_tag,
};
