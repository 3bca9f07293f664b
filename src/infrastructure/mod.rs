//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - atomic replacement and per-file locks
//! - `repositories/` - fragment store and directive registry
//! - `service/` - web server and cron control, subprocess plumbing
//! - `database/` - database client
//! - `packages/` - OS package installer

pub mod database;
pub mod fs;
pub mod packages;
pub mod repositories;
pub mod service;

pub use database::MysqlClient;
pub use packages::AptInstaller;
pub use repositories::{
    DirectiveRegistry, Fragment, FragmentStore, ManagedFile, ModuleLibrary,
};
pub use service::{CommandSpec, CronTable, WebServer};
