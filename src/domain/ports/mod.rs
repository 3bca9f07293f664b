//! Domain Ports
//!
//! Traits the application layer depends on. Infrastructure implements them
//! against disk and subprocesses; tests implement them in memory.

mod config_document;
mod database_client;
mod package_installer;
mod service_control;

pub use config_document::ConfigDocument;
pub use database_client::DatabaseClient;
pub use package_installer::PackageInstaller;
pub use service_control::{ServiceControl, ValidationResult};
