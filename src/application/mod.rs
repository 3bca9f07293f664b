//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain text-editing rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Coordinator
//!
//! - `Coordinator` - lock, snapshot, mutate, validate, then reload or roll back
//!
//! ## Entity managers
//!
//! - `SiteManager`, `ProxyManager` - fragments in the sites directory
//! - `ModuleManager` - `import` lines inside a site's block
//! - `BackupManager` - directives in the shared cron table
//! - `DatabaseManager` - databases and accounts in the database engine
//! - `PhpManager` - FPM runtimes and their snippets
//! - `SetupManager` - first-time host layout
//! - `ServiceManager` - status, validate and reload pass-through

pub mod backups;
pub mod coordinator;
pub mod databases;
pub mod modules;
pub mod outcome;
pub mod php;
pub mod proxies;
pub mod service;
pub mod setup;
pub mod sites;
#[cfg(test)]
pub(crate) mod testing;

pub use backups::BackupManager;
pub use coordinator::{Applied, Coordinator, Mutation, Phase};
pub use databases::{DatabaseManager, DatabaseOwner};
pub use modules::ModuleManager;
pub use outcome::Outcome;
pub use php::PhpManager;
pub use proxies::{ProxyManager, ProxyRoute};
pub use service::ServiceManager;
pub use setup::SetupManager;
pub use sites::SiteManager;
