//! webpanel - host administration for a Caddy web server
//!
//! webpanel keeps one configuration fragment per site or proxy route, binds
//! reusable snippets into site blocks, schedules backups in a cron table and
//! manages databases and PHP runtimes. Every change that feeds the web server
//! is validated before reload and rolled back when the validator rejects it.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::Outcome;
pub use config::Config;
pub use error::{PanelError, PanelResult, ResultKind};
