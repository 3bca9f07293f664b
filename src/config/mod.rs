//! Configuration module for webpanel
//!
//! Resolution order:
//! 1. `--config <path>`
//! 2. `WEBPANEL_CONFIG`
//! 3. `/etc/webpanel/config.toml` (when present)
//! 4. Built-in defaults
//!
//! `WEBPANEL_*` overrides for paths and timeouts apply on top of whichever
//! source was chosen.

mod loader;
mod types;

pub use loader::{ConfigWarning, SYSTEM_CONFIG};
pub use types::{Config, DatabaseConfig, PathsConfig, ServiceConfig};
