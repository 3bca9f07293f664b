//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose, --yes, --dry-run, --config) are inherited by all subcommands
//! - Destructive subcommands ask for confirmation on a terminal; `--yes` skips the prompt

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// webpanel - manage Caddy sites, proxies, modules, backups and databases on one host
#[derive(Parser, Debug)]
#[command(name = "webpanel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Machine-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Answer yes to confirmation prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Show what would change without writing anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Config file (default: $WEBPANEL_CONFIG, then /etc/webpanel/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Static sites served from the sites root
    #[command(subcommand)]
    Site(SiteCommand),

    /// Reverse-proxy routes
    #[command(subcommand)]
    Proxy(ProxyCommand),

    /// Snippets imported into site blocks
    #[command(subcommand)]
    Module(ModuleCommand),

    /// Scheduled site and database backups
    #[command(subcommand)]
    Backup(BackupCommand),

    /// Databases and their users
    #[command(subcommand, alias = "db")]
    Database(DatabaseCommand),

    /// PHP-FPM runtimes
    #[command(subcommand)]
    Php(PhpCommand),

    /// Create the managed directories, default snippets and Caddyfile
    #[command(alias = "install")]
    Setup,

    /// Web server status, validation and reload
    #[command(subcommand)]
    Service(ServiceCommand),
}

#[derive(Subcommand, Debug)]
pub enum SiteCommand {
    /// Create a site and its document root
    Add { domain: String },
    /// Remove a site's configuration (its files are kept)
    Remove { domain: String },
    /// List configured sites
    List,
}

#[derive(Subcommand, Debug)]
pub enum ProxyCommand {
    /// Route a domain to an upstream (host:port or URL)
    Add { domain: String, target: String },
    /// Remove a proxy route
    Remove { domain: String },
    /// List proxy routes
    List,
}

#[derive(Subcommand, Debug)]
pub enum ModuleCommand {
    /// Import a module into a site
    Enable { module: String, domain: String },
    /// Remove a module import from a site
    Disable { module: String, domain: String },
    /// Modules imported by a site
    List { domain: String },
    /// Modules installed in the module directory
    ListAvailable,
}

#[derive(Subcommand, Debug)]
pub enum BackupCommand {
    /// Schedule a site backup
    Enable {
        /// daily or weekly
        kind: String,
        domain: String,
    },
    /// Stop a site backup
    Disable {
        /// daily or weekly
        kind: String,
        domain: String,
    },
    /// Nightly database dumps
    #[command(subcommand)]
    Db(BackupDbCommand),
    /// Scheduled backup entries
    List,
}

#[derive(Subcommand, Debug)]
pub enum BackupDbCommand {
    /// Schedule a nightly dump of a database
    Add { name: String },
    /// Stop dumping a database
    Remove { name: String },
}

#[derive(Subcommand, Debug)]
pub enum DatabaseCommand {
    /// Create a database with a user holding all privileges on it
    Create {
        name: String,
        user: String,
        password: String,
    },
    /// Drop a database and its users
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
pub enum PhpCommand {
    /// Versions available from the package index
    List,
    /// Installed versions
    Installed,
    /// Install a version and its Caddy snippet
    Install { version: String },
    /// Remove a version and its Caddy snippet
    Uninstall { version: String },
    /// Optional extensions for a version
    Modules { version: String },
    /// Install one extension for an installed version
    InstallModule { version: String, module: String },
}

#[derive(Subcommand, Debug)]
pub enum ServiceCommand {
    /// Service status
    Status,
    /// Check the configuration without reloading
    Validate,
    /// Validate, then reload
    Reload,
}
