//! webpanel CLI - Caddy host administration
//!
//! Usage: webpanel [--json] [--yes] [--dry-run] [--config PATH] <COMMAND>
//!
//! Commands:
//!   site     Static sites served from the sites root
//!   proxy    Reverse-proxy routes
//!   module   Snippets imported into site blocks
//!   backup   Scheduled site and database backups
//!   db       Databases and their users
//!   php      PHP-FPM runtimes
//!   setup    Create the managed layout
//!   service  Web server status, validation and reload

mod commands;

use std::io;

use anyhow::Result;
use clap::Parser;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use webpanel::application::Outcome;
use webpanel::config::Config;
use webpanel::presentation::cli::Cli;
use webpanel::presentation::{create_renderer, OutputFormat, Report};

use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let report = match Config::resolve(cli.config.as_deref()) {
        Ok((config, warnings)) => {
            for warning in &warnings {
                eprintln!("warning: {}", warning);
            }
            let ctx = Context::new(config, &cli);
            commands::dispatch(&ctx, &cli.command).unwrap_or_else(|e| Outcome::from(e).into())
        }
        Err(e) => Report::from(Outcome::from(e)),
    };

    let unicode = io::stdout().is_terminal();
    let renderer = create_renderer(OutputFormat::from_flag(cli.json), unicode);
    renderer.render(&report, &mut io::stdout(), &mut io::stderr())?;

    std::process::exit(report.exit_code());
}

/// `WEBPANEL_LOG` wins; otherwise each `-v` raises the level one step
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("WEBPANEL_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
