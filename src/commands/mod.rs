//! Command handlers for the webpanel binary
//!
//! Each handler builds its manager from the resolved [`Config`] and returns a
//! [`Report`]; `main` renders it and exits with its code.

mod backup;
mod database;
mod module;
mod php;
mod proxy;
mod service;
mod site;

use dialoguer::{Confirm, Input};
use is_terminal::IsTerminal;

use webpanel::application::{Coordinator, Outcome, SetupManager};
use webpanel::config::Config;
use webpanel::error::{PanelError, PanelResult};
use webpanel::infrastructure::{FragmentStore, ModuleLibrary, WebServer};
use webpanel::presentation::cli::{Cli, Commands};
use webpanel::presentation::Report;

/// Resolved configuration plus the global flags every handler needs
pub struct Context {
    pub config: Config,
    pub dry_run: bool,
    pub yes: bool,
    web_server: WebServer,
}

impl Context {
    pub fn new(config: Config, cli: &Cli) -> Self {
        let web_server = config.web_server();
        Self {
            config,
            dry_run: cli.dry_run,
            yes: cli.yes,
            web_server,
        }
    }

    pub fn fragments(&self) -> FragmentStore {
        FragmentStore::new(&self.config.paths.sites_config_dir)
    }

    pub fn modules(&self) -> ModuleLibrary {
        ModuleLibrary::new(&self.config.paths.module_dir)
    }

    pub fn web_server(&self) -> &WebServer {
        &self.web_server
    }

    /// Coordinator for changes that feed the web server configuration
    pub fn coordinator(&self) -> Coordinator<'_> {
        Coordinator::new(&self.web_server, &self.config.paths.lock_dir).dry_run(self.dry_run)
    }

    /// Ask before a destructive change.
    ///
    /// `--yes` and dry runs skip the prompt; without a terminal the change is
    /// refused instead of silently applied.
    pub fn confirm(&self, prompt: &str, action: &str) -> PanelResult<bool> {
        if self.yes || self.dry_run {
            return Ok(true);
        }
        if !std::io::stdin().is_terminal() {
            return Err(PanelError::ConfirmationRequired {
                action: action.to_string(),
            });
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(prompt_error)
    }

    /// Ask the operator to type `expected` back before an irreversible change
    pub fn confirm_by_name(&self, prompt: &str, action: &str, expected: &str) -> PanelResult<bool> {
        if self.yes || self.dry_run {
            return Ok(true);
        }
        if !std::io::stdin().is_terminal() {
            return Err(PanelError::ConfirmationRequired {
                action: action.to_string(),
            });
        }
        let typed: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        Ok(typed.trim() == expected)
    }
}

fn prompt_error(err: dialoguer::Error) -> PanelError {
    PanelError::io("read answer from", "/dev/tty", err.into())
}

/// Run one parsed command
pub fn dispatch(ctx: &Context, command: &Commands) -> PanelResult<Report> {
    match command {
        Commands::Site(cmd) => site::run(ctx, cmd),
        Commands::Proxy(cmd) => proxy::run(ctx, cmd),
        Commands::Module(cmd) => module::run(ctx, cmd),
        Commands::Backup(cmd) => backup::run(ctx, cmd),
        Commands::Database(cmd) => database::run(ctx, cmd),
        Commands::Php(cmd) => php::run(ctx, cmd),
        Commands::Service(cmd) => service::run(ctx, cmd),
        Commands::Setup => cmd_setup(ctx),
    }
}

fn cmd_setup(ctx: &Context) -> PanelResult<Report> {
    let outcome: Outcome = SetupManager::new(&ctx.config).dry_run(ctx.dry_run).run()?;
    Ok(outcome.into())
}
