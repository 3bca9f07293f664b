use webpanel::application::{BackupManager, Coordinator};
use webpanel::error::PanelResult;
use webpanel::infrastructure::DirectiveRegistry;
use webpanel::presentation::cli::{BackupCommand, BackupDbCommand};
use webpanel::presentation::{Listing, Report};

use super::Context;

pub fn run(ctx: &Context, cmd: &BackupCommand) -> PanelResult<Report> {
    let paths = &ctx.config.paths;
    let registry = DirectiveRegistry::new(
        &paths.cron_file,
        ctx.config.backup_layout(),
        &paths.lock_dir,
    );
    let cron = ctx.config.cron_table();
    let coordinator = Coordinator::new(&cron, &paths.lock_dir).dry_run(ctx.dry_run);
    let backups = BackupManager::new(&registry, coordinator);

    match cmd {
        BackupCommand::Enable { kind, domain } => backups.enable(kind, domain).map(Into::into),
        BackupCommand::Disable { kind, domain } => backups.disable(kind, domain).map(Into::into),
        BackupCommand::Db(BackupDbCommand::Add { name }) => {
            backups.add_database(name).map(Into::into)
        }
        BackupCommand::Db(BackupDbCommand::Remove { name }) => {
            backups.remove_database(name).map(Into::into)
        }
        BackupCommand::List => Ok(Listing::strings("scheduled backups", backups.list()?).into()),
    }
}
