use webpanel::application::PhpManager;
use webpanel::error::PanelResult;
use webpanel::infrastructure::AptInstaller;
use webpanel::presentation::cli::PhpCommand;
use webpanel::presentation::{Listing, Report};

use super::Context;

pub fn run(ctx: &Context, cmd: &PhpCommand) -> PanelResult<Report> {
    let installer = AptInstaller::new();
    let library = ctx.modules();
    let php = PhpManager::new(&installer, &library, ctx.coordinator());

    match cmd {
        PhpCommand::List => Ok(Listing::strings("available PHP versions", php.available()?).into()),
        PhpCommand::Installed => {
            Ok(Listing::strings("installed PHP versions", php.installed()?).into())
        }
        PhpCommand::Install { version } => php.install(version).map(Into::into),
        PhpCommand::Uninstall { version } => {
            let confirmed = ctx.confirm(
                &format!("Uninstall PHP {} and all its packages?", version),
                &format!("php uninstall {}", version),
            )?;
            php.uninstall(version, confirmed).map(Into::into)
        }
        PhpCommand::Modules { version } => Ok(Listing::strings(
            "available extensions",
            php.extensions(version)?,
        )
        .into()),
        PhpCommand::InstallModule { version, module } => {
            php.install_extension(version, module).map(Into::into)
        }
    }
}
