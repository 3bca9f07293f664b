use webpanel::application::ModuleManager;
use webpanel::error::PanelResult;
use webpanel::presentation::cli::ModuleCommand;
use webpanel::presentation::{Listing, Report};

use super::Context;

pub fn run(ctx: &Context, cmd: &ModuleCommand) -> PanelResult<Report> {
    let fragments = ctx.fragments();
    let library = ctx.modules();
    let modules = ModuleManager::new(&fragments, &library, ctx.coordinator());
    match cmd {
        ModuleCommand::Enable { module, domain } => modules.enable(module, domain).map(Into::into),
        ModuleCommand::Disable { module, domain } => {
            modules.disable(module, domain).map(Into::into)
        }
        ModuleCommand::List { domain } => {
            Ok(Listing::strings("enabled modules", modules.list(domain)?).into())
        }
        ModuleCommand::ListAvailable => {
            Ok(Listing::strings("available modules", modules.available()?).into())
        }
    }
}
