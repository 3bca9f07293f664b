use webpanel::application::SiteManager;
use webpanel::error::PanelResult;
use webpanel::presentation::cli::SiteCommand;
use webpanel::presentation::{Listing, Report};

use super::Context;

pub fn run(ctx: &Context, cmd: &SiteCommand) -> PanelResult<Report> {
    let fragments = ctx.fragments();
    let sites = SiteManager::new(&fragments, &ctx.config.paths.sites_root, ctx.coordinator());
    match cmd {
        SiteCommand::Add { domain } => sites.add(domain).map(Into::into),
        SiteCommand::Remove { domain } => {
            let confirmed = ctx.confirm(
                &format!("Remove site {}? Its files are kept.", domain),
                &format!("site remove {}", domain),
            )?;
            sites.remove(domain, confirmed).map(Into::into)
        }
        SiteCommand::List => {
            let domains = sites.list()?;
            Ok(Listing::of("sites", &domains, ToString::to_string).into())
        }
    }
}
