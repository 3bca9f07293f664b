use webpanel::application::ProxyManager;
use webpanel::error::PanelResult;
use webpanel::presentation::cli::ProxyCommand;
use webpanel::presentation::{Listing, Report};

use super::Context;

pub fn run(ctx: &Context, cmd: &ProxyCommand) -> PanelResult<Report> {
    let fragments = ctx.fragments();
    let proxies = ProxyManager::new(&fragments, ctx.coordinator());
    match cmd {
        ProxyCommand::Add { domain, target } => proxies.add(domain, target).map(Into::into),
        ProxyCommand::Remove { domain } => {
            let confirmed = ctx.confirm(
                &format!("Remove proxy route for {}?", domain),
                &format!("proxy remove {}", domain),
            )?;
            proxies.remove(domain, confirmed).map(Into::into)
        }
        ProxyCommand::List => {
            let routes = proxies.list()?;
            Ok(Listing::of("proxies", &routes, |route| match &route.target {
                Some(target) => format!("{} -> {}", route.domain, target),
                None => format!("{} (no upstream)", route.domain),
            })
            .into())
        }
    }
}
