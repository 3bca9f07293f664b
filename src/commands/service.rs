use webpanel::application::ServiceManager;
use webpanel::error::PanelResult;
use webpanel::presentation::cli::ServiceCommand;
use webpanel::presentation::Report;

use super::Context;

pub fn run(ctx: &Context, cmd: &ServiceCommand) -> PanelResult<Report> {
    let service = ServiceManager::new(ctx.web_server());
    match cmd {
        ServiceCommand::Status => service.status(),
        ServiceCommand::Validate => service.validate(),
        ServiceCommand::Reload => service.reload(),
    }
    .map(Into::into)
}
