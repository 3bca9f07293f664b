use webpanel::application::{DatabaseManager, Outcome};
use webpanel::domain::value_objects::DbIdentifier;
use webpanel::error::PanelResult;
use webpanel::infrastructure::MysqlClient;
use webpanel::presentation::cli::DatabaseCommand;
use webpanel::presentation::Report;

use super::Context;

pub fn run(ctx: &Context, cmd: &DatabaseCommand) -> PanelResult<Report> {
    let db = &ctx.config.database;
    let client = MysqlClient::new(&db.client, &db.admin_user, ctx.config.database_timeout());
    let databases = DatabaseManager::new(&client);

    match cmd {
        DatabaseCommand::Create {
            name,
            user,
            password,
        } => {
            if ctx.dry_run {
                let name = DbIdentifier::new(name.as_str())?;
                let user = DbIdentifier::new(user.as_str())?;
                return Ok(Outcome::success(format!(
                    "dry run: would create database {} owned by {}",
                    name, user
                ))
                .into());
            }
            databases.create(name, user, password).map(Into::into)
        }
        DatabaseCommand::Delete { name } => {
            let name = DbIdentifier::new(name.as_str())?;
            if ctx.dry_run {
                let owners = databases.owners(&name)?;
                let users: Vec<String> = owners.into_iter().map(|o| o.user).collect();
                let outcome =
                    Outcome::success(format!("dry run: would drop database {}", name));
                return Ok(if users.is_empty() {
                    outcome
                } else {
                    outcome.with_detail(format!("and users: {}", users.join(", ")))
                }
                .into());
            }
            let confirmed = ctx.confirm_by_name(
                &format!("Type '{}' to drop the database and its users", name),
                &format!("database delete {}", name),
                name.as_str(),
            )?;
            databases.delete(name.as_str(), confirmed).map(Into::into)
        }
    }
}
