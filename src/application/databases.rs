//! Database manager: databases and their owning accounts, straight against
//! the database engine; nothing is stored on disk

use serde::Serialize;

use crate::domain::ports::DatabaseClient;
use crate::domain::value_objects::DbIdentifier;
use crate::error::PanelResult;

use super::outcome::Outcome;

/// Accounts are created for local socket/TCP access only
const HOST: &str = "localhost";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseOwner {
    pub user: String,
}

pub struct DatabaseManager<'a> {
    client: &'a dyn DatabaseClient,
}

impl<'a> DatabaseManager<'a> {
    pub fn new(client: &'a dyn DatabaseClient) -> Self {
        Self { client }
    }

    /// Create the database, then its user with full rights on it.
    ///
    /// A failure after the database exists is a partial success: the
    /// database is left in place for the operator to finish by hand.
    pub fn create(&self, database: &str, user: &str, password: &str) -> PanelResult<Outcome> {
        let database = DbIdentifier::new(database)?;
        let user = DbIdentifier::new(user)?;

        self.client.execute(&format!(
            "CREATE DATABASE IF NOT EXISTS `{}`;",
            database
        ))?;

        let grant = format!(
            "CREATE USER IF NOT EXISTS '{user}'@'{HOST}' IDENTIFIED BY '{pw}'; \
             GRANT ALL PRIVILEGES ON `{database}`.* TO '{user}'@'{HOST}'; \
             FLUSH PRIVILEGES;",
            pw = sql_string(password),
        );
        if let Err(e) = self.client.execute(&grant) {
            tracing::warn!(%database, %user, error = %e, "database created without its user");
            return Ok(Outcome::partial(format!(
                "database {} created, but user {} could not be set up",
                database, user
            ))
            .with_detail(e.to_string()));
        }

        Ok(Outcome::success(format!(
            "database {} created with user {}",
            database, user
        )))
    }

    /// Drop the database and every local account granted on it.
    ///
    /// Account drop failures are collected as details, not raised.
    pub fn delete(&self, database: &str, confirmed: bool) -> PanelResult<Outcome> {
        let database = DbIdentifier::new(database)?;
        if !confirmed {
            return Ok(Outcome::cancelled(format!("database {} kept", database)));
        }

        let owners = self.owners(&database)?;
        self.client
            .execute(&format!("DROP DATABASE IF EXISTS `{}`;", database))?;

        let mut warnings = Vec::new();
        let mut dropped = Vec::new();
        for owner in &owners {
            match self.client.execute(&format!(
                "DROP USER IF EXISTS '{}'@'{}';",
                sql_string(&owner.user),
                HOST
            )) {
                Ok(()) => dropped.push(owner.user.clone()),
                Err(e) => warnings.push(format!("user {} not dropped: {}", owner.user, e)),
            }
        }

        let message = format!("database {} deleted", database);
        let outcome = if warnings.is_empty() {
            Outcome::success(message)
        } else {
            Outcome::partial(message).with_details(warnings)
        };
        Ok(if dropped.is_empty() {
            outcome
        } else {
            outcome.with_detail(format!("users dropped: {}", dropped.join(", ")))
        })
    }

    /// Local accounts holding grants on the database
    pub fn owners(&self, database: &DbIdentifier) -> PanelResult<Vec<DatabaseOwner>> {
        let raw = self.client.query(&format!(
            "SELECT user FROM mysql.db WHERE db='{}' AND host='{}';",
            database, HOST
        ))?;
        Ok(raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|user| DatabaseOwner {
                user: user.to_string(),
            })
            .collect())
    }
}

/// Escape text for a single-quoted SQL literal
fn sql_string(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('\'', "\\'")
}
