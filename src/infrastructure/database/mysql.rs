//! MariaDB/MySQL through the command-line client
//!
//! Runs as the configured administrative user; on a stock install this is
//! root over the unix socket, so no password is passed.

use std::time::Duration;

use crate::domain::ports::DatabaseClient;
use crate::error::{PanelError, PanelResult};
use crate::infrastructure::service::process::run_with_timeout;

#[derive(Debug, Clone)]
pub struct MysqlClient {
    client: String,
    admin_user: String,
    timeout: Duration,
}

impl MysqlClient {
    pub fn new(client: impl Into<String>, admin_user: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: client.into(),
            admin_user: admin_user.into(),
            timeout,
        }
    }

    fn argv(&self, batch: bool, sql: &str) -> Vec<String> {
        let mut argv = vec![self.client.clone(), "-u".to_string(), self.admin_user.clone()];
        if batch {
            argv.push("-N".to_string());
            argv.push("-B".to_string());
        }
        argv.push("-e".to_string());
        argv.push(sql.to_string());
        argv
    }

    fn run(&self, batch: bool, sql: &str) -> PanelResult<String> {
        let out = run_with_timeout(&self.argv(batch, sql), self.timeout).map_err(|e| {
            PanelError::ExternalTool {
                tool: self.client.clone(),
                output: e.to_string(),
            }
        })?;
        if out.timed_out {
            return Err(PanelError::ExternalTool {
                tool: self.client.clone(),
                output: format!("no answer within {}s", self.timeout.as_secs()),
            });
        }
        if !out.success() {
            return Err(PanelError::ExternalTool {
                tool: self.client.clone(),
                output: out.combined(),
            });
        }
        Ok(out.stdout)
    }
}

impl DatabaseClient for MysqlClient {
    fn execute(&self, sql: &str) -> PanelResult<()> {
        tracing::debug!(sql, "executing statement");
        self.run(false, sql).map(|_| ())
    }

    fn query(&self, sql: &str) -> PanelResult<String> {
        self.run(true, sql)
    }
}
