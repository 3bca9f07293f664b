//! DatabaseClient port - the database engine's command-line client

use crate::error::PanelResult;

pub trait DatabaseClient {
    /// Run statements, discarding output
    fn execute(&self, sql: &str) -> PanelResult<()>;

    /// Run a query; rows come back one per line without headers
    fn query(&self, sql: &str) -> PanelResult<String>;
}
