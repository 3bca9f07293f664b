//! Dependent service control and subprocess plumbing

mod cron;
pub mod process;
mod web_server;

pub use cron::CronTable;
pub use web_server::{CommandSpec, WebServer};
