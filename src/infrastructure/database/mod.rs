//! Database server access

mod mysql;

pub use mysql::MysqlClient;
