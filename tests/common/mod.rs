//! Common test utilities for webpanel CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: an isolated host layout under a temp directory, with a
//!   config file pointing every managed path into it
//! - Fixtures: fragment text used across tests

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
