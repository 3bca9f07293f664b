//! Domain Layer
//!
//! The configuration model of webpanel without I/O.
//!
//! ## Structure
//!
//! - `value_objects/` - validated names (domain, database identifier, version)
//! - `entities/` - fragment keys and scheduled directives
//! - `services/` - block mutation, schedule edits, cron checks, templates
//! - `ports/` - interfaces implemented by infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
