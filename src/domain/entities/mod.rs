//! Domain Entities
//!
//! - `FragmentKey` - names one site or proxy fragment file
//! - `Directive` - one scheduled line in the shared cron table

mod directive;
mod fragment;

pub use directive::{BackupLayout, Directive, DirectiveKind, DirectivePattern};
pub use fragment::{FragmentKey, FRAGMENT_EXTENSION, PROXY_PREFIX};
