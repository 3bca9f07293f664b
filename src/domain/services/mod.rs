//! Domain Services
//!
//! Pure text transformations over fragments and the schedule file.
//! Nothing here touches the file system.

pub mod block_mutator;
mod cron_syntax;
mod schedule;
pub mod templates;

pub use block_mutator::{
    contains_line, directive_arguments, find_block, insert_line, remove_line, BlockError,
    BlockSpan, Edit,
};
pub use cron_syntax::check_cron_table;
pub use schedule::{append_directive, scheduled_lines, strip_directive};
