//! File system primitives: atomic replacement and advisory locks

mod atomic;
mod lock;

pub use atomic::{atomic_write, atomic_write_from};
pub use lock::{lock_path, FileLock};
