//! OS package management

mod apt;

pub use apt::AptInstaller;
