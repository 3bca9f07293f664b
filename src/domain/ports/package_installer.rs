//! PackageInstaller port - the OS package manager

use crate::error::PanelResult;

pub trait PackageInstaller {
    fn install(&self, packages: &[String]) -> PanelResult<()>;

    /// Remove packages; entries may be globs understood by the manager
    fn remove(&self, packages: &[String]) -> PanelResult<()>;

    /// Package names in the index starting with `prefix`, one per line
    fn list_available(&self, prefix: &str) -> PanelResult<String>;

    /// Installed package names matching the glob `pattern`, one per line
    fn list_installed(&self, pattern: &str) -> PanelResult<String>;
}
