//! PHP manager: FPM runtimes from the package manager plus the Caddy
//! snippet that routes a site to a runtime's socket

use crate::domain::ports::PackageInstaller;
use crate::domain::services::templates;
use crate::domain::value_objects::{ModuleName, VersionTag};
use crate::error::{PanelError, PanelResult};
use crate::infrastructure::ModuleLibrary;

use super::coordinator::{Coordinator, Mutation};
use super::outcome::Outcome;

/// Packages installed with every runtime, as suffixes of `php<version>-`
const BASE_PACKAGES: &[&str] = &[
    "fpm", "common", "cli", "mysql", "curl", "gd", "mbstring", "xml", "zip",
];

/// Extensions that are part of the runtime itself, not installable extras
const CORE_EXTENSIONS: &[&str] = &["fpm", "common", "cli"];

pub struct PhpManager<'a> {
    installer: &'a dyn PackageInstaller,
    library: &'a ModuleLibrary,
    coordinator: Coordinator<'a>,
}

impl<'a> PhpManager<'a> {
    pub fn new(
        installer: &'a dyn PackageInstaller,
        library: &'a ModuleLibrary,
        coordinator: Coordinator<'a>,
    ) -> Self {
        Self {
            installer,
            library,
            coordinator,
        }
    }

    /// Versions with an FPM package in the package index
    pub fn available(&self) -> PanelResult<Vec<String>> {
        Ok(fpm_versions(&self.installer.list_available("php")?))
    }

    pub fn installed(&self) -> PanelResult<Vec<String>> {
        Ok(fpm_versions(&self.installer.list_installed("php*-fpm")?))
    }

    fn is_installed(&self, version: &VersionTag) -> PanelResult<bool> {
        Ok(self.installed()?.iter().any(|v| v == version.as_str()))
    }

    /// Install the runtime's packages, then publish its snippet
    pub fn install(&self, version: &str) -> PanelResult<Outcome> {
        let version = VersionTag::new(version)?;
        let module = ModuleName::new(templates::php_module_name(&version))?;

        if self.coordinator.is_dry_run() {
            return Ok(Outcome::success(format!(
                "dry run: would install {}",
                package_names(&version).join(" ")
            )));
        }

        if self.is_installed(&version)? {
            tracing::info!(%version, "runtime already installed, refreshing snippet");
        } else {
            self.installer.install(&package_names(&version))?;
        }

        let snippet = templates::php_module(&version);
        let applied = self
            .coordinator
            .run(&self.library.document(&module), |current| {
                Ok(Mutation::write_if_changed(current, snippet))
            })?;
        Ok(applied
            .into_outcome(
                format!("PHP {} installed", version),
                format!("PHP {} already installed", version),
            )
            .with_detail(format!("enable with: webpanel module enable {} <domain>", module)))
    }

    /// Withdraw the snippet, then remove the runtime's packages.
    ///
    /// A site still importing the snippet fails validation, which stops the
    /// uninstall before any package is touched.
    pub fn uninstall(&self, version: &str, confirmed: bool) -> PanelResult<Outcome> {
        let version = VersionTag::new(version)?;
        let module = ModuleName::new(templates::php_module_name(&version))?;
        if !self.is_installed(&version)? {
            return Err(PanelError::NotFound {
                entity: "PHP version",
                name: version.to_string(),
            });
        }
        if !confirmed {
            return Ok(Outcome::cancelled(format!("PHP {} kept", version)));
        }

        let applied = self
            .coordinator
            .run(&self.library.document(&module), |current| {
                Ok(match current {
                    Some(_) => Mutation::Delete,
                    None => Mutation::Unchanged,
                })
            })?;
        if self.coordinator.is_dry_run() {
            return Ok(applied.into_outcome(
                format!("PHP {} uninstalled", version),
                format!("PHP {} has no snippet", version),
            ));
        }

        self.installer.remove(&[format!("php{}*", version)])?;
        Ok(applied.into_outcome(
            format!("PHP {} uninstalled", version),
            format!("PHP {} uninstalled", version),
        ))
    }

    /// Optional extensions available for an installed runtime
    pub fn extensions(&self, version: &str) -> PanelResult<Vec<String>> {
        let version = VersionTag::new(version)?;
        let prefix = format!("php{}-", version);
        let mut names: Vec<String> = self
            .installer
            .list_available(&prefix)?
            .split_whitespace()
            .filter_map(|name| name.split('/').next())
            .filter_map(|name| name.strip_prefix(prefix.as_str()))
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .filter(|ext| !CORE_EXTENSIONS.contains(ext))
            .map(str::to_string)
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Install one extension package for an installed runtime
    pub fn install_extension(&self, version: &str, extension: &str) -> PanelResult<Outcome> {
        let version = VersionTag::new(version)?;
        if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(PanelError::InvalidModuleName {
                value: extension.to_string(),
            });
        }
        if !self.is_installed(&version)? {
            return Err(PanelError::NotFound {
                entity: "PHP version",
                name: version.to_string(),
            });
        }
        let package = format!("php{}-{}", version, extension);
        if self.coordinator.is_dry_run() {
            return Ok(Outcome::success(format!("dry run: would install {}", package)));
        }
        self.installer.install(std::slice::from_ref(&package))?;
        Ok(Outcome::success(format!("{} installed", package)))
    }
}

fn package_names(version: &VersionTag) -> Vec<String> {
    BASE_PACKAGES
        .iter()
        .map(|suffix| format!("php{}-{}", version, suffix))
        .collect()
}

/// Versions named by `php<MAJOR.MINOR>-fpm` packages in a listing, ascending
fn fpm_versions(listing: &str) -> Vec<String> {
    let mut versions: Vec<VersionTag> = listing
        .split(|c: char| c.is_whitespace() || c == '/')
        .filter_map(|token| token.strip_prefix("php")?.strip_suffix("-fpm"))
        .filter_map(|v| VersionTag::new(v).ok())
        .collect();
    versions.sort_by_key(|v| version_key(v.as_str()));
    versions.dedup();
    versions.into_iter().map(|v| v.to_string()).collect()
}

fn version_key(version: &str) -> (u32, u32) {
    let mut parts = version.split('.').map(|p| p.parse().unwrap_or(0));
    (parts.next().unwrap_or(0), parts.next().unwrap_or(0))
}
