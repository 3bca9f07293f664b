//! Site manager: one static-file fragment per domain

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::entities::FragmentKey;
use crate::domain::services::templates;
use crate::domain::value_objects::DomainName;
use crate::error::{PanelError, PanelResult};
use crate::infrastructure::FragmentStore;

use super::coordinator::{Coordinator, Mutation};
use super::outcome::Outcome;

pub struct SiteManager<'a> {
    fragments: &'a FragmentStore,
    sites_root: &'a Path,
    coordinator: Coordinator<'a>,
}

impl<'a> SiteManager<'a> {
    pub fn new(fragments: &'a FragmentStore, sites_root: &'a Path, coordinator: Coordinator<'a>) -> Self {
        Self {
            fragments,
            sites_root,
            coordinator,
        }
    }

    pub fn site_dir(&self, domain: &DomainName) -> PathBuf {
        self.sites_root.join(domain.as_str())
    }

    /// Create the document root and the site fragment
    pub fn add(&self, domain: &str) -> PanelResult<Outcome> {
        let domain = DomainName::new(domain)?;
        let key = FragmentKey::site(domain.clone())?;
        if self.fragments.exists(&key) {
            return Err(PanelError::AlreadyExists {
                entity: "site",
                name: domain.to_string(),
            });
        }

        let root = self.site_dir(&domain);
        if !self.coordinator.is_dry_run() {
            fs::create_dir_all(&root).map_err(|e| PanelError::io("create", &root, e))?;
        }

        let text = templates::site_fragment(&domain, &root);
        let applied = self.coordinator.run(&self.fragments.document(&key), |current| {
            match current {
                Some(_) => Err(PanelError::AlreadyExists {
                    entity: "site",
                    name: domain.to_string(),
                }),
                None => Ok(Mutation::Write(text)),
            }
        })?;

        Ok(applied
            .into_outcome(format!("site {} added", domain), format!("site {} exists", domain))
            .with_detail(format!("document root: {}", root.display())))
    }

    /// Remove the fragment; the document root stays
    pub fn remove(&self, domain: &str, confirmed: bool) -> PanelResult<Outcome> {
        let domain = DomainName::new(domain)?;
        let key = FragmentKey::site(domain.clone())?;
        if !self.fragments.exists(&key) {
            return Err(not_found(&domain));
        }
        if !confirmed {
            return Ok(Outcome::cancelled(format!("site {} kept", domain)));
        }

        let applied = self.coordinator.run(&self.fragments.document(&key), |current| {
            current.map(|_| Mutation::Delete).ok_or_else(|| not_found(&domain))
        })?;

        Ok(applied
            .into_outcome(format!("site {} removed", domain), format!("site {} already gone", domain))
            .with_detail(format!(
                "site files kept at {}",
                self.site_dir(&domain).display()
            )))
    }

    pub fn list(&self) -> PanelResult<Vec<DomainName>> {
        Ok(self
            .fragments
            .list()?
            .into_iter()
            .filter_map(|key| match key {
                FragmentKey::Site(domain) => Some(domain),
                FragmentKey::Proxy(_) => None,
            })
            .collect())
    }
}

fn not_found(domain: &DomainName) -> PanelError {
    PanelError::NotFound {
        entity: "site",
        name: domain.to_string(),
    }
}
