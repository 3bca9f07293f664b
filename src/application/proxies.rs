//! Proxy manager: one reverse-proxy fragment per domain, stored under the
//! `proxy.` prefix so it can sit beside a site of the same name

use serde::Serialize;

use crate::domain::entities::FragmentKey;
use crate::domain::services::templates;
use crate::domain::value_objects::{DomainName, ProxyTarget};
use crate::error::{PanelError, PanelResult};
use crate::infrastructure::FragmentStore;

use super::coordinator::{Coordinator, Mutation};
use super::outcome::Outcome;

/// A proxy route as listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyRoute {
    pub domain: DomainName,
    /// `None` when the fragment has no `reverse_proxy` line
    pub target: Option<String>,
}

pub struct ProxyManager<'a> {
    fragments: &'a FragmentStore,
    coordinator: Coordinator<'a>,
}

impl<'a> ProxyManager<'a> {
    pub fn new(fragments: &'a FragmentStore, coordinator: Coordinator<'a>) -> Self {
        Self {
            fragments,
            coordinator,
        }
    }

    pub fn add(&self, domain: &str, target: &str) -> PanelResult<Outcome> {
        let domain = DomainName::new(domain)?;
        let target = ProxyTarget::new(target)?;
        let key = FragmentKey::proxy(domain.clone());

        let text = templates::proxy_fragment(&domain, &target);
        let applied = self.coordinator.run(&self.fragments.document(&key), |current| {
            match current {
                Some(_) => Err(PanelError::AlreadyExists {
                    entity: "proxy",
                    name: domain.to_string(),
                }),
                None => Ok(Mutation::Write(text)),
            }
        })?;

        Ok(applied.into_outcome(
            format!("proxy {} -> {} added", domain, target),
            format!("proxy {} exists", domain),
        ))
    }

    pub fn remove(&self, domain: &str, confirmed: bool) -> PanelResult<Outcome> {
        let domain = DomainName::new(domain)?;
        let key = FragmentKey::proxy(domain.clone());
        if !self.fragments.exists(&key) {
            return Err(not_found(&domain));
        }
        if !confirmed {
            return Ok(Outcome::cancelled(format!("proxy {} kept", domain)));
        }

        let applied = self.coordinator.run(&self.fragments.document(&key), |current| {
            current.map(|_| Mutation::Delete).ok_or_else(|| not_found(&domain))
        })?;
        Ok(applied.into_outcome(
            format!("proxy {} removed", domain),
            format!("proxy {} already gone", domain),
        ))
    }

    /// Routes with their upstreams, read once from the current files
    pub fn list(&self) -> PanelResult<Vec<ProxyRoute>> {
        let mut routes = Vec::new();
        for key in self.fragments.list()? {
            if let FragmentKey::Proxy(domain) = &key {
                // The file may vanish between listing and reading
                let target = match self.fragments.read(&key) {
                    Ok(text) => templates::proxy_upstream(&text),
                    Err(PanelError::NotFound { .. }) => continue,
                    Err(e) => return Err(e),
                };
                routes.push(ProxyRoute {
                    domain: domain.clone(),
                    target,
                });
            }
        }
        Ok(routes)
    }
}

fn not_found(domain: &DomainName) -> PanelError {
    PanelError::NotFound {
        entity: "proxy",
        name: domain.to_string(),
    }
}
