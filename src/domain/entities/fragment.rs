//! Fragment keys
//!
//! A fragment is one `.conf` file in the sites directory. Its presence is the
//! only record that the site or proxy route exists.

use std::fmt;

use serde::Serialize;

use crate::domain::value_objects::DomainName;
use crate::error::{PanelError, PanelResult};

/// File extension the top-level Caddyfile imports
pub const FRAGMENT_EXTENSION: &str = "conf";

/// Prefix separating proxy routes from sites for the same domain
pub const PROXY_PREFIX: &str = "proxy.";

/// Logical key of a fragment inside the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "domain", rename_all = "lowercase")]
pub enum FragmentKey {
    Site(DomainName),
    Proxy(DomainName),
}

impl FragmentKey {
    /// Key for a site fragment.
    ///
    /// Domains starting with `proxy.` are refused: their file name would be
    /// read back as a proxy route.
    pub fn site(domain: DomainName) -> PanelResult<Self> {
        if domain.as_str().starts_with(PROXY_PREFIX) {
            return Err(PanelError::InvalidDomain {
                value: domain.to_string(),
                reason: "the 'proxy.' prefix is reserved for proxy routes",
            });
        }
        Ok(FragmentKey::Site(domain))
    }

    pub fn proxy(domain: DomainName) -> Self {
        FragmentKey::Proxy(domain)
    }

    pub fn domain(&self) -> &DomainName {
        match self {
            FragmentKey::Site(d) | FragmentKey::Proxy(d) => d,
        }
    }

    /// Token that opens the fragment's top-level block
    pub fn anchor(&self) -> &str {
        self.domain().as_str()
    }

    pub fn entity(&self) -> &'static str {
        match self {
            FragmentKey::Site(_) => "site",
            FragmentKey::Proxy(_) => "proxy",
        }
    }

    /// File name inside the store directory
    pub fn file_name(&self) -> String {
        match self {
            FragmentKey::Site(d) => format!("{}.{}", d, FRAGMENT_EXTENSION),
            FragmentKey::Proxy(d) => format!("{}{}.{}", PROXY_PREFIX, d, FRAGMENT_EXTENSION),
        }
    }

    /// Recover a key from a file name; foreign files yield `None`
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(FRAGMENT_EXTENSION)?.strip_suffix('.')?;
        match stem.strip_prefix(PROXY_PREFIX) {
            Some(domain) => DomainName::new(domain).ok().map(FragmentKey::Proxy),
            None => DomainName::new(stem).ok().map(FragmentKey::Site),
        }
    }
}

impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentKey::Site(d) => write!(f, "{}", d),
            FragmentKey::Proxy(d) => write!(f, "{}{}", PROXY_PREFIX, d),
        }
    }
}
