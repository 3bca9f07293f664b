//! Validated name value objects
//!
//! Each type can only be built through its validator, so code holding a
//! `DomainName` never re-checks it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::validate::{
    validate_db_identifier, validate_domain, validate_module_name, validate_proxy_target,
    validate_version_tag,
};
use crate::error::{PanelError, PanelResult};

macro_rules! validated_name {
    ($(#[$meta:meta])* $name:ident, $check:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> PanelResult<Self> {
                let value = value.into();
                $check(&value)?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = PanelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

validated_name!(
    /// Site domain, also the fragment key and block anchor
    DomainName,
    validate_domain
);

validated_name!(
    /// Database or database user name
    DbIdentifier,
    validate_db_identifier
);

validated_name!(
    /// Name of a snippet file in the module directory
    ModuleName,
    validate_module_name
);

validated_name!(
    /// `MAJOR.MINOR` runtime version
    VersionTag,
    validate_version_tag
);

validated_name!(
    /// Upstream address for a reverse proxy route
    ProxyTarget,
    validate_proxy_target
);
