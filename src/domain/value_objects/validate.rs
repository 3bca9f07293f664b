//! Identifier validation
//!
//! Pure shape checks run at the start of every operation, before any store
//! is touched. A failed check never leaves partial state behind.

use crate::error::{PanelError, PanelResult};

/// Characters that would break out of a fragment file name or a Caddyfile token
const FORBIDDEN_IN_NAMES: &[char] = &['/', '\\', '{', '}', '#', '"', '\'', '\0'];

/// Check a site domain.
///
/// Non-empty, no whitespace, at least one `.`. The domain doubles as a file
/// name and as the first token of a block, so path separators, braces and a
/// leading dot are rejected too.
pub fn validate_domain(s: &str) -> PanelResult<()> {
    let fail = |reason| {
        Err(PanelError::InvalidDomain {
            value: s.to_string(),
            reason,
        })
    };

    if s.is_empty() {
        return fail("must not be empty");
    }
    if s.chars().any(char::is_whitespace) {
        return fail("must not contain whitespace");
    }
    if !s.contains('.') {
        return fail("must contain at least one '.'");
    }
    if s.starts_with('.') || s.contains("..") {
        return fail("must not start with '.' or contain '..'");
    }
    if s.contains(FORBIDDEN_IN_NAMES) {
        return fail("contains a forbidden character");
    }
    Ok(())
}

/// Check a database or database user name: `[A-Za-z0-9_]+`
pub fn validate_db_identifier(s: &str) -> PanelResult<()> {
    let ok = !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if ok {
        Ok(())
    } else {
        Err(PanelError::InvalidIdentifier {
            value: s.to_string(),
        })
    }
}

/// Check a language version tag: `^\d+\.\d+$`
pub fn validate_version_tag(s: &str) -> PanelResult<()> {
    let is_number = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
    match s.split_once('.') {
        Some((major, minor)) if is_number(major) && is_number(minor) => Ok(()),
        _ => Err(PanelError::InvalidVersion {
            value: s.to_string(),
        }),
    }
}

/// Check a module (snippet) name: `[A-Za-z0-9._-]+`, no leading dot
pub fn validate_module_name(s: &str) -> PanelResult<()> {
    let ok = !s.is_empty()
        && !s.starts_with('.')
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if ok {
        Ok(())
    } else {
        Err(PanelError::InvalidModuleName {
            value: s.to_string(),
        })
    }
}

/// Check an upstream for `reverse_proxy`: non-empty, single token
pub fn validate_proxy_target(s: &str) -> PanelResult<()> {
    let ok = !s.is_empty()
        && !s.chars().any(char::is_whitespace)
        && !s.contains(['{', '}', '#', '\0']);
    if ok {
        Ok(())
    } else {
        Err(PanelError::InvalidTarget {
            value: s.to_string(),
        })
    }
}
