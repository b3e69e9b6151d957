//! Tool version requirements (`>= 18.20` for node, `>= 2.0` for yarn).

use std::fmt;

use semver::{Version, VersionReq};

use crate::domain::error::DomainError;

/// A parsed requirement that keeps its original spelling for messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRequirement {
    raw: String,
    req: VersionReq,
}

impl VersionRequirement {
    pub fn parse(requirement: &str) -> Result<Self, DomainError> {
        let req = VersionReq::parse(requirement.trim()).map_err(|e| {
            DomainError::InvalidVersionRequirement {
                requirement: requirement.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            raw: requirement.trim().to_string(),
            req,
        })
    }

    /// Whether a tool's reported version (`v18.20.4`, `1.22`) satisfies this.
    /// Unparseable versions never match.
    pub fn matches(&self, reported: &str) -> bool {
        normalize_version(reported).is_some_and(|v| self.req.matches(&v))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Keep only digits and dots, then pad to `major.minor.patch`.
pub fn normalize_version(reported: &str) -> Option<Version> {
    let digits: String = reported
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let mut parts: Vec<&str> = digits.split('.').filter(|p| !p.is_empty()).take(3).collect();
    if parts.is_empty() {
        return None;
    }
    parts.resize(3, "0");
    Version::parse(&parts.join(".")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_requirement_accepts_newer() {
        let req = VersionRequirement::parse(">= 18.20").unwrap();
        assert!(req.matches("v18.20.4"));
        assert!(req.matches("v22.1.0"));
        assert!(!req.matches("v16.20.2"));
        assert!(!req.matches("v18.19.1"));
    }

    #[test]
    fn garbage_version_never_matches() {
        let req = VersionRequirement::parse(">= 1.0").unwrap();
        assert!(!req.matches("command not found"));
        assert!(!req.matches(""));
    }

    #[test]
    fn pads_short_versions() {
        assert_eq!(normalize_version("1.22"), Some(Version::new(1, 22, 0)));
        assert_eq!(normalize_version("v4"), Some(Version::new(4, 0, 0)));
        assert_eq!(normalize_version("4.5.1.2"), Some(Version::new(4, 5, 1)));
    }

    #[test]
    fn rejects_invalid_requirement() {
        assert!(matches!(
            VersionRequirement::parse(">>= banana"),
            Err(DomainError::InvalidVersionRequirement { .. })
        ));
    }
}
