//! Version constraints for selecting an installed package.

use semver::{Version, VersionReq};
use std::fmt;
use std::str::FromStr;

/// Predicate over package versions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VersionConstraint {
    /// Any version, prereleases included
    #[default]
    Any,
    /// A semver requirement such as `>=1.2, <2`
    Requirement(VersionReq),
}

impl VersionConstraint {
    /// Check whether `version` satisfies this constraint.
    pub fn matches(&self, version: &Version) -> bool {
        match self {
            VersionConstraint::Any => true,
            VersionConstraint::Requirement(req) => req.matches(version),
        }
    }
}

impl FromStr for VersionConstraint {
    type Err = semver::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(VersionConstraint::Any);
        }
        let req = s.split(',').map(pin_bare_version).collect::<Vec<_>>().join(",");
        VersionReq::parse(&req).map(VersionConstraint::Requirement)
    }
}

/// A comparator with no operator names an exact version, so `1.0.0` reads
/// as `=1.0.0` rather than semver's default caret. Wildcards keep their
/// meaning.
fn pin_bare_version(comparator: &str) -> String {
    let comparator = comparator.trim();
    let core = comparator.split(['-', '+']).next().unwrap_or_default();
    let bare = comparator.starts_with(|c: char| c.is_ascii_digit())
        && !core.contains(['*', 'x', 'X']);
    if bare {
        format!("={}", comparator)
    } else {
        comparator.to_string()
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionConstraint::Any => write!(f, "*"),
            VersionConstraint::Requirement(req) => write!(f, "{}", req),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_any_matches_everything() {
        let any = VersionConstraint::default();
        assert!(any.matches(&v("0.0.1")));
        assert!(any.matches(&v("10.2.3")));
        assert!(any.matches(&v("2.0.0-rc.1")));
    }

    #[test]
    fn test_parse_empty_is_any() {
        assert_eq!(
            "".parse::<VersionConstraint>().unwrap(),
            VersionConstraint::Any
        );
        assert_eq!(
            "   ".parse::<VersionConstraint>().unwrap(),
            VersionConstraint::Any
        );
    }

    #[test]
    fn test_parse_requirement() {
        let constraint: VersionConstraint = ">=1.2, <2".parse().unwrap();
        assert!(constraint.matches(&v("1.2.0")));
        assert!(constraint.matches(&v("1.9.9")));
        assert!(!constraint.matches(&v("2.0.0")));
        assert!(!constraint.matches(&v("1.1.0")));
    }

    #[test]
    fn test_parse_exact() {
        let constraint: VersionConstraint = "=1.0.0".parse().unwrap();
        assert!(constraint.matches(&v("1.0.0")));
        assert!(!constraint.matches(&v("1.0.1")));
    }

    #[test]
    fn test_parse_bare_version_is_exact() {
        let constraint: VersionConstraint = "1.0.0".parse().unwrap();
        assert!(constraint.matches(&v("1.0.0")));
        assert!(!constraint.matches(&v("1.9.0")));
        assert!(!constraint.matches(&v("1.0.1")));
        assert_eq!(constraint.to_string(), "=1.0.0");
    }

    #[test]
    fn test_parse_bare_version_in_list() {
        let constraint: VersionConstraint = ">=1.0, 1.2.3".parse().unwrap();
        assert!(constraint.matches(&v("1.2.3")));
        assert!(!constraint.matches(&v("1.3.0")));
    }

    #[test]
    fn test_parse_wildcard_kept() {
        let constraint: VersionConstraint = "1.x".parse().unwrap();
        assert!(constraint.matches(&v("1.9.0")));
        assert!(!constraint.matches(&v("2.0.0")));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("not a version".parse::<VersionConstraint>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(VersionConstraint::Any.to_string(), "*");
        let constraint: VersionConstraint = "^1.2".parse().unwrap();
        assert_eq!(constraint.to_string(), "^1.2");
    }
}
