//! Partially-specified platform/toolchain versions.
//!
//! # Design
//!
//! A [`Version`] is one to three non-negative integer components parsed
//! from a dot-delimited string. Missing trailing components are *absent*,
//! not zero: `221` and `221.0` are different values under equality.
//!
//! Ordering is intentionally NOT an `Ord` impl. The verifier compares
//! versions with [`Version::compare`], which walks the common prefix of
//! present components and treats the point where either side runs out as
//! `Equal`. That contract disagrees with structural `PartialEq`
//! (`compare(&221, &221.4) == Equal` while `221 != 221.4`), so giving the
//! type an `Ord` would violate the standard-library consistency rules.
//!
//! [`Version::compare_opt`] extends this to optional operands: if either
//! side is absent the pair compares `Equal`, so an unconfigured knob can
//! never trip a check. Every rule in the verifier goes through it.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// A parsed version with one to three components.
///
/// Construct with [`Version::parse`] or the `const` constructors. The
/// component count is part of the value: `Version::new(221)` and
/// `Version::with_minor(221, 0)` are not equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    major: u32,
    minor: Option<u32>,
    patch: Option<u32>,
}

impl Version {
    /// Major-only version, e.g. `17`.
    pub const fn new(major: u32) -> Self {
        Self {
            major,
            minor: None,
            patch: None,
        }
    }

    /// Major.minor version, e.g. `1.9`.
    pub const fn with_minor(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor: Some(minor),
            patch: None,
        }
    }

    /// Fully-specified version, e.g. `1.8.20`.
    pub const fn full(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor: Some(minor),
            patch: Some(patch),
        }
    }

    /// Parse a dot-delimited version string.
    ///
    /// Every segment must be a non-negative integer; an empty string or a
    /// non-numeric segment is a [`DomainError::VersionParse`]. Build
    /// numbers sometimes carry more than three counters
    /// (`231.8109.175.42`); segments past the third are validated but not
    /// stored.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let fail = || DomainError::VersionParse {
            field: "version",
            value: s.to_owned(),
        };

        if s.is_empty() {
            return Err(fail());
        }

        let mut parsed = Vec::with_capacity(3);
        for segment in s.split('.') {
            let n: u32 = segment.parse().map_err(|_| fail())?;
            parsed.push(n);
        }

        Ok(Self {
            major: parsed[0],
            minor: parsed.get(1).copied(),
            patch: parsed.get(2).copied(),
        })
    }

    /// The major component (always present).
    pub fn major(&self) -> u32 {
        self.major
    }

    /// Truncate to major.minor, dropping the patch component.
    ///
    /// Requirement tables store fully-specified bundled versions
    /// (`1.6.21`) but language-level settings are expressed as releases
    /// (`1.6`), so the language-level check compares at this granularity.
    pub fn release(&self) -> Version {
        Version {
            major: self.major,
            minor: self.minor,
            patch: None,
        }
    }

    /// Compare two versions over the common prefix of present components.
    ///
    /// `compare(&221.4, &221)` is `Equal`: once either side stops
    /// specifying components, the remaining components carry no
    /// constraint. A present-vs-present mismatch decides as usual.
    pub fn compare(&self, other: &Version) -> Ordering {
        match self.major.cmp(&other.major) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match (self.minor, other.minor) {
            (Some(a), Some(b)) => match a.cmp(&b) {
                Ordering::Equal => {}
                ord => return ord,
            },
            _ => return Ordering::Equal,
        }
        match (self.patch, other.patch) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => Ordering::Equal,
        }
    }

    /// Null-safe comparison: absence on either side means `Equal`.
    ///
    /// This is the invariant the whole verifier leans on: a value that
    /// was never supplied must not produce a violation, only a value that
    /// is present and insufficient.
    pub fn compare_opt(a: Option<&Version>, b: Option<&Version>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => a.compare(b),
            _ => Ordering::Equal,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major)?;
        if let Some(minor) = self.minor {
            write!(f, ".{minor}")?;
        }
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_component() {
        assert_eq!(Version::parse("17").unwrap(), Version::new(17));
    }

    #[test]
    fn parse_two_components() {
        assert_eq!(Version::parse("1.9").unwrap(), Version::with_minor(1, 9));
    }

    #[test]
    fn parse_three_components() {
        assert_eq!(
            Version::parse("1.8.20").unwrap(),
            Version::full(1, 8, 20)
        );
    }

    #[test]
    fn parse_ignores_fourth_counter() {
        assert_eq!(
            Version::parse("231.8109.175.42").unwrap(),
            Version::full(231, 8109, 175)
        );
    }

    #[test]
    fn parse_empty_is_error() {
        assert!(matches!(
            Version::parse(""),
            Err(DomainError::VersionParse { .. })
        ));
    }

    #[test]
    fn parse_non_numeric_segment_is_error() {
        assert!(Version::parse("231.*").is_err());
        assert!(Version::parse("abc").is_err());
        assert!(Version::parse("1.2-EAP").is_err());
    }

    #[test]
    fn equality_is_structural() {
        // Component count matters for equality, not for ordering.
        assert_ne!(Version::new(221), Version::with_minor(221, 0));
        assert_eq!(Version::new(221), Version::new(221));
    }

    #[test]
    fn compare_present_components() {
        let a = Version::full(1, 8, 20);
        let b = Version::full(1, 9, 0);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
        assert_eq!(a.compare(&a), Ordering::Equal);
    }

    #[test]
    fn compare_stops_at_missing_component() {
        // 221.4 vs 221: the bare major carries no minor constraint.
        assert_eq!(
            Version::with_minor(221, 4).compare(&Version::new(221)),
            Ordering::Equal
        );
        assert_eq!(
            Version::new(221).compare(&Version::with_minor(221, 4)),
            Ordering::Equal
        );
        // 1.9.0 vs 1.9: equal over the common prefix.
        assert_eq!(
            Version::full(1, 9, 0).compare(&Version::with_minor(1, 9)),
            Ordering::Equal
        );
    }

    #[test]
    fn compare_opt_absent_side_is_equal() {
        let v = Version::new(17);
        assert_eq!(Version::compare_opt(None, Some(&v)), Ordering::Equal);
        assert_eq!(Version::compare_opt(Some(&v), None), Ordering::Equal);
        assert_eq!(Version::compare_opt(None, None), Ordering::Equal);
        assert_eq!(
            Version::compare_opt(Some(&Version::new(11)), Some(&v)),
            Ordering::Less
        );
    }

    #[test]
    fn release_drops_patch() {
        assert_eq!(Version::full(1, 6, 21).release(), Version::with_minor(1, 6));
        assert_eq!(Version::new(17).release(), Version::new(17));
    }

    #[test]
    fn display_round_trips_component_count() {
        assert_eq!(Version::new(17).to_string(), "17");
        assert_eq!(Version::with_minor(1, 9).to_string(), "1.9");
        assert_eq!(Version::full(1, 8, 20).to_string(), "1.8.20");
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let v: Version = "2023.1".parse().unwrap();
        assert_eq!(v, Version::with_minor(2023, 1));
    }
}
