//! Build-number to toolchain-requirement threshold tables.
//!
//! Each platform release raises the bar for the toolchain that plugins
//! must be built with. The mapping is maintained by hand as an ordered
//! list of `(threshold, requirement)` pairs, highest threshold first:
//! a build number resolves to the requirement of the greatest threshold
//! that is `<=` the build (greatest-lower-bound lookup). A build below
//! every threshold has no requirement at all.
//!
//! The tables are append-only at the high end. A newly released platform
//! build whose number exceeds every threshold resolves to the most recent
//! entry; there is no extrapolation.

use std::cmp::Ordering;

use crate::domain::error::DomainError;
use crate::domain::version::Version;

/// An ordered (descending by threshold) requirement table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementTable {
    entries: Vec<(Version, Version)>,
}

impl RequirementTable {
    /// Build a table from `(threshold, requirement)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTable`] unless thresholds are
    /// strictly descending in iteration order, the invariant that makes
    /// the greatest-lower-bound lookup well defined.
    pub fn new(entries: Vec<(Version, Version)>) -> Result<Self, DomainError> {
        for pair in entries.windows(2) {
            let (prev, next) = (&pair[0].0, &pair[1].0);
            if prev.compare(next) != Ordering::Greater {
                return Err(DomainError::InvalidTable(format!(
                    "threshold {next} must be lower than {prev}"
                )));
            }
        }
        Ok(Self { entries })
    }

    /// The requirement for `build`: the entry of the greatest threshold
    /// `<=` the queried build number, or `None` when the build predates
    /// every threshold.
    pub fn required(&self, build: &Version) -> Option<&Version> {
        self.entries
            .iter()
            .find(|(threshold, _)| build.compare(threshold) != Ordering::Less)
            .map(|(_, requirement)| requirement)
    }

    /// The raw `(threshold, requirement)` pairs, highest threshold first.
    pub fn entries(&self) -> &[(Version, Version)] {
        &self.entries
    }
}

/// The two tables the verifier consults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementTables {
    /// Build number → minimum primary-toolchain target level the platform
    /// runtime can execute.
    pub target: RequirementTable,
    /// Build number → secondary-toolchain language/API level bundled with
    /// the platform.
    pub secondary_language: RequirementTable,
}

impl RequirementTables {
    pub fn new(target: RequirementTable, secondary_language: RequirementTable) -> Self {
        Self {
            target,
            secondary_language,
        }
    }
}

impl Default for RequirementTables {
    /// The hand-curated production data.
    ///
    /// Threshold values track historical platform releases and are a
    /// data-maintenance concern: append new entries at the top when a
    /// release raises a requirement, never reorder or infer.
    fn default() -> Self {
        let target = RequirementTable::new(vec![
            (Version::new(242), Version::new(21)),
            (Version::new(223), Version::new(17)),
            (Version::new(203), Version::new(11)),
            (Version::new(191), Version::new(8)),
        ])
        .expect("built-in target table is strictly descending");

        let secondary_language = RequirementTable::new(vec![
            (Version::new(243), Version::full(2, 1, 0)),
            (Version::new(242), Version::full(2, 0, 0)),
            (Version::new(241), Version::full(1, 9, 22)),
            (Version::new(233), Version::full(1, 9, 21)),
            (Version::new(232), Version::full(1, 8, 20)),
            (Version::new(231), Version::full(1, 8, 0)),
            (Version::new(223), Version::full(1, 7, 0)),
            (Version::new(221), Version::full(1, 6, 21)),
            (Version::new(213), Version::full(1, 5, 10)),
            (Version::new(203), Version::full(1, 4, 0)),
        ])
        .expect("built-in secondary-language table is strictly descending");

        Self::new(target, secondary_language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RequirementTable {
        RequirementTable::new(vec![
            (Version::new(231), Version::new(17)),
            (Version::new(221), Version::new(11)),
            (Version::new(191), Version::new(8)),
        ])
        .unwrap()
    }

    #[test]
    fn lookup_exact_threshold() {
        assert_eq!(table().required(&Version::new(221)), Some(&Version::new(11)));
    }

    #[test]
    fn lookup_between_thresholds_takes_lower() {
        let t = table();
        assert_eq!(
            t.required(&Version::full(223, 4, 1)),
            Some(&Version::new(11))
        );
    }

    #[test]
    fn lookup_above_all_thresholds_takes_highest() {
        // Append-only tables: a future build resolves to the newest entry.
        assert_eq!(
            table().required(&Version::new(999)),
            Some(&Version::new(17))
        );
    }

    #[test]
    fn lookup_below_all_thresholds_is_undefined() {
        assert_eq!(table().required(&Version::new(145)), None);
    }

    #[test]
    fn lookup_build_with_extra_counters() {
        // 231.8109.175 >= 231 under prefix comparison.
        assert_eq!(
            table().required(&Version::full(231, 8109, 175)),
            Some(&Version::new(17))
        );
    }

    #[test]
    fn non_descending_thresholds_rejected() {
        let err = RequirementTable::new(vec![
            (Version::new(221), Version::new(11)),
            (Version::new(231), Version::new(17)),
        ])
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTable(_)));
    }

    #[test]
    fn equal_thresholds_rejected() {
        assert!(
            RequirementTable::new(vec![
                (Version::new(221), Version::new(11)),
                (Version::new(221), Version::new(8)),
            ])
            .is_err()
        );
    }

    #[test]
    fn empty_table_never_matches() {
        let t = RequirementTable::new(Vec::new()).unwrap();
        assert_eq!(t.required(&Version::new(231)), None);
    }

    #[test]
    fn default_tables_are_valid() {
        let tables = RequirementTables::default();
        assert_eq!(
            tables.target.required(&Version::new(231)),
            Some(&Version::new(17))
        );
        assert_eq!(
            tables
                .secondary_language
                .required(&Version::full(223, 100, 5)),
            Some(&Version::full(1, 7, 0))
        );
        // Builds older than every threshold carry no constraint.
        assert_eq!(tables.target.required(&Version::new(100)), None);
    }
}
