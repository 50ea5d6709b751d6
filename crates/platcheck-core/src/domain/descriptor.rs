//! Parsed plugin-descriptor records.

use crate::domain::version::Version;

/// One successfully parsed plugin descriptor.
///
/// The loader adapter drops files that fail to parse entirely; a
/// descriptor that parses but carries an unreadable version string ends
/// up with `None` in the corresponding field, and the null-safe
/// comparison keeps every check silent for it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Descriptor {
    /// Plugin identifier, if declared. Used only for log context.
    pub id: Option<String>,
    /// Minimum platform build the plugin declares support for.
    pub since_build: Option<Version>,
    /// Maximum platform build the plugin declares support for.
    pub until_build: Option<Version>,
}

impl Descriptor {
    /// Descriptor with only a minimum-platform declaration.
    pub fn with_since_build(since_build: Version) -> Self {
        Self {
            id: None,
            since_build: Some(since_build),
            until_build: None,
        }
    }
}
