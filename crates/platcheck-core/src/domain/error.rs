use thiserror::Error;

/// Root domain error type.
///
/// Only two things can go wrong inside the domain layer: a required
/// version string fails to parse, or a requirement table is constructed
/// with mis-ordered thresholds. Diagnostics are *data*, never errors;
/// see `domain::verifier`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A version string could not be parsed.
    ///
    /// Fatal when raised for one of the required configuration fields
    /// (`platform-version`, `platform-build`, `source-level`,
    /// `target-level`); everywhere else callers swallow this and treat
    /// the value as absent.
    #[error("cannot parse '{value}' as a version for {field}")]
    VersionParse {
        field: &'static str,
        value: String,
    },

    /// Requirement table thresholds were not strictly descending.
    #[error("invalid requirement table: {0}")]
    InvalidTable(String),
}

impl DomainError {
    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::VersionParse { .. } => ErrorCategory::Validation,
            Self::InvalidTable(_) => ErrorCategory::Internal,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::VersionParse { field, value } => vec![
                format!("'{value}' is not a valid version for {field}"),
                "Use a dot-delimited numeric version, e.g. 231.8109.175 or 17".into(),
            ],
            Self::InvalidTable(_) => vec![
                "Requirement table entries must be ordered from highest threshold to lowest".into(),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
