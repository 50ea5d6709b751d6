//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while preparing a verification run.
///
/// Note what is *not* here: descriptor parse failures (silently dropped
/// by contract) and probe failures (a negative result). Only the inputs
/// the run cannot proceed without can error.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The project settings file could not be read or parsed.
    #[error("failed to load project settings from {path}: {reason}")]
    SettingsLoad { path: PathBuf, reason: String },

    /// A descriptor directory could not be enumerated.
    #[error("failed to discover descriptors under {path}: {reason}")]
    DescriptorDiscovery { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SettingsLoad { path, .. } => vec![
                format!("Could not load: {}", path.display()),
                "Check that the file exists and is valid TOML".into(),
                "Pass an explicit path with --settings".into(),
            ],
            Self::DescriptorDiscovery { path, .. } => vec![
                format!("Could not enumerate: {}", path.display()),
                "Check that the directory exists and is readable".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SettingsLoad { .. } => ErrorCategory::Configuration,
            Self::DescriptorDiscovery { .. } => ErrorCategory::Configuration,
        }
    }
}
