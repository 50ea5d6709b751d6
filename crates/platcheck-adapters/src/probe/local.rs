//! Real-filesystem directory probe.

use std::{fs, path::Path};

use tracing::debug;

use platcheck_core::application::DirProbe;

/// Probes the local filesystem via `std::fs`.
///
/// Every failure mode (missing path, not a directory, permission
/// denied) is a negative answer. The probe only feeds the best-effort
/// migration hint, so it must never turn an unreadable directory into
/// a hard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDirProbe;

impl LocalDirProbe {
    pub fn new() -> Self {
        Self
    }
}

impl DirProbe for LocalDirProbe {
    fn is_non_empty_dir(&self, path: &Path) -> bool {
        match fs::read_dir(path) {
            Ok(mut entries) => entries.next().is_some(),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "directory probe failed");
                false
            }
        }
    }
}
