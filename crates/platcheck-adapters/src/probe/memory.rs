//! In-memory directory probe for tests.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use platcheck_core::application::DirProbe;

/// Probe backed by a fixed set of "populated" paths.
///
/// Useful for exercising the migration hint without touching the real
/// filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirProbe {
    populated: HashSet<PathBuf>,
}

impl MemoryDirProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as an existing, non-empty directory.
    pub fn with_populated(mut self, path: impl Into<PathBuf>) -> Self {
        self.populated.insert(path.into());
        self
    }
}

impl DirProbe for MemoryDirProbe {
    fn is_non_empty_dir(&self, path: &Path) -> bool {
        self.populated.contains(path)
    }
}
