//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `platcheck-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::Descriptor;

/// Port for obtaining parsed plugin descriptors.
///
/// Implemented by:
/// - `platcheck_adapters::FsDescriptorSource` (production)
/// - in-memory stubs in tests
///
/// ## Design notes
///
/// Loading is infallible by contract: a path that does not exist or does
/// not parse contributes nothing. One bad descriptor must never block
/// verification of the others, and the returned order must match the
/// supplied path order so diagnostic output stays deterministic.
pub trait DescriptorSource: Send + Sync {
    /// Load every descriptor that parses, preserving path order.
    fn load(&self, paths: &[PathBuf]) -> Vec<Descriptor>;
}

/// Port for the read-only legacy-directory probe.
///
/// Implemented by:
/// - `platcheck_adapters::LocalDirProbe` (production, std::fs)
/// - `platcheck_adapters::MemoryDirProbe` (testing)
///
/// Probe failures (missing path, permissions) are a negative result,
/// never an error; the migration hint is best-effort.
pub trait DirProbe: Send + Sync {
    /// `true` only when `path` is a directory containing at least one entry.
    fn is_non_empty_dir(&self, path: &Path) -> bool;
}
