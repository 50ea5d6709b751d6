//! Filesystem-based plugin-descriptor loader.
//!
//! Parses `*.plugin.toml` descriptor manifests into domain
//! [`Descriptor`] records ready for the verification engine, and
//! discovers descriptor files in a directory tree.
//!
//! # `*.plugin.toml` format
//!
//! ```toml
//! [plugin]
//! id   = "com.example.widget"   # optional; used for log context
//! name = "Widget Support"       # optional; ignored by verification
//!
//! [compatibility]
//! since-build = "223.0"         # optional minimum platform build
//! until-build = "233.1"         # optional maximum platform build
//! ```
//!
//! Both sections and every field inside them are optional. A file that
//! is not valid TOML at all is skipped with a `WARN` log; a field whose
//! version string does not parse becomes `None`, which the null-safe
//! comparison treats as "no constraint".

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use platcheck_core::application::{ApplicationError, DescriptorSource};
use platcheck_core::domain::{Descriptor, Version};

/// Suffix that marks a file as a plugin descriptor during discovery.
pub const DESCRIPTOR_SUFFIX: &str = ".plugin.toml";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of one `*.plugin.toml` file.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DescriptorManifest {
    pub plugin: Option<PluginSection>,
    pub compatibility: Option<CompatibilitySection>,
}

/// `[plugin]` section, identity of the plugin.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PluginSection {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// `[compatibility]` section, the declared platform build range.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CompatibilitySection {
    pub since_build: Option<String>,
    pub until_build: Option<String>,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`Descriptor`] records from `*.plugin.toml` files on disk.
///
/// Loading is deliberately lossy: a path that does not exist, cannot be
/// read, or does not parse as TOML emits a `WARN` log and contributes
/// nothing. One broken descriptor must never block verification of the
/// others.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDescriptorSource;

impl FsDescriptorSource {
    pub fn new() -> Self {
        Self
    }

    /// Find every descriptor file under `dir`, sorted by path.
    ///
    /// Sorting keeps the diagnostic order stable across filesystems that
    /// return directory entries in arbitrary order.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::DescriptorDiscovery`] when `dir` is
    /// missing or a directory entry cannot be read. Discovery is the one
    /// descriptor operation that fails loudly: a typo in a directory
    /// argument should not silently verify zero plugins.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn discover(&self, dir: &Path) -> Result<Vec<PathBuf>, ApplicationError> {
        if !dir.is_dir() {
            return Err(ApplicationError::DescriptorDiscovery {
                path: dir.to_path_buf(),
                reason: "not a directory".into(),
            });
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(|e| ApplicationError::DescriptorDiscovery {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })?;
            if entry.file_type().is_file()
                && entry.file_name().to_string_lossy().ends_with(DESCRIPTOR_SUFFIX)
            {
                paths.push(entry.into_path());
            }
        }

        paths.sort();
        debug!(count = paths.len(), "descriptor discovery finished");
        Ok(paths)
    }

    /// Parse one descriptor file.
    fn load_one(&self, path: &Path) -> Result<Descriptor, String> {
        let raw = fs::read_to_string(path).map_err(|e| format!("read failed: {e}"))?;
        let manifest: DescriptorManifest =
            toml::from_str(&raw).map_err(|e| format!("parse failed: {e}"))?;

        let compatibility = manifest.compatibility.unwrap_or_default();
        Ok(Descriptor {
            id: manifest.plugin.and_then(|p| p.id),
            since_build: parse_build(path, "since-build", compatibility.since_build.as_deref()),
            until_build: parse_build(path, "until-build", compatibility.until_build.as_deref()),
        })
    }
}

impl DescriptorSource for FsDescriptorSource {
    #[instrument(skip_all, fields(supplied = paths.len()))]
    fn load(&self, paths: &[PathBuf]) -> Vec<Descriptor> {
        let mut descriptors = Vec::with_capacity(paths.len());
        for path in paths {
            match self.load_one(path) {
                Ok(descriptor) => {
                    debug!(
                        path = %path.display(),
                        id = descriptor.id.as_deref().unwrap_or("<unnamed>"),
                        "loaded descriptor"
                    );
                    descriptors.push(descriptor);
                }
                Err(reason) => {
                    // One bad descriptor must not block all others.
                    warn!(path = %path.display(), reason, "skipping unreadable descriptor");
                }
            }
        }
        descriptors
    }
}

/// Parse an optional build-range bound; unparseable values become `None`.
///
/// Wildcard bounds like `233.*` are a legitimate way to say "any build
/// of that branch"; they parse to no constraint rather than an error.
fn parse_build(path: &Path, field: &str, value: Option<&str>) -> Option<Version> {
    let value = value?;
    match Version::parse(value) {
        Ok(v) => Some(v),
        Err(_) => {
            debug!(
                path = %path.display(),
                field,
                value,
                "ignoring unparseable build bound"
            );
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
