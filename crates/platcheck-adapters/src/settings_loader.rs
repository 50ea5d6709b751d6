//! Project settings loader.
//!
//! Reads the `platcheck.toml` project settings file into the raw
//! configuration the domain layer resolves. Unlike descriptor loading,
//! settings loading fails loudly: without the platform and compiler
//! sections there is nothing to verify.
//!
//! # `platcheck.toml` format
//!
//! ```toml
//! [platform]
//! version = "2023.1"            # marketing version (required)
//! build   = "231.8109.175"      # build number (required)
//!
//! [compiler]
//! source-level = "17"           # required
//! target-level = "17"           # required
//!
//! [secondary-toolchain]         # optional; presence enables its checks
//! version          = "1.8.21"
//! runtime-target   = "17"
//! api-version      = "1.8"
//! language-version = "1.8"
//! stdlib-bundling  = true
//! incremental-cache = false
//!
//! [paths]                       # optional
//! download-dir = "/cache/platforms"
//!
//! [descriptors]                 # optional
//! files     = ["widget.plugin.toml"]
//! directory = "plugins"
//! ```
//!
//! Relative paths are resolved against the directory containing the
//! settings file, so a checked-in `platcheck.toml` behaves the same from
//! any working directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, instrument};

use platcheck_core::application::ApplicationError;
use platcheck_core::domain::{RawCompilerConfig, RawSecondaryToolchain};

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a `platcheck.toml` file.
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsManifest {
    pub platform: PlatformSection,
    pub compiler: CompilerSection,
    #[serde(rename = "secondary-toolchain")]
    pub secondary_toolchain: Option<SecondaryToolchainSection>,
    pub paths: Option<PathsSection>,
    pub descriptors: Option<DescriptorsSection>,
}

/// `[platform]` section, the platform being targeted.
#[derive(Debug, Deserialize, Clone)]
pub struct PlatformSection {
    pub version: String,
    pub build: String,
}

/// `[compiler]` section, the primary toolchain levels.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct CompilerSection {
    pub source_level: String,
    pub target_level: String,
}

/// `[secondary-toolchain]` section. The table being present at all is
/// what marks the project as using a secondary toolchain.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SecondaryToolchainSection {
    pub version: Option<String>,
    pub runtime_target: Option<String>,
    pub api_version: Option<String>,
    pub language_version: Option<String>,
    pub stdlib_bundling: Option<bool>,
    pub incremental_cache: Option<bool>,
}

/// `[paths]` section overrides.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct PathsSection {
    pub download_dir: Option<PathBuf>,
    pub legacy_download_dir: Option<PathBuf>,
}

/// `[descriptors]` section, which plugin descriptors to verify.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DescriptorsSection {
    pub files: Option<Vec<PathBuf>>,
    pub directory: Option<PathBuf>,
}

// ── Resolved settings ─────────────────────────────────────────────────────────

/// Environment-derived defaults the settings file may override.
///
/// The CLI computes these once (platform-appropriate cache directory,
/// fixed legacy location) and passes them in; the loader itself never
/// consults the environment.
#[derive(Debug, Clone)]
pub struct SettingsDefaults {
    pub download_dir: PathBuf,
    pub legacy_download_dir: PathBuf,
}

/// Fully-resolved project settings, ready for the domain layer.
#[derive(Debug, Clone)]
pub struct ProjectSettings {
    /// Raw compiler configuration; `CompilerConfig::from_raw` does the
    /// fatal/lenient version parsing.
    pub raw: RawCompilerConfig,
    /// Explicit descriptor files, resolved to absolute-ish paths.
    pub descriptor_files: Vec<PathBuf>,
    /// Directory to discover additional descriptors under.
    pub descriptor_dir: Option<PathBuf>,
}

/// Load and resolve `platcheck.toml`.
///
/// # Errors
///
/// Returns [`ApplicationError::SettingsLoad`] when the file is missing,
/// unreadable, or not a valid settings manifest.
#[instrument(skip(defaults), fields(path = %path.display()))]
pub fn load_settings(
    path: &Path,
    defaults: &SettingsDefaults,
) -> Result<ProjectSettings, ApplicationError> {
    let raw = fs::read_to_string(path).map_err(|e| ApplicationError::SettingsLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let manifest: SettingsManifest =
        toml::from_str(&raw).map_err(|e| ApplicationError::SettingsLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let paths = manifest.paths.unwrap_or_default();
    let descriptors = manifest.descriptors.unwrap_or_default();

    let settings = ProjectSettings {
        raw: RawCompilerConfig {
            platform_version: manifest.platform.version,
            platform_build: manifest.platform.build,
            source_level: manifest.compiler.source_level,
            target_level: manifest.compiler.target_level,
            secondary: manifest.secondary_toolchain.map(|sec| RawSecondaryToolchain {
                version: sec.version,
                runtime_target: sec.runtime_target,
                api_version: sec.api_version,
                language_version: sec.language_version,
                stdlib_bundling: sec.stdlib_bundling,
                incremental_cache: sec.incremental_cache,
            }),
            download_dir: resolve(base, paths.download_dir)
                .unwrap_or_else(|| defaults.download_dir.clone()),
            legacy_download_dir: resolve(base, paths.legacy_download_dir)
                .unwrap_or_else(|| defaults.legacy_download_dir.clone()),
        },
        descriptor_files: descriptors
            .files
            .unwrap_or_default()
            .into_iter()
            .map(|p| join(base, p))
            .collect(),
        descriptor_dir: descriptors.directory.map(|p| join(base, p)),
    };

    debug!(
        descriptors = settings.descriptor_files.len(),
        has_dir = settings.descriptor_dir.is_some(),
        "settings loaded"
    );
    Ok(settings)
}

fn resolve(base: &Path, path: Option<PathBuf>) -> Option<PathBuf> {
    path.map(|p| join(base, p))
}

fn join(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
