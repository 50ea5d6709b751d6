//! The compiler configuration under verification.
//!
//! [`CompilerConfig`] is the fully-resolved, typed subject of one
//! verification run. It is built from [`RawCompilerConfig`], the
//! string-level view an adapter reads out of the project settings, with
//! a strict split in parse behavior:
//!
//! - the four required fields (`platform-version`, `platform-build`,
//!   `source-level`, `target-level`) fail hard with
//!   [`DomainError::VersionParse`], naming the field and the raw value;
//! - every optional field parses leniently to `None`, which the
//!   null-safe comparison then treats as "no constraint".
//!
//! Nothing here touches process-wide state; the caller resolves paths
//! and environment values before constructing the raw config.

use std::path::PathBuf;

use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::version::Version;

/// String-level configuration as read from the project settings.
#[derive(Debug, Clone, Default)]
pub struct RawCompilerConfig {
    pub platform_version: String,
    pub platform_build: String,
    pub source_level: String,
    pub target_level: String,
    pub secondary: Option<RawSecondaryToolchain>,
    pub download_dir: PathBuf,
    pub legacy_download_dir: PathBuf,
}

/// String-level secondary-toolchain settings.
///
/// The table being present at all is what makes the secondary toolchain
/// "present"; each field inside it is independently optional.
#[derive(Debug, Clone, Default)]
pub struct RawSecondaryToolchain {
    pub version: Option<String>,
    pub runtime_target: Option<String>,
    pub api_version: Option<String>,
    pub language_version: Option<String>,
    pub stdlib_bundling: Option<bool>,
    pub incremental_cache: Option<bool>,
}

/// Fully-resolved configuration for one verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Marketing version of the target platform, e.g. `2023.1`.
    pub platform_version: Version,
    /// Build number of the target platform, e.g. `231.8109.175`.
    pub platform_build: Version,
    /// Language level the primary compiler accepts as input.
    pub source_level: Version,
    /// Runtime level the primary compiler emits artifacts for.
    pub target_level: Version,
    /// Secondary-language toolchain settings; `None` when the project
    /// does not use one.
    pub secondary: Option<SecondaryToolchain>,
    /// Configured download/cache directory for platform distributions.
    pub download_dir: PathBuf,
    /// The fixed legacy download directory older releases used.
    pub legacy_download_dir: PathBuf,
}

/// Resolved secondary-toolchain settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecondaryToolchain {
    /// Version of the toolchain itself.
    pub version: Option<Version>,
    /// Runtime level its compiler emits artifacts for.
    pub runtime_target: Option<Version>,
    /// Declared API surface level.
    pub api_version: Option<Version>,
    /// Declared language level.
    pub language_version: Option<Version>,
    /// Whether the bundled standard-library dependency was explicitly
    /// opted in or out. `None` means the project never decided, which is
    /// itself diagnosable.
    pub stdlib_bundling: Option<bool>,
    /// Whether the incremental compilation cache was explicitly opted in
    /// or out. `None` means the project never decided.
    pub incremental_cache: Option<bool>,
}

impl CompilerConfig {
    /// Resolve a raw configuration into a typed one.
    ///
    /// # Errors
    ///
    /// Fails with [`DomainError::VersionParse`] when any of the four
    /// required version fields cannot be parsed. Optional fields never
    /// fail; an unparseable value is logged and dropped.
    pub fn from_raw(raw: RawCompilerConfig) -> Result<Self, DomainError> {
        let secondary = raw.secondary.map(|sec| SecondaryToolchain {
            version: parse_lenient("secondary-toolchain.version", sec.version.as_deref()),
            runtime_target: parse_lenient(
                "secondary-toolchain.runtime-target",
                sec.runtime_target.as_deref(),
            ),
            api_version: parse_lenient(
                "secondary-toolchain.api-version",
                sec.api_version.as_deref(),
            ),
            language_version: parse_lenient(
                "secondary-toolchain.language-version",
                sec.language_version.as_deref(),
            ),
            stdlib_bundling: sec.stdlib_bundling,
            incremental_cache: sec.incremental_cache,
        });

        Ok(Self {
            platform_version: parse_required("platform-version", &raw.platform_version)?,
            platform_build: parse_required("platform-build", &raw.platform_build)?,
            source_level: parse_required("source-level", &raw.source_level)?,
            target_level: parse_required("target-level", &raw.target_level)?,
            secondary,
            download_dir: raw.download_dir,
            legacy_download_dir: raw.legacy_download_dir,
        })
    }
}

/// Parse a required field, attributing the failure to `field`.
fn parse_required(field: &'static str, value: &str) -> Result<Version, DomainError> {
    Version::parse(value).map_err(|_| DomainError::VersionParse {
        field,
        value: value.to_owned(),
    })
}

/// Parse an optional field; failures are swallowed into `None`.
fn parse_lenient(field: &'static str, value: Option<&str>) -> Option<Version> {
    let value = value?;
    match Version::parse(value) {
        Ok(v) => Some(v),
        Err(_) => {
            debug!(field, value, "ignoring unparseable optional version");
            None
        }
    }
}
