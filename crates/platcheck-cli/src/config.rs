//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Config file (`--config` path, or the default location)
//! 3. Built-in defaults (always present)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use platcheck_adapters::SettingsDefaults;

use crate::error::{CliError, CliResult};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Cache/download directory overrides.
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PathsConfig {
    /// Where platform distributions are downloaded to.
    pub download_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicitly passed `--config` path must exist and parse; the
    /// default location is optional and silently falls back to built-in
    /// defaults when absent.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let (path, required) = match config_file {
            Some(p) => (p.clone(), true),
            None => (Self::config_path(), false),
        };

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if required => {
                return Err(CliError::ConfigError {
                    message: format!("cannot read '{}': {e}", path.display()),
                    source: Some(Box::new(e)),
                });
            }
            Err(_) => return Ok(Self::default()),
        };

        toml::from_str(&raw).map_err(|e| CliError::ConfigError {
            message: format!("cannot parse '{}': {e}", path.display()),
            source: Some(Box::new(e)),
        })
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.platcheck.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "platcheck", "platcheck")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".platcheck.toml"))
    }

    /// The path defaults the settings loader falls back to.
    ///
    /// The legacy download directory is the fixed `~/.platcheck/downloads`
    /// location older releases wrote to; it is not configurable because
    /// the migration hint exists precisely to move users off it.
    pub fn settings_defaults(&self) -> SettingsDefaults {
        let download_dir = self.paths.download_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("io", "platcheck", "platcheck")
                .map(|d| d.cache_dir().join("platforms"))
                .unwrap_or_else(|| PathBuf::from(".platcheck-cache/platforms"))
        });

        let legacy_download_dir = directories::BaseDirs::new()
            .map(|d| d.home_dir().join(".platcheck").join("downloads"))
            .unwrap_or_else(|| PathBuf::from(".platcheck/downloads"));

        SettingsDefaults {
            download_dir,
            legacy_download_dir,
        }
    }
}
