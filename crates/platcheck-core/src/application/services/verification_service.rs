//! Verification service - the application orchestrator.
//!
//! One call to [`VerificationService::run`] is one verification pass:
//! 1. Load descriptors through the [`DescriptorSource`] port
//! 2. Run the pure verification engine
//! 3. Aggregate diagnostics into the warning text
//! 4. Evaluate the legacy-directory migration hint
//!
//! The service never fails: fatal parse errors happen earlier, when the
//! caller resolves `CompilerConfig::from_raw`, and everything after that
//! point is data.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::ports::{DescriptorSource, DirProbe};
use crate::domain::{CompatibilityVerifier, CompilerConfig, Diagnostic, render_warning};

/// Everything one verification pass produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    /// Every fired check, in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// The aggregated multi-line warning; absent when no check fired.
    pub warning: Option<String>,
    /// Informational hint about a still-populated legacy download
    /// directory. Never part of the warning batch.
    pub migration_hint: Option<String>,
}

impl VerificationOutcome {
    /// `true` when nothing at all needs reporting.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.migration_hint.is_none()
    }
}

/// Orchestrates one verification pass over injected adapters.
pub struct VerificationService {
    descriptors: Box<dyn DescriptorSource>,
    probe: Box<dyn DirProbe>,
    verifier: CompatibilityVerifier,
}

impl VerificationService {
    /// Create a service with the given adapters and engine.
    pub fn new(
        descriptors: Box<dyn DescriptorSource>,
        probe: Box<dyn DirProbe>,
        verifier: CompatibilityVerifier,
    ) -> Self {
        Self {
            descriptors,
            probe,
            verifier,
        }
    }

    /// Run one verification pass.
    #[instrument(
        skip_all,
        fields(
            platform = %config.platform_version,
            build = %config.platform_build,
            descriptors = descriptor_paths.len()
        )
    )]
    pub fn run(
        &self,
        config: &CompilerConfig,
        descriptor_paths: &[PathBuf],
    ) -> VerificationOutcome {
        let descriptors = self.descriptors.load(descriptor_paths);
        debug!(parsed = descriptors.len(), "descriptors loaded");

        let diagnostics = self.verifier.verify(config, &descriptors);
        let warning = render_warning(&diagnostics);
        let migration_hint = self.migration_hint(config);

        info!(
            issues = diagnostics.len(),
            hint = migration_hint.is_some(),
            "verification pass finished"
        );

        VerificationOutcome {
            diagnostics,
            warning,
            migration_hint,
        }
    }

    /// The legacy-directory migration hint.
    ///
    /// Fires only when the configured download directory differs from
    /// the legacy one AND the legacy one still holds content. Probe
    /// failures count as "does not exist".
    fn migration_hint(&self, config: &CompilerConfig) -> Option<String> {
        if config.download_dir != config.legacy_download_dir
            && self.probe.is_non_empty_dir(&config.legacy_download_dir)
        {
            Some(format!(
                "The download directory is set to {}, but previously downloaded platform \
                 archives were also found in {}; remove or migrate the old directory.",
                config.download_dir.display(),
                config.legacy_download_dir.display()
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::domain::{Descriptor, Version};

    /// Descriptor source that returns a fixed list regardless of paths.
    struct StaticDescriptors(Vec<Descriptor>);

    impl DescriptorSource for StaticDescriptors {
        fn load(&self, _paths: &[PathBuf]) -> Vec<Descriptor> {
            self.0.clone()
        }
    }

    /// Probe that reports exactly one directory as populated.
    struct OneDir(PathBuf);

    impl DirProbe for OneDir {
        fn is_non_empty_dir(&self, path: &Path) -> bool {
            path == self.0
        }
    }

    fn config() -> CompilerConfig {
        CompilerConfig {
            platform_version: Version::with_minor(2023, 1),
            platform_build: Version::full(231, 0, 0),
            source_level: Version::new(17),
            target_level: Version::new(17),
            secondary: None,
            download_dir: PathBuf::from("/cache/new"),
            legacy_download_dir: PathBuf::from("/cache/legacy"),
        }
    }

    fn service(descriptors: Vec<Descriptor>, populated: &str) -> VerificationService {
        VerificationService::new(
            Box::new(StaticDescriptors(descriptors)),
            Box::new(OneDir(PathBuf::from(populated))),
            CompatibilityVerifier::default(),
        )
    }

    #[test]
    fn clean_run_produces_no_output_at_all() {
        let outcome = service(Vec::new(), "/nowhere").run(&config(), &[]);
        assert!(outcome.is_clean());
        assert_eq!(outcome.warning, None);
        assert_eq!(outcome.migration_hint, None);
    }

    #[test]
    fn migration_hint_names_both_paths() {
        let outcome = service(Vec::new(), "/cache/legacy").run(&config(), &[]);
        let hint = outcome.migration_hint.unwrap();
        assert!(hint.contains("/cache/new"));
        assert!(hint.contains("/cache/legacy"));
        // The hint never contaminates the warning batch.
        assert_eq!(outcome.warning, None);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn no_hint_when_paths_are_identical() {
        let mut cfg = config();
        cfg.download_dir = cfg.legacy_download_dir.clone();
        let outcome = service(Vec::new(), "/cache/legacy").run(&cfg, &[]);
        assert_eq!(outcome.migration_hint, None);
    }

    #[test]
    fn warning_aggregates_descriptor_diagnostics() {
        let descriptors = vec![Descriptor::with_since_build(Version::with_minor(221, 0))];
        let outcome = service(descriptors, "/nowhere").run(&config(), &[]);
        assert!(!outcome.diagnostics.is_empty());
        let warning = outcome.warning.unwrap();
        assert!(warning.contains("compatibility issues"));
        assert!(warning.contains("since-build"));
    }
}
