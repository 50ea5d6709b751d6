//! The compatibility verification engine.
//!
//! [`CompatibilityVerifier::verify`] is a pure function from (compiler
//! configuration, descriptors) to an ordered list of [`Diagnostic`]s.
//! Emission order is fixed and fully deterministic:
//!
//! 1. For each descriptor, in supply order: platform-too-old,
//!    target-level, secondary runtime-target, secondary API-version.
//! 2. Platform-wide checks, once per run: source level, secondary
//!    language level, target level, secondary runtime target, the
//!    stdlib-bundling advisory, the known-defect advisory.
//!
//! Every comparison goes through [`Version::compare_opt`], so a value
//! that was never configured (or never parsed) can not fire a check.
//! Diagnostic generation itself never fails; violations are data.

use std::cmp::Ordering;

use serde::Serialize;

use crate::domain::config::CompilerConfig;
use crate::domain::descriptor::Descriptor;
use crate::domain::requirements::RequirementTables;
use crate::domain::version::Version;

/// Secondary-toolchain versions in `[DEFECT_RANGE_START, DEFECT_RANGE_END)`
/// trip a known incremental-compilation defect unless the cache flag was
/// set explicitly.
const DEFECT_RANGE_START: Version = Version::full(1, 8, 20);
const DEFECT_RANGE_END: Version = Version::with_minor(1, 9);

/// Classification of one detected incompatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Descriptor declares support for platform majors older than the
    /// one being targeted.
    PlatformTooOld,
    /// Primary compiler emits artifacts the minimum platform cannot run.
    TargetLevelTooHigh,
    /// Secondary compiler emits artifacts the minimum platform cannot run.
    RuntimeTargetTooHigh,
    /// Secondary API surface exceeds what the minimum platform bundles.
    ApiVersionTooHigh,
    /// Primary source level is below what the platform was built with.
    SourceLevelTooLow,
    /// Secondary language level is below what the platform bundles.
    LanguageVersionTooLow,
    /// The bundled standard-library flag was never set explicitly.
    StdlibBundlingUnset,
    /// The secondary toolchain version is in a known-defective range.
    KnownDefectVersion,
}

/// One detected incompatibility: a classification plus a one-line,
/// self-contained message naming both compared values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, message: String) -> Self {
        Self { kind, message }
    }
}

/// Stateless verification engine.
///
/// The requirement tables are injected at construction so tests can run
/// against synthetic data; production callers use
/// [`CompatibilityVerifier::default`].
#[derive(Debug, Clone, Default)]
pub struct CompatibilityVerifier {
    tables: RequirementTables,
}

impl CompatibilityVerifier {
    pub fn new(tables: RequirementTables) -> Self {
        Self { tables }
    }

    /// The tables this verifier consults.
    pub fn tables(&self) -> &RequirementTables {
        &self.tables
    }

    /// Run every check and collect diagnostics in emission order.
    ///
    /// Pure and total: the same inputs always produce byte-identical
    /// output, and no input can make it fail.
    pub fn verify(&self, config: &CompilerConfig, descriptors: &[Descriptor]) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        let secondary = config.secondary.as_ref();
        let runtime_target = secondary.and_then(|s| s.runtime_target.as_ref());
        let api_version = secondary.and_then(|s| s.api_version.as_ref());
        let language_version = secondary.and_then(|s| s.language_version.as_ref());

        // Per-descriptor checks, in the order descriptors were supplied.
        for descriptor in descriptors {
            let since = descriptor.since_build.as_ref();
            let since_target = since.and_then(|b| self.tables.target.required(b));
            let since_language = since.and_then(|b| self.tables.secondary_language.required(b));

            if let Some(since) = since {
                if since.major() < config.platform_build.major() {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticKind::PlatformTooOld,
                        format!(
                            "The since-build property is lower than the target platform \
                             major version: {since} < {}.",
                            config.platform_build.major()
                        ),
                    ));
                }
            }

            // `violation` only yields when the table lookup succeeded,
            // which guarantees `since` is present, so the `zip` can
            // never drop a real hit.
            if let Some(((required, configured), since)) =
                violation(since_target, Some(&config.target_level), Ordering::Less).zip(since)
            {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::TargetLevelTooHigh,
                    format!(
                        "The compiler configuration specifies target-level={configured} but \
                         since-build='{since}' requires target-level={required}."
                    ),
                ));
            }

            if let Some(((required, configured), since)) =
                violation(since_target, runtime_target, Ordering::Less).zip(since)
            {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::RuntimeTargetTooHigh,
                    format!(
                        "The secondary toolchain specifies runtime-target={configured} but \
                         since-build='{since}' requires runtime-target={required}."
                    ),
                ));
            }

            if let Some(((required, configured), since)) =
                violation(since_language, api_version, Ordering::Less).zip(since)
            {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::ApiVersionTooHigh,
                    format!(
                        "The secondary toolchain specifies api-version={configured} but \
                         since-build='{since}' requires api-version={required}."
                    ),
                ));
            }
        }

        // Platform-wide checks, once per run.
        let platform_target = self.tables.target.required(&config.platform_build);
        // Language levels are release-granular; drop the patch component
        // of the bundled version before comparing.
        let platform_language = self
            .tables
            .secondary_language
            .required(&config.platform_build)
            .map(Version::release);

        if let Some((required, configured)) =
            violation(platform_target, Some(&config.source_level), Ordering::Greater)
        {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::SourceLevelTooLow,
                format!(
                    "The compiler configuration specifies source-level={configured} but \
                     platform {} requires source-level={required}.",
                    config.platform_version
                ),
            ));
        }

        if let Some((required, configured)) =
            violation(platform_language.as_ref(), language_version, Ordering::Greater)
        {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::LanguageVersionTooLow,
                format!(
                    "The secondary toolchain specifies language-version={configured} but \
                     platform {} requires language-version={required}.",
                    config.platform_version
                ),
            ));
        }

        if let Some((required, configured)) =
            violation(platform_target, Some(&config.target_level), Ordering::Less)
        {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::TargetLevelTooHigh,
                format!(
                    "The compiler configuration specifies target-level={configured} but \
                     platform {} requires target-level={required}.",
                    config.platform_version
                ),
            ));
        }

        if let Some((required, configured)) =
            violation(platform_target, runtime_target, Ordering::Less)
        {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::RuntimeTargetTooHigh,
                format!(
                    "The secondary toolchain specifies runtime-target={configured} but \
                     platform {} requires runtime-target={required}.",
                    config.platform_version
                ),
            ));
        }

        if let Some(sec) = secondary {
            if sec.stdlib_bundling.is_none() {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::StdlibBundlingUnset,
                    "The secondary toolchain adds its standard library as a dependency \
                     automatically, which may conflict with the version shipped with the \
                     platform; set stdlib-bundling explicitly in the project settings."
                        .into(),
                ));
            }

            if let Some(version) = &sec.version {
                let in_defect_range = version.compare(&DEFECT_RANGE_START) != Ordering::Less
                    && version.compare(&DEFECT_RANGE_END) == Ordering::Less;
                if in_defect_range && sec.incremental_cache.is_none() {
                    diagnostics.push(Diagnostic::new(
                        DiagnosticKind::KnownDefectVersion,
                        format!(
                            "The secondary toolchain version {version} is affected by a known \
                             incremental-compilation defect; set incremental-cache explicitly \
                             in the project settings."
                        ),
                    ));
                }
            }
        }

        diagnostics
    }
}

/// Both operands of a null-safe comparison, when it yields `ord`.
///
/// `compare_opt` reports `Equal` whenever either side is absent, so a
/// non-`Equal` result guarantees both operands exist and the `zip` never
/// discards a real violation.
fn violation<'a>(
    required: Option<&'a Version>,
    configured: Option<&'a Version>,
    ord: Ordering,
) -> Option<(&'a Version, &'a Version)> {
    if Version::compare_opt(required, configured) == ord {
        required.zip(configured)
    } else {
        None
    }
}

/// Render the aggregated warning for a non-empty diagnostic batch.
///
/// Zero diagnostics produce `None`, never an empty message.
pub fn render_warning(diagnostics: &[Diagnostic]) -> Option<String> {
    if diagnostics.is_empty() {
        return None;
    }
    let mut out = String::from("The following compatibility issues were found:");
    for diagnostic in diagnostics {
        out.push_str("\n- ");
        out.push_str(&diagnostic.message);
    }
    out.push_str("\nRun 'platcheck requirements' to inspect the platform requirement tables.");
    Some(out)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::config::SecondaryToolchain;
    use crate::domain::requirements::RequirementTable;

    fn tables() -> RequirementTables {
        RequirementTables::new(
            RequirementTable::new(vec![
                (Version::new(231), Version::new(17)),
                (Version::new(221), Version::new(11)),
                (Version::new(191), Version::new(8)),
            ])
            .unwrap(),
            RequirementTable::new(vec![
                (Version::new(231), Version::full(1, 8, 0)),
                (Version::new(221), Version::full(1, 6, 21)),
            ])
            .unwrap(),
        )
    }

    fn config(target_level: u32) -> CompilerConfig {
        CompilerConfig {
            platform_version: Version::with_minor(2023, 1),
            platform_build: Version::full(231, 0, 0),
            source_level: Version::new(17),
            target_level: Version::new(target_level),
            secondary: None,
            download_dir: PathBuf::from("/cache/platcheck"),
            legacy_download_dir: PathBuf::from("/home/dev/.platcheck/downloads"),
        }
    }

    fn verifier() -> CompatibilityVerifier {
        CompatibilityVerifier::new(tables())
    }

    fn kinds(diagnostics: &[Diagnostic]) -> Vec<DiagnosticKind> {
        diagnostics.iter().map(|d| d.kind).collect()
    }

    // ── per-descriptor checks ───────────────────────────────────────────

    #[test]
    fn since_build_below_platform_major_fires() {
        // Platform build 231.0.0, descriptor since-build 221.0: the
        // declared range is a major behind the actual target.
        let descriptor = Descriptor::with_since_build(Version::with_minor(221, 0));
        let diagnostics = verifier().verify(&config(11), &[descriptor]);

        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::PlatformTooOld]);
        assert!(diagnostics[0].message.contains("221.0"));
        assert!(diagnostics[0].message.contains("231"));
    }

    #[test]
    fn target_level_above_since_build_requirement_fires() {
        // since-build 221 requires target 11; emitting 17 produces
        // artifacts the declared minimum platform cannot run.
        let descriptor = Descriptor::with_since_build(Version::with_minor(221, 0));
        let diagnostics = verifier().verify(&config(17), &[descriptor]);

        assert_eq!(
            kinds(&diagnostics),
            vec![
                DiagnosticKind::PlatformTooOld,
                DiagnosticKind::TargetLevelTooHigh,
            ]
        );
        assert!(diagnostics[1].message.contains("target-level=17"));
        assert!(diagnostics[1].message.contains("target-level=11"));
    }

    #[test]
    fn descriptor_without_since_build_is_silent() {
        let diagnostics = verifier().verify(&config(17), &[Descriptor::default()]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn since_build_below_all_thresholds_yields_no_requirement() {
        // No table entry covers build 100, so no target-level check can
        // fire; the major comparison still does.
        let descriptor = Descriptor::with_since_build(Version::new(100));
        let diagnostics = verifier().verify(&config(17), &[descriptor]);
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::PlatformTooOld]);
    }

    #[test]
    fn secondary_checks_against_descriptor() {
        let descriptor = Descriptor::with_since_build(Version::with_minor(221, 0));
        let mut cfg = config(11);
        cfg.secondary = Some(SecondaryToolchain {
            runtime_target: Some(Version::new(17)),
            api_version: Some(Version::with_minor(1, 8)),
            stdlib_bundling: Some(false),
            ..SecondaryToolchain::default()
        });

        let diagnostics = verifier().verify(&cfg, &[descriptor]);
        assert_eq!(
            kinds(&diagnostics),
            vec![
                DiagnosticKind::PlatformTooOld,
                DiagnosticKind::RuntimeTargetTooHigh,
                DiagnosticKind::ApiVersionTooHigh,
                // platform-wide: bundled 1.8.0 < configured runtime 17 is
                // fine, but runtime-target 17 equals the platform
                // requirement so only the descriptor-level checks fire.
            ]
        );
        assert!(diagnostics[2].message.contains("api-version=1.8"));
        assert!(diagnostics[2].message.contains("api-version=1.6.21"));
    }

    // ── platform-wide checks ────────────────────────────────────────────

    #[test]
    fn source_level_below_platform_requirement_fires() {
        let mut cfg = config(17);
        cfg.source_level = Version::new(8);
        let diagnostics = verifier().verify(&cfg, &[]);

        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::SourceLevelTooLow]);
        assert!(diagnostics[0].message.contains("source-level=8"));
        assert!(diagnostics[0].message.contains("source-level=17"));
        assert!(diagnostics[0].message.contains("2023.1"));
    }

    #[test]
    fn target_level_above_platform_requirement_fires() {
        let diagnostics = verifier().verify(&config(21), &[]);
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::TargetLevelTooHigh]
        );
    }

    #[test]
    fn language_version_below_bundled_fires_at_release_granularity() {
        let mut cfg = config(17);
        cfg.secondary = Some(SecondaryToolchain {
            language_version: Some(Version::with_minor(1, 6)),
            stdlib_bundling: Some(true),
            ..SecondaryToolchain::default()
        });

        let diagnostics = verifier().verify(&cfg, &[]);
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::LanguageVersionTooLow]
        );
        // Bundled 1.8.0 is reported as release 1.8, not 1.8.0.
        assert!(diagnostics[0].message.contains("language-version=1.8."));
        assert!(!diagnostics[0].message.contains("1.8.0"));
    }

    #[test]
    fn matching_language_release_is_silent() {
        let mut cfg = config(17);
        cfg.secondary = Some(SecondaryToolchain {
            language_version: Some(Version::with_minor(1, 8)),
            stdlib_bundling: Some(true),
            ..SecondaryToolchain::default()
        });
        assert!(verifier().verify(&cfg, &[]).is_empty());
    }

    // ── advisories ──────────────────────────────────────────────────────

    #[test]
    fn unset_stdlib_bundling_is_advised_when_secondary_present() {
        let mut cfg = config(17);
        cfg.secondary = Some(SecondaryToolchain::default());
        let diagnostics = verifier().verify(&cfg, &[]);
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::StdlibBundlingUnset]
        );
    }

    #[test]
    fn explicit_stdlib_bundling_silences_the_advisory() {
        for choice in [true, false] {
            let mut cfg = config(17);
            cfg.secondary = Some(SecondaryToolchain {
                stdlib_bundling: Some(choice),
                ..SecondaryToolchain::default()
            });
            assert!(verifier().verify(&cfg, &[]).is_empty());
        }
    }

    #[test]
    fn known_defect_range_is_inclusive_exclusive() {
        let in_range = [
            Version::full(1, 8, 20),
            Version::full(1, 8, 21),
            Version::full(1, 8, 255),
        ];
        let out_of_range = [
            Version::full(1, 8, 10),
            Version::full(1, 9, 0),
            Version::with_minor(1, 9),
            Version::full(2, 0, 0),
        ];

        for version in in_range {
            let mut cfg = config(17);
            cfg.secondary = Some(SecondaryToolchain {
                version: Some(version),
                stdlib_bundling: Some(false),
                ..SecondaryToolchain::default()
            });
            let diagnostics = verifier().verify(&cfg, &[]);
            assert_eq!(
                kinds(&diagnostics),
                vec![DiagnosticKind::KnownDefectVersion],
                "{version} should be in the defect range"
            );
            assert!(diagnostics[0].message.contains(&version.to_string()));
        }

        for version in out_of_range {
            let mut cfg = config(17);
            cfg.secondary = Some(SecondaryToolchain {
                version: Some(version),
                stdlib_bundling: Some(false),
                ..SecondaryToolchain::default()
            });
            assert!(
                verifier().verify(&cfg, &[]).is_empty(),
                "{version} should be outside the defect range"
            );
        }
    }

    #[test]
    fn explicit_incremental_cache_silences_defect_advisory() {
        let mut cfg = config(17);
        cfg.secondary = Some(SecondaryToolchain {
            version: Some(Version::full(1, 8, 21)),
            stdlib_bundling: Some(false),
            incremental_cache: Some(true),
            ..SecondaryToolchain::default()
        });
        assert!(verifier().verify(&cfg, &[]).is_empty());
    }

    // ── invariants ──────────────────────────────────────────────────────

    #[test]
    fn no_secondary_toolchain_means_no_secondary_diagnostics() {
        // Null-safety: whatever the platform build, a project without a
        // secondary toolchain gets none of its diagnostics.
        let descriptor = Descriptor::with_since_build(Version::with_minor(221, 0));
        let diagnostics = verifier().verify(&config(17), &[descriptor]);
        assert!(diagnostics.iter().all(|d| !matches!(
            d.kind,
            DiagnosticKind::RuntimeTargetTooHigh
                | DiagnosticKind::ApiVersionTooHigh
                | DiagnosticKind::LanguageVersionTooLow
                | DiagnosticKind::StdlibBundlingUnset
                | DiagnosticKind::KnownDefectVersion
        )));
    }

    #[test]
    fn emission_order_is_deterministic() {
        let descriptors = vec![
            Descriptor::with_since_build(Version::with_minor(221, 0)),
            Descriptor::with_since_build(Version::new(191)),
        ];
        let mut cfg = config(21);
        cfg.source_level = Version::new(8);

        let first = verifier().verify(&cfg, &descriptors);
        for _ in 0..10 {
            assert_eq!(verifier().verify(&cfg, &descriptors), first);
        }

        // Descriptor checks come first, in supply order, then the
        // platform-wide block.
        assert_eq!(
            kinds(&first),
            vec![
                DiagnosticKind::PlatformTooOld,      // descriptor 1
                DiagnosticKind::TargetLevelTooHigh,  // descriptor 1: 11 < 21
                DiagnosticKind::PlatformTooOld,      // descriptor 2
                DiagnosticKind::TargetLevelTooHigh,  // descriptor 2: 8 < 21
                DiagnosticKind::SourceLevelTooLow,   // platform: 17 > 8
                DiagnosticKind::TargetLevelTooHigh,  // platform: 17 < 21
            ]
        );
    }

    #[test]
    fn raising_target_level_never_removes_target_diagnostics() {
        let descriptor = Descriptor::with_since_build(Version::with_minor(221, 0));
        let mut previous = 0;
        for target in [11, 17, 21, 25] {
            let count = verifier()
                .verify(&config(target), &[descriptor.clone()])
                .iter()
                .filter(|d| d.kind == DiagnosticKind::TargetLevelTooHigh)
                .count();
            assert!(count >= previous, "target {target} removed a diagnostic");
            previous = count;
        }
    }

    // ── rendering ───────────────────────────────────────────────────────

    #[test]
    fn empty_batch_renders_nothing() {
        assert_eq!(render_warning(&[]), None);
    }

    #[test]
    fn warning_lists_each_diagnostic_on_its_own_line() {
        let diagnostics = vec![
            Diagnostic::new(DiagnosticKind::PlatformTooOld, "first issue".into()),
            Diagnostic::new(DiagnosticKind::SourceLevelTooLow, "second issue".into()),
        ];
        let warning = render_warning(&diagnostics).unwrap();
        assert!(warning.starts_with("The following compatibility issues were found:"));
        assert!(warning.contains("\n- first issue"));
        assert!(warning.contains("\n- second issue"));
    }
}
