//! `platcheck check`: run one verification pass and report the outcome.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use platcheck_adapters::{FsDescriptorSource, LocalDirProbe, load_settings};
use platcheck_core::application::VerificationService;
use platcheck_core::domain::{CompatibilityVerifier, CompilerConfig};
use platcheck_core::error::PlatcheckError;

use crate::cli::{CheckArgs, GlobalArgs, ReportFormat};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

#[instrument(skip_all, fields(settings = %args.settings.display()))]
pub fn execute(
    args: CheckArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    if !args.settings.is_file() {
        return Err(CliError::SettingsNotFound {
            path: args.settings,
        });
    }

    // 1. Resolve project settings into a typed configuration.
    let defaults = config.settings_defaults();
    let settings = load_settings(&args.settings, &defaults)
        .map_err(|e| CliError::Core(PlatcheckError::from(e)))?;
    let compiler = CompilerConfig::from_raw(settings.raw)
        .map_err(|e| CliError::Core(PlatcheckError::from(e)))?;

    // 2. Collect descriptor paths: settings first, then CLI additions, so
    //    the report order is stable regardless of shell glob order.
    let loader = FsDescriptorSource::new();
    let mut descriptor_paths: Vec<PathBuf> = settings.descriptor_files;
    if let Some(dir) = &settings.descriptor_dir {
        descriptor_paths.extend(discover(&loader, dir)?);
    }
    descriptor_paths.extend(args.descriptors);
    if let Some(dir) = &args.descriptor_dir {
        descriptor_paths.extend(discover(&loader, dir)?);
    }
    debug!(descriptors = descriptor_paths.len(), "descriptor paths collected");

    // 3. Verify.
    let service = VerificationService::new(
        Box::new(loader),
        Box::new(LocalDirProbe::new()),
        CompatibilityVerifier::default(),
    );
    let outcome = service.run(&compiler, &descriptor_paths);
    info!(issues = outcome.diagnostics.len(), "verification finished");

    // 4. Report.
    match args.format {
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(&outcome).map_err(|e| CliError::ConfigError {
                    message: format!("failed to serialise report: {e}"),
                    source: Some(Box::new(e)),
                })?;
            // JSON goes straight to stdout, bypassing quiet-mode filtering,
            // so the report survives `-q` in scripts.
            println!("{json}");
        }
        ReportFormat::Text => {
            for diagnostic in &outcome.diagnostics {
                output.warning(&diagnostic.message)?;
            }
            if let Some(hint) = &outcome.migration_hint {
                output.info(hint)?;
            }
            if outcome.diagnostics.is_empty() {
                output.success(&format!(
                    "No compatibility issues found for platform {} (build {}).",
                    compiler.platform_version, compiler.platform_build
                ))?;
            } else {
                output.print(&format!(
                    "{} issue(s) found. Run 'platcheck requirements' to inspect \
                     the platform requirement tables.",
                    outcome.diagnostics.len()
                ))?;
            }
        }
    }

    if args.strict && !outcome.diagnostics.is_empty() {
        return Err(CliError::IssuesFound {
            count: outcome.diagnostics.len(),
        });
    }

    Ok(())
}

fn discover(loader: &FsDescriptorSource, dir: &std::path::Path) -> CliResult<Vec<PathBuf>> {
    loader
        .discover(dir)
        .map_err(|e| CliError::Core(PlatcheckError::from(e)))
}
