//! `platcheck requirements`: print the built-in requirement tables.

use serde_json::json;

use platcheck_core::domain::{RequirementTable, RequirementTables};

use crate::cli::{ReportFormat, RequirementsArgs};
use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

pub fn execute(args: RequirementsArgs, output: OutputManager) -> CliResult<()> {
    let tables = RequirementTables::default();

    match args.format {
        ReportFormat::Json => {
            let doc = json!({
                "target": rows(&tables.target),
                "secondary-language": rows(&tables.secondary_language),
            });
            let rendered =
                serde_json::to_string_pretty(&doc).map_err(|e| CliError::ConfigError {
                    message: format!("failed to serialise tables: {e}"),
                    source: Some(Box::new(e)),
                })?;
            println!("{rendered}");
        }
        ReportFormat::Text => {
            output.header("Primary toolchain target level")?;
            print_table(&output, &tables.target)?;
            output.print("")?;
            output.header("Secondary toolchain language level")?;
            print_table(&output, &tables.secondary_language)?;
        }
    }

    Ok(())
}

fn print_table(output: &OutputManager, table: &RequirementTable) -> CliResult<()> {
    for (threshold, requirement) in table.entries() {
        // Version's Display ignores width flags; pad the rendered string.
        output.print(&format!(
            "  build >= {:<8} requires {}",
            threshold.to_string(),
            requirement
        ))?;
    }
    Ok(())
}

fn rows(table: &RequirementTable) -> Vec<serde_json::Value> {
    table
        .entries()
        .iter()
        .map(|(threshold, requirement)| {
            json!({
                "since-build": threshold.to_string(),
                "requires": requirement.to_string(),
            })
        })
        .collect()
}
