#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the collision dataset validator.

mod progress;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use collision_map_ingest::config::ValidatorConfig;
use collision_map_ingest::{run_pipeline, PipelineOutput};
use collision_map_models::InvalidRowPolicy;
use collision_map_report::{DatasetSummary, ReportDocument};

#[derive(Parser)]
#[command(name = "collision_map", about = "Collision dataset validation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a dataset and print a triage summary
    Check {
        /// Path to the merged collision CSV
        input: PathBuf,
        /// Path to a validator config TOML
        #[arg(long)]
        config: Option<PathBuf>,
        /// Invalid-row policy (overrides config)
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
    },
    /// Validate a dataset and write the clean CSV plus the JSON report
    Clean {
        /// Path to the merged collision CSV
        input: PathBuf,
        /// Where to write the clean CSV
        #[arg(long)]
        output: PathBuf,
        /// Where to write the JSON report (skipped when not set)
        #[arg(long)]
        report: Option<PathBuf>,
        /// Path to a validator config TOML
        #[arg(long)]
        config: Option<PathBuf>,
        /// Invalid-row policy (overrides config)
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
    },
    /// List which documented columns an input file provides
    Columns {
        /// Path to the merged collision CSV
        input: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Flag,
    Drop,
    Fail,
}

impl From<PolicyArg> for InvalidRowPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Flag => Self::Flag,
            PolicyArg::Drop => Self::Drop,
            PolicyArg::Fail => Self::Fail,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = progress::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            input,
            config,
            policy,
        } => {
            let validator_config = resolve_config(config.as_deref(), policy)?;
            let bar = progress::IndicatifProgress::rows_bar(&multi, "Validating rows");
            let output = run_pipeline(&input, &validator_config, Some(bar))?;
            print_triage(&output);
        }
        Commands::Clean {
            input,
            output,
            report,
            config,
            policy,
        } => {
            let validator_config = resolve_config(config.as_deref(), policy)?;
            let bar = progress::IndicatifProgress::rows_bar(&multi, "Validating rows");
            let result = run_pipeline(&input, &validator_config, Some(bar))?;

            collision_map_report::write_clean_csv_file(&result.records, &output)?;
            log::info!("Wrote {} records to {}", result.records.len(), output.display());

            if let Some(report_path) = report {
                let document = ReportDocument {
                    summary: DatasetSummary::from_records(&result.records),
                    schema: result.schema,
                    report: result.report,
                };
                collision_map_report::write_json_file(&document, &report_path)?;
            }
        }
        Commands::Columns { input } => {
            let table = collision_map_ingest::loader::load(&input)?;
            println!("{:<32} STATUS", "COLUMN");
            println!("{}", "-".repeat(42));
            for column in &table.schema.present {
                println!("{column:<32} present");
            }
            for column in &table.schema.missing {
                println!("{column:<32} missing");
            }
        }
    }

    Ok(())
}

/// Loads the config file (or defaults) and applies the `--policy` override.
fn resolve_config(
    config_path: Option<&Path>,
    policy: Option<PolicyArg>,
) -> Result<ValidatorConfig, Box<dyn std::error::Error>> {
    let mut config = ValidatorConfig::load(config_path)?;
    if let Some(policy) = policy {
        config.policy = policy.into();
    }
    Ok(config)
}

/// Prints the per-tag violation breakdown for triage.
fn print_triage(output: &PipelineOutput) {
    let totals = &output.report.totals;
    println!(
        "{} rows read: {} clean, {} flagged, {} dropped",
        totals.rows_read, totals.clean_rows, totals.flagged_rows, totals.dropped_rows
    );

    if output.report.flagged.is_empty() {
        return;
    }

    let mut by_tag: BTreeMap<String, u64> = BTreeMap::new();
    for diag in &output.report.flagged {
        for violation in &diag.violations {
            *by_tag.entry(violation.to_string()).or_insert(0) += 1;
        }
    }

    println!();
    println!("{:<24} ROWS", "VIOLATION");
    println!("{}", "-".repeat(30));
    for (tag, count) in &by_tag {
        println!("{tag:<24} {count}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn policy_arg_maps_onto_the_domain_policy() {
        assert_eq!(InvalidRowPolicy::from(PolicyArg::Flag), InvalidRowPolicy::Flag);
        assert_eq!(InvalidRowPolicy::from(PolicyArg::Drop), InvalidRowPolicy::Drop);
        assert_eq!(InvalidRowPolicy::from(PolicyArg::Fail), InvalidRowPolicy::Fail);
    }
}
