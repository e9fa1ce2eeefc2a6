#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loading, normalization, and validation for the merged collision dataset.
//!
//! The spine of the crate is [`run_pipeline`]: read a raw CSV keyed by the
//! documented column names, coerce every row into a strongly-typed
//! [`CollisionRecord`](collision_map_models::CollisionRecord), check the
//! schema invariants, and apply the configured invalid-row policy. All
//! loosely-typed cell handling lives here at the ingestion boundary;
//! downstream code never sees untyped rows.

pub mod config;
pub mod loader;
pub mod normalize;
pub mod progress;
pub mod schema;
pub mod validate;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use collision_map_models::{
    CollisionRecord, InvalidRowPolicy, ReportTotals, SchemaCheck, ValidationReport,
};

use crate::config::ValidatorConfig;
use crate::progress::ProgressCallback;

/// Errors that can occur during dataset ingestion.
///
/// Only schema, I/O, and CSV-structure problems (and the `Fail` policy)
/// terminate a run; per-row conditions are captured in the diagnostic
/// report instead.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV structure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is entirely absent from the input header.
    #[error("required column missing from input: {column}")]
    MissingColumn {
        /// The documented column name that was not found.
        column: String,
    },

    /// The input provides none of the documented location columns.
    #[error("input provides none of the documented location columns")]
    NoLocationColumn,

    /// Validator config file could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// A row failed validation under [`InvalidRowPolicy::Fail`].
    #[error("row {row} failed validation: {tags}")]
    InvalidRow {
        /// 1-based data row number.
        row: usize,
        /// Comma-joined violation tags for the row.
        tags: String,
    },
}

/// Everything a pipeline run hands to the downstream reporting layer.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Normalized records, filtered per the invalid-row policy.
    pub records: Vec<CollisionRecord>,
    /// Per-row diagnostics plus dataset totals.
    pub report: ValidationReport,
    /// Which documented columns the input provided.
    pub schema: SchemaCheck,
}

/// Loads, normalizes, and validates the dataset at `path`, applying the
/// configured invalid-row policy.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read, a required column
/// is missing, or a row fails validation under [`InvalidRowPolicy::Fail`].
pub fn run_pipeline(
    path: &Path,
    validator_config: &ValidatorConfig,
    progress: Option<Arc<dyn ProgressCallback>>,
) -> Result<PipelineOutput, IngestError> {
    let table = loader::load(path)?;
    process(&table, validator_config, progress)
}

/// Normalizes, validates, and policy-filters an already-loaded table.
///
/// # Errors
///
/// Returns [`IngestError::InvalidRow`] if a row fails validation under
/// [`InvalidRowPolicy::Fail`].
pub fn process(
    table: &loader::RawTable,
    validator_config: &ValidatorConfig,
    progress: Option<Arc<dyn ProgressCallback>>,
) -> Result<PipelineOutput, IngestError> {
    let start = Instant::now();
    let progress = progress.unwrap_or_else(progress::null_progress);

    let rows_read = table.rows.len() as u64;
    log::info!(
        "Loaded {rows_read} rows ({} documented columns present, {} absent)",
        table.schema.present.len(),
        table.schema.missing.len()
    );
    progress.set_total(rows_read);

    let normalized = normalize::normalize(table);
    let diagnostics = validate::validate(&normalized, validator_config, Some(&*progress));

    let mut records = Vec::with_capacity(normalized.rows.len());
    let mut totals = ReportTotals {
        rows_read,
        ..ReportTotals::default()
    };
    let mut flagged = Vec::new();

    for (row, diag) in normalized.rows.iter().zip(&diagnostics) {
        totals.coercion_issues += diag.coercion_issues.len() as u64;

        if diag.is_clean() {
            totals.clean_rows += 1;
            records.push(row.record.clone());
            // Coercion-only rows stay in the output but are still itemized.
            if !diag.coercion_issues.is_empty() {
                flagged.push(diag.clone());
            }
            continue;
        }

        totals.flagged_rows += 1;
        match validator_config.policy {
            InvalidRowPolicy::Flag => records.push(row.record.clone()),
            InvalidRowPolicy::Drop => totals.dropped_rows += 1,
            InvalidRowPolicy::Fail => {
                let tags = diag
                    .violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(IngestError::InvalidRow { row: diag.row, tags });
            }
        }
        flagged.push(diag.clone());
    }

    progress.finish(format!(
        "{} rows validated, {} flagged",
        totals.rows_read, totals.flagged_rows
    ));
    log::info!(
        "Validation complete: {} clean, {} flagged, {} dropped ({} coercion issues), took {:.1}s",
        totals.clean_rows,
        totals.flagged_rows,
        totals.dropped_rows,
        totals.coercion_issues,
        start.elapsed().as_secs_f64()
    );

    Ok(PipelineOutput {
        records,
        report: ValidationReport {
            totals,
            policy: validator_config.policy,
            flagged,
        },
        schema: normalized.schema,
    })
}
