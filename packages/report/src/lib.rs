#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Rendering of pipeline results for humans and downstream consumers.
//!
//! Two artifacts leave this crate: a JSON report document (diagnostics,
//! schema check, and dataset summary, for triage) and a clean CSV re-emitted
//! with the documented headers (for the visualization layer).

pub mod summary;

use std::fs::File;
use std::io::Write;
use std::path::Path;

use collision_map_ingest::schema;
use collision_map_models::{CollisionRecord, SchemaCheck, ValidationReport};
use serde::{Deserialize, Serialize};

pub use summary::DatasetSummary;

/// Errors that can occur while writing report artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// I/O error (file write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The full JSON report document handed to a human for triage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    /// Which documented columns the input provided.
    pub schema: SchemaCheck,
    /// Per-row diagnostics and dataset totals.
    pub report: ValidationReport,
    /// Aggregate breakdowns of the output records.
    pub summary: DatasetSummary,
}

/// Serializes the report document as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`ReportError`] if serialization or the underlying write fails.
pub fn write_json<W: Write>(document: &ReportDocument, writer: W) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(writer, document)?;
    Ok(())
}

/// Writes the report document to a JSON file.
///
/// # Errors
///
/// Returns [`ReportError`] if the file cannot be created or written.
pub fn write_json_file(document: &ReportDocument, path: &Path) -> Result<(), ReportError> {
    log::info!("Writing report to {}", path.display());
    write_json(document, File::create(path)?)
}

/// Writes records as CSV with the documented headers, in the documented
/// column order. Missing values are emitted as empty cells, matching the
/// source format.
///
/// # Errors
///
/// Returns [`ReportError`] if serialization or the underlying write fails.
pub fn write_clean_csv<W: Write>(
    records: &[CollisionRecord],
    writer: W,
) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(schema::DOCUMENTED)?;

    for record in records {
        csv_writer.write_record(record_fields(record))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the clean CSV to a file.
///
/// # Errors
///
/// Returns [`ReportError`] if the file cannot be created or written.
pub fn write_clean_csv_file(records: &[CollisionRecord], path: &Path) -> Result<(), ReportError> {
    log::info!("Writing {} records to {}", records.len(), path.display());
    write_clean_csv(records, File::create(path)?)
}

/// One record's cells, in [`schema::DOCUMENTED`] order.
fn record_fields(record: &CollisionRecord) -> Vec<String> {
    fn opt<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    fn text(value: Option<&String>) -> String {
        value.cloned().unwrap_or_default()
    }

    vec![
        opt(record.crash_date.map(|d| d.format("%Y-%m-%d"))),
        opt(record.crash_time.map(|t| t.format("%H:%M:%S"))),
        opt(record.borough),
        text(record.zip_code.as_ref()),
        opt(record.latitude),
        opt(record.longitude),
        text(record.on_street_name.as_ref()),
        text(record.cross_street_name.as_ref()),
        text(record.off_street_name.as_ref()),
        record.persons_injured.to_string(),
        record.persons_killed.to_string(),
        record.pedestrians_injured.to_string(),
        record.pedestrians_killed.to_string(),
        record.cyclists_injured.to_string(),
        record.cyclists_killed.to_string(),
        record.motorists_injured.to_string(),
        record.motorists_killed.to_string(),
        text(record.contributing_factor_vehicle_1.as_ref()),
        text(record.contributing_factor_vehicle_2.as_ref()),
        opt(record.collision_id),
        text(record.vehicle_type_code_1.as_ref()),
        text(record.vehicle_type_code_2.as_ref()),
        opt(record.crash_datetime.map(|dt| dt.format("%Y-%m-%d %H:%M:%S"))),
        opt(record.crash_hour),
        opt(record.crash_day),
        opt(record.crash_weekday.map(summary::weekday_name)),
        opt(record.crash_month),
        opt(record.crash_year),
        opt(record.is_weekend.map(|w| if w { "True" } else { "False" })),
        opt(record.total_persons),
        record.total_injured.to_string(),
        record.total_killed.to_string(),
        opt(record.avg_person_age),
        opt(record.female_persons),
        opt(record.male_persons),
        opt(record.unknown_sex),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use collision_map_ingest::loader::load_from_reader;
    use collision_map_ingest::normalize::normalize;
    use collision_map_models::{InvalidRowPolicy, ReportTotals};

    fn sample_records() -> Vec<CollisionRecord> {
        let data = "COLLISION_ID,CRASH_DATE,CRASH_TIME,BOROUGH,LATITUDE,LONGITUDE,NUMBER_OF_PERSONS_INJURED\n\
                    12345,2022-01-15,14:30,BROOKLYN,40.6942,-73.9902,2\n\
                    12346,2022-02-01,08:00,QUEENS,40.7654,-73.8318,0\n";
        let table = load_from_reader(data.as_bytes()).unwrap();
        normalize(&table)
            .rows
            .into_iter()
            .map(|row| row.record)
            .collect()
    }

    #[test]
    fn clean_csv_round_trips_through_the_loader() {
        let records = sample_records();
        let mut buffer = Vec::new();
        write_clean_csv(&records, &mut buffer).unwrap();

        let reloaded = load_from_reader(buffer.as_slice()).unwrap();
        let reparsed: Vec<CollisionRecord> = normalize(&reloaded)
            .rows
            .into_iter()
            .map(|row| row.record)
            .collect();
        assert_eq!(reparsed, records);
    }

    #[test]
    fn clean_csv_emits_all_documented_headers() {
        let mut buffer = Vec::new();
        write_clean_csv(&sample_records(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header.split(',').count(), schema::DOCUMENTED.len());
        assert!(header.starts_with("CRASH_DATE,CRASH_TIME,BOROUGH"));
    }

    #[test]
    fn report_document_serializes_to_json() {
        let records = sample_records();
        let document = ReportDocument {
            schema: SchemaCheck {
                present: vec!["COLLISION_ID".to_string()],
                missing: vec!["CRASH_HOUR".to_string()],
            },
            report: ValidationReport {
                totals: ReportTotals {
                    rows_read: 2,
                    clean_rows: 2,
                    ..ReportTotals::default()
                },
                policy: InvalidRowPolicy::Flag,
                flagged: vec![],
            },
            summary: DatasetSummary::from_records(&records),
        };

        let mut buffer = Vec::new();
        write_json(&document, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["report"]["totals"]["rowsRead"], 2);
        assert_eq!(value["summary"]["byBorough"]["BROOKLYN"], 1);
    }
}
