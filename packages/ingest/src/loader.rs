//! CSV loader for the merged collision dataset.
//!
//! Reads delimited tabular text with a header row and deserializes each
//! record into a [`RawRow`] of optional strings. No coercion happens here;
//! every cell survives as-is so the normalizer can account for what it
//! throws away.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use collision_map_models::SchemaCheck;
use serde::Deserialize;

use crate::schema;
use crate::IngestError;

/// One source row, untyped. Columns absent from the input and empty cells
/// both deserialize to `None`; sentinel strings like `"nan"` survive here
/// and are cleaned up during normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRow {
    #[serde(rename = "COLLISION_ID", default)]
    pub collision_id: Option<String>,
    #[serde(rename = "CRASH_DATE", default)]
    pub crash_date: Option<String>,
    #[serde(rename = "CRASH_TIME", default)]
    pub crash_time: Option<String>,
    #[serde(rename = "CRASH_DATETIME", default)]
    pub crash_datetime: Option<String>,
    #[serde(rename = "CRASH_YEAR", default)]
    pub crash_year: Option<String>,
    #[serde(rename = "CRASH_MONTH", default)]
    pub crash_month: Option<String>,
    #[serde(rename = "CRASH_DAY", default)]
    pub crash_day: Option<String>,
    #[serde(rename = "CRASH_WEEKDAY", default)]
    pub crash_weekday: Option<String>,
    #[serde(rename = "CRASH_HOUR", default)]
    pub crash_hour: Option<String>,
    #[serde(rename = "IS_WEEKEND", default)]
    pub is_weekend: Option<String>,
    #[serde(rename = "BOROUGH", default)]
    pub borough: Option<String>,
    #[serde(rename = "ZIP_CODE", default)]
    pub zip_code: Option<String>,
    #[serde(rename = "LATITUDE", default)]
    pub latitude: Option<String>,
    #[serde(rename = "LONGITUDE", default)]
    pub longitude: Option<String>,
    #[serde(rename = "ON_STREET_NAME", default)]
    pub on_street_name: Option<String>,
    #[serde(rename = "CROSS_STREET_NAME", default)]
    pub cross_street_name: Option<String>,
    #[serde(rename = "OFF_STREET_NAME", default)]
    pub off_street_name: Option<String>,
    #[serde(rename = "NUMBER_OF_PERSONS_INJURED", default)]
    pub persons_injured: Option<String>,
    #[serde(rename = "NUMBER_OF_PERSONS_KILLED", default)]
    pub persons_killed: Option<String>,
    #[serde(rename = "NUMBER_OF_PEDESTRIANS_INJURED", default)]
    pub pedestrians_injured: Option<String>,
    #[serde(rename = "NUMBER_OF_PEDESTRIANS_KILLED", default)]
    pub pedestrians_killed: Option<String>,
    #[serde(rename = "NUMBER_OF_CYCLIST_INJURED", default)]
    pub cyclists_injured: Option<String>,
    #[serde(rename = "NUMBER_OF_CYCLIST_KILLED", default)]
    pub cyclists_killed: Option<String>,
    #[serde(rename = "NUMBER_OF_MOTORIST_INJURED", default)]
    pub motorists_injured: Option<String>,
    #[serde(rename = "NUMBER_OF_MOTORIST_KILLED", default)]
    pub motorists_killed: Option<String>,
    #[serde(rename = "TOTAL_INJURED", default)]
    pub total_injured: Option<String>,
    #[serde(rename = "TOTAL_KILLED", default)]
    pub total_killed: Option<String>,
    #[serde(rename = "CONTRIBUTING_FACTOR_VEHICLE_1", default)]
    pub contributing_factor_vehicle_1: Option<String>,
    #[serde(rename = "CONTRIBUTING_FACTOR_VEHICLE_2", default)]
    pub contributing_factor_vehicle_2: Option<String>,
    #[serde(rename = "VEHICLE_TYPE_CODE_1", default)]
    pub vehicle_type_code_1: Option<String>,
    #[serde(rename = "VEHICLE_TYPE_CODE_2", default)]
    pub vehicle_type_code_2: Option<String>,
    #[serde(rename = "TOTAL_PERSONS", default)]
    pub total_persons: Option<String>,
    #[serde(rename = "AVG_PERSON_AGE", default)]
    pub avg_person_age: Option<String>,
    #[serde(rename = "FEMALE_PERSONS", default)]
    pub female_persons: Option<String>,
    #[serde(rename = "MALE_PERSONS", default)]
    pub male_persons: Option<String>,
    #[serde(rename = "UNKNOWN_SEX", default)]
    pub unknown_sex: Option<String>,
}

/// The raw in-memory table: untyped rows plus the schema check result.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Which documented columns the header provided.
    pub schema: SchemaCheck,
    /// Source rows in file order.
    pub rows: Vec<RawRow>,
}

/// Loads the CSV file at `path`.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be opened, the header fails
/// the schema check, or a record is structurally malformed.
pub fn load(path: &Path) -> Result<RawTable, IngestError> {
    log::info!("Loading {}", path.display());
    load_from_reader(File::open(path)?)
}

/// Loads CSV data from any reader. Exposed for tests and in-memory use.
///
/// # Errors
///
/// Returns [`IngestError`] if the header fails the schema check or a
/// record is structurally malformed.
pub fn load_from_reader<R: Read>(reader: R) -> Result<RawTable, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let schema = schema::check_header(csv_reader.headers()?)?;

    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        let row: RawRow = result?;
        rows.push(row);
    }

    Ok(RawTable { schema, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_rows_with_subset_of_columns() {
        let data = "COLLISION_ID,CRASH_DATE,BOROUGH\n1,2022-01-15,BROOKLYN\n2,2022-01-16,\n";
        let table = load_from_reader(data.as_bytes()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].collision_id.as_deref(), Some("1"));
        assert_eq!(table.rows[0].borough.as_deref(), Some("BROOKLYN"));
        // The csv crate maps empty cells to None for Option fields.
        assert_eq!(table.rows[1].borough, None);
        assert!(table.rows[0].latitude.is_none());
        assert!(table.schema.has("BOROUGH"));
        assert!(!table.schema.has("LATITUDE"));
    }

    #[test]
    fn rejects_input_without_required_columns() {
        let data = "CRASH_DATE,BOROUGH\n2022-01-15,QUEENS\n";
        assert!(matches!(
            load_from_reader(data.as_bytes()),
            Err(IngestError::MissingColumn { .. })
        ));
    }
}
