//! The documented column contract for the merged collision dataset.
//!
//! Headers are case-sensitive upper-snake-case, exactly as written by the
//! upstream merge. `COLLISION_ID` and `CRASH_DATE` plus at least one
//! location column are required; every other documented column is optional
//! and treated as absent data when missing.

use collision_map_models::SchemaCheck;

use crate::IngestError;

pub const COLLISION_ID: &str = "COLLISION_ID";

pub const CRASH_DATE: &str = "CRASH_DATE";
pub const CRASH_TIME: &str = "CRASH_TIME";
pub const CRASH_DATETIME: &str = "CRASH_DATETIME";
pub const CRASH_YEAR: &str = "CRASH_YEAR";
pub const CRASH_MONTH: &str = "CRASH_MONTH";
pub const CRASH_DAY: &str = "CRASH_DAY";
pub const CRASH_WEEKDAY: &str = "CRASH_WEEKDAY";
pub const CRASH_HOUR: &str = "CRASH_HOUR";
pub const IS_WEEKEND: &str = "IS_WEEKEND";

pub const BOROUGH: &str = "BOROUGH";
pub const ZIP_CODE: &str = "ZIP_CODE";
pub const LATITUDE: &str = "LATITUDE";
pub const LONGITUDE: &str = "LONGITUDE";
pub const ON_STREET_NAME: &str = "ON_STREET_NAME";
pub const CROSS_STREET_NAME: &str = "CROSS_STREET_NAME";
pub const OFF_STREET_NAME: &str = "OFF_STREET_NAME";

pub const NUMBER_OF_PERSONS_INJURED: &str = "NUMBER_OF_PERSONS_INJURED";
pub const NUMBER_OF_PERSONS_KILLED: &str = "NUMBER_OF_PERSONS_KILLED";
pub const NUMBER_OF_PEDESTRIANS_INJURED: &str = "NUMBER_OF_PEDESTRIANS_INJURED";
pub const NUMBER_OF_PEDESTRIANS_KILLED: &str = "NUMBER_OF_PEDESTRIANS_KILLED";
pub const NUMBER_OF_CYCLIST_INJURED: &str = "NUMBER_OF_CYCLIST_INJURED";
pub const NUMBER_OF_CYCLIST_KILLED: &str = "NUMBER_OF_CYCLIST_KILLED";
pub const NUMBER_OF_MOTORIST_INJURED: &str = "NUMBER_OF_MOTORIST_INJURED";
pub const NUMBER_OF_MOTORIST_KILLED: &str = "NUMBER_OF_MOTORIST_KILLED";
pub const TOTAL_INJURED: &str = "TOTAL_INJURED";
pub const TOTAL_KILLED: &str = "TOTAL_KILLED";

pub const CONTRIBUTING_FACTOR_VEHICLE_1: &str = "CONTRIBUTING_FACTOR_VEHICLE_1";
pub const CONTRIBUTING_FACTOR_VEHICLE_2: &str = "CONTRIBUTING_FACTOR_VEHICLE_2";
pub const VEHICLE_TYPE_CODE_1: &str = "VEHICLE_TYPE_CODE_1";
pub const VEHICLE_TYPE_CODE_2: &str = "VEHICLE_TYPE_CODE_2";

pub const TOTAL_PERSONS: &str = "TOTAL_PERSONS";
pub const AVG_PERSON_AGE: &str = "AVG_PERSON_AGE";
pub const FEMALE_PERSONS: &str = "FEMALE_PERSONS";
pub const MALE_PERSONS: &str = "MALE_PERSONS";
pub const UNKNOWN_SEX: &str = "UNKNOWN_SEX";

/// Every documented column, in the order the clean-CSV writer emits them.
pub const DOCUMENTED: &[&str] = &[
    CRASH_DATE,
    CRASH_TIME,
    BOROUGH,
    ZIP_CODE,
    LATITUDE,
    LONGITUDE,
    ON_STREET_NAME,
    CROSS_STREET_NAME,
    OFF_STREET_NAME,
    NUMBER_OF_PERSONS_INJURED,
    NUMBER_OF_PERSONS_KILLED,
    NUMBER_OF_PEDESTRIANS_INJURED,
    NUMBER_OF_PEDESTRIANS_KILLED,
    NUMBER_OF_CYCLIST_INJURED,
    NUMBER_OF_CYCLIST_KILLED,
    NUMBER_OF_MOTORIST_INJURED,
    NUMBER_OF_MOTORIST_KILLED,
    CONTRIBUTING_FACTOR_VEHICLE_1,
    CONTRIBUTING_FACTOR_VEHICLE_2,
    COLLISION_ID,
    VEHICLE_TYPE_CODE_1,
    VEHICLE_TYPE_CODE_2,
    CRASH_DATETIME,
    CRASH_HOUR,
    CRASH_DAY,
    CRASH_WEEKDAY,
    CRASH_MONTH,
    CRASH_YEAR,
    IS_WEEKEND,
    TOTAL_PERSONS,
    TOTAL_INJURED,
    TOTAL_KILLED,
    AVG_PERSON_AGE,
    FEMALE_PERSONS,
    MALE_PERSONS,
    UNKNOWN_SEX,
];

/// Columns that must be present for ingestion to proceed at all.
pub const REQUIRED: &[&str] = &[COLLISION_ID, CRASH_DATE];

/// At least one of these must be present for a row to be locatable.
pub const LOCATION: &[&str] = &[
    BOROUGH,
    ZIP_CODE,
    LATITUDE,
    LONGITUDE,
    ON_STREET_NAME,
    CROSS_STREET_NAME,
    OFF_STREET_NAME,
];

/// Checks the header row against the documented column contract.
///
/// # Errors
///
/// Returns [`IngestError::MissingColumn`] if `COLLISION_ID` or `CRASH_DATE`
/// is absent, or [`IngestError::NoLocationColumn`] if the input provides
/// no location column at all.
pub fn check_header(headers: &csv::StringRecord) -> Result<SchemaCheck, IngestError> {
    let has = |column: &str| headers.iter().any(|h| h == column);

    for &column in REQUIRED {
        if !has(column) {
            return Err(IngestError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    if !LOCATION.iter().any(|&c| has(c)) {
        return Err(IngestError::NoLocationColumn);
    }

    let (present, missing): (Vec<_>, Vec<_>) = DOCUMENTED
        .iter()
        .map(|&c| c.to_string())
        .partition(|c| has(c));

    Ok(SchemaCheck { present, missing })
}
