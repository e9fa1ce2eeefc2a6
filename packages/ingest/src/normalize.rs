//! Row normalization: type coercion and derived-field computation.
//!
//! A pure, functional transform from [`RawTable`] to [`NormalizedTable`].
//! Every fallible coercion is recorded as a [`CoercionIssue`] instead of
//! erroring, so a single bad cell never loses a row. Derived temporal and
//! casualty fields are computed only when the source column is absent;
//! stated values are kept as-is and reconciled later by validation.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use collision_map_models::{is_weekend_day, Borough, CoercionIssue, CollisionRecord, SchemaCheck};

use crate::loader::{RawRow, RawTable};
use crate::schema;

/// `CRASH_YEAR` values outside this window are treated as unparseable and
/// recomputed from `CRASH_DATE`.
pub const YEAR_SANITY_MIN: i32 = 1900;
pub const YEAR_SANITY_MAX: i32 = 2100;

/// A normalized row: the typed record plus everything validation needs to
/// reconcile stated values against derived ones.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    /// The strongly-typed record.
    pub record: CollisionRecord,
    /// Cells that failed coercion and were treated as missing.
    pub issues: Vec<CoercionIssue>,
    /// Count columns that held a negative value (coerced to zero).
    pub negative_columns: Vec<String>,
    /// `TOTAL_INJURED` as stated by the source, before reconciliation.
    pub declared_total_injured: Option<i64>,
    /// `TOTAL_KILLED` as stated by the source.
    pub declared_total_killed: Option<i64>,
    /// `CRASH_YEAR` as stated by the source.
    pub declared_year: Option<i32>,
    /// `CRASH_WEEKDAY` as stated by the source.
    pub declared_weekday: Option<Weekday>,
    /// `IS_WEEKEND` as stated by the source.
    pub declared_is_weekend: Option<bool>,
}

/// The normalized table handed to validation.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    /// Carried through from the loader.
    pub schema: SchemaCheck,
    /// Normalized rows in file order.
    pub rows: Vec<NormalizedRow>,
}

/// Normalizes every row of the raw table. The input is not mutated;
/// running the transform on already-normalized data changes nothing.
#[must_use]
pub fn normalize(table: &RawTable) -> NormalizedTable {
    let rows = table.rows.iter().map(normalize_row).collect();
    NormalizedTable {
        schema: table.schema.clone(),
        rows,
    }
}

/// Accumulates coercion fallout while cells are converted one by one.
struct Coercer {
    issues: Vec<CoercionIssue>,
    negative_columns: Vec<String>,
}

impl Coercer {
    const fn new() -> Self {
        Self {
            issues: Vec::new(),
            negative_columns: Vec::new(),
        }
    }

    fn issue(&mut self, column: &str, value: &str) {
        self.issues.push(CoercionIssue {
            column: column.to_string(),
            value: value.to_string(),
        });
    }

    /// Integer coercion. Accepts plain integers and float spellings with a
    /// zero fraction (pandas writes count columns as `2.0`).
    fn integer(&mut self, column: &str, cell: Option<&String>) -> Option<i64> {
        let text = non_empty(cell)?;
        match parse_integer(text) {
            Some(value) => Some(value),
            None => {
                self.issue(column, text);
                None
            }
        }
    }

    /// Count coercion: non-negative integer, absent or unparseable is zero,
    /// negative values are coerced to zero and remembered for validation.
    /// Values past `u32` range are treated like unparseable cells.
    fn count(&mut self, column: &str, cell: Option<&String>) -> u32 {
        match self.integer(column, cell) {
            Some(value) if value < 0 => {
                self.negative_columns.push(column.to_string());
                0
            }
            Some(value) => match u32::try_from(value) {
                Ok(v) => v,
                Err(_) => {
                    self.issue(column, &value.to_string());
                    0
                }
            },
            None => 0,
        }
    }

    /// Optional count for columns where absent means "not merged", not zero.
    fn count_opt(&mut self, column: &str, cell: Option<&String>) -> Option<u32> {
        match self.integer(column, cell)? {
            value if value < 0 => {
                self.negative_columns.push(column.to_string());
                Some(0)
            }
            value => match u32::try_from(value) {
                Ok(v) => Some(v),
                Err(_) => {
                    self.issue(column, &value.to_string());
                    Some(0)
                }
            },
        }
    }

    /// Reconciles a declared total against the sum of its sub-counts.
    /// Stated totals win when present (mismatches get flagged, not fixed);
    /// negative declarations are left to validation, and values past `u32`
    /// range are a coercion issue falling back to the computed sum.
    fn declared_total(&mut self, column: &str, declared: Option<i64>, computed: u32) -> u32 {
        match declared {
            Some(value) if value < 0 => computed,
            Some(value) => match u32::try_from(value) {
                Ok(v) => v,
                Err(_) => {
                    self.issue(column, &value.to_string());
                    computed
                }
            },
            None => computed,
        }
    }

    /// Small non-negative integer kept even when out of its documented
    /// range, so validation can flag it instead of losing it.
    fn small_int(&mut self, column: &str, cell: Option<&String>) -> Option<u32> {
        let value = self.integer(column, cell)?;
        match u32::try_from(value) {
            Ok(v) => Some(v),
            Err(_) => {
                self.issue(column, &value.to_string());
                None
            }
        }
    }

    fn float(&mut self, column: &str, cell: Option<&String>) -> Option<f64> {
        let text = non_empty(cell)?;
        match text.parse::<f64>() {
            Ok(value) => Some(value),
            Err(_) => {
                self.issue(column, text);
                None
            }
        }
    }
}

#[allow(clippy::too_many_lines)]
fn normalize_row(raw: &RawRow) -> NormalizedRow {
    let mut coercer = Coercer::new();

    let collision_id = coercer.integer(schema::COLLISION_ID, raw.collision_id.as_ref());

    // ── Temporal ─────────────────────────────────────────────────────
    let stated_datetime = non_empty(raw.crash_datetime.as_ref()).and_then(|text| {
        let parsed = parse_datetime(text);
        if parsed.is_none() {
            coercer.issue(schema::CRASH_DATETIME, text);
        }
        parsed
    });

    let crash_date = non_empty(raw.crash_date.as_ref())
        .and_then(|text| {
            let parsed = parse_date(text);
            if parsed.is_none() {
                coercer.issue(schema::CRASH_DATE, text);
            }
            parsed
        })
        .or_else(|| stated_datetime.map(|dt| dt.date()));

    let crash_time = non_empty(raw.crash_time.as_ref())
        .and_then(|text| {
            let parsed = parse_time(text);
            if parsed.is_none() {
                coercer.issue(schema::CRASH_TIME, text);
            }
            parsed
        })
        .or_else(|| stated_datetime.map(|dt| dt.time()));

    let crash_datetime = stated_datetime.or_else(|| match (crash_date, crash_time) {
        (Some(date), Some(time)) => Some(NaiveDateTime::new(date, time)),
        _ => None,
    });

    let declared_year = coercer
        .integer(schema::CRASH_YEAR, raw.crash_year.as_ref())
        .and_then(|value| {
            let year = i32::try_from(value).ok()?;
            if (YEAR_SANITY_MIN..=YEAR_SANITY_MAX).contains(&year) {
                Some(year)
            } else {
                coercer.issue(schema::CRASH_YEAR, &year.to_string());
                None
            }
        });

    let declared_weekday = non_empty(raw.crash_weekday.as_ref()).and_then(|text| {
        let parsed = text.parse::<Weekday>().ok();
        if parsed.is_none() {
            coercer.issue(schema::CRASH_WEEKDAY, text);
        }
        parsed
    });

    let declared_is_weekend = non_empty(raw.is_weekend.as_ref()).and_then(|text| {
        let parsed = parse_bool(text);
        if parsed.is_none() {
            coercer.issue(schema::IS_WEEKEND, text);
        }
        parsed
    });

    let crash_year = declared_year.or_else(|| crash_date.map(|d| d.year()));
    let crash_month = coercer
        .small_int(schema::CRASH_MONTH, raw.crash_month.as_ref())
        .or_else(|| crash_date.map(|d| d.month()));
    let crash_day = coercer
        .small_int(schema::CRASH_DAY, raw.crash_day.as_ref())
        .or_else(|| crash_date.map(|d| d.day()));
    let crash_weekday = declared_weekday.or_else(|| crash_date.map(|d| d.weekday()));
    let is_weekend = declared_is_weekend.or_else(|| crash_weekday.map(is_weekend_day));
    let crash_hour = coercer
        .small_int(schema::CRASH_HOUR, raw.crash_hour.as_ref())
        .or_else(|| crash_time.map(|t| t.hour()));

    // ── Location ─────────────────────────────────────────────────────
    let borough = clean_text(raw.borough.as_ref()).and_then(|text| {
        let parsed = Borough::from_raw(&text);
        if parsed.is_none() {
            coercer.issue(schema::BOROUGH, &text);
        }
        parsed
    });

    // Zero coordinates are a placeholder for "unknown" in the source data.
    let latitude = coercer
        .float(schema::LATITUDE, raw.latitude.as_ref())
        .filter(|&v| v != 0.0);
    let longitude = coercer
        .float(schema::LONGITUDE, raw.longitude.as_ref())
        .filter(|&v| v != 0.0);

    // ── Casualty counts ──────────────────────────────────────────────
    let persons_injured = coercer.count(schema::NUMBER_OF_PERSONS_INJURED, raw.persons_injured.as_ref());
    let persons_killed = coercer.count(schema::NUMBER_OF_PERSONS_KILLED, raw.persons_killed.as_ref());
    let pedestrians_injured = coercer.count(
        schema::NUMBER_OF_PEDESTRIANS_INJURED,
        raw.pedestrians_injured.as_ref(),
    );
    let pedestrians_killed = coercer.count(
        schema::NUMBER_OF_PEDESTRIANS_KILLED,
        raw.pedestrians_killed.as_ref(),
    );
    let cyclists_injured =
        coercer.count(schema::NUMBER_OF_CYCLIST_INJURED, raw.cyclists_injured.as_ref());
    let cyclists_killed =
        coercer.count(schema::NUMBER_OF_CYCLIST_KILLED, raw.cyclists_killed.as_ref());
    let motorists_injured =
        coercer.count(schema::NUMBER_OF_MOTORIST_INJURED, raw.motorists_injured.as_ref());
    let motorists_killed =
        coercer.count(schema::NUMBER_OF_MOTORIST_KILLED, raw.motorists_killed.as_ref());

    let declared_total_injured = coercer.integer(schema::TOTAL_INJURED, raw.total_injured.as_ref());
    let declared_total_killed = coercer.integer(schema::TOTAL_KILLED, raw.total_killed.as_ref());

    let injured_sum = persons_injured
        .saturating_add(pedestrians_injured)
        .saturating_add(cyclists_injured)
        .saturating_add(motorists_injured);
    let killed_sum = persons_killed
        .saturating_add(pedestrians_killed)
        .saturating_add(cyclists_killed)
        .saturating_add(motorists_killed);

    let total_injured =
        coercer.declared_total(schema::TOTAL_INJURED, declared_total_injured, injured_sum);
    let total_killed =
        coercer.declared_total(schema::TOTAL_KILLED, declared_total_killed, killed_sum);

    let record = CollisionRecord {
        collision_id,
        borough,
        zip_code: clean_zip(raw.zip_code.as_ref()),
        latitude,
        longitude,
        on_street_name: clean_text(raw.on_street_name.as_ref()),
        cross_street_name: clean_text(raw.cross_street_name.as_ref()),
        off_street_name: clean_text(raw.off_street_name.as_ref()),
        crash_date,
        crash_time,
        crash_datetime,
        crash_year,
        crash_month,
        crash_day,
        crash_weekday,
        crash_hour,
        is_weekend,
        persons_injured,
        persons_killed,
        pedestrians_injured,
        pedestrians_killed,
        cyclists_injured,
        cyclists_killed,
        motorists_injured,
        motorists_killed,
        total_injured,
        total_killed,
        contributing_factor_vehicle_1: clean_factor(raw.contributing_factor_vehicle_1.as_ref()),
        contributing_factor_vehicle_2: clean_factor(raw.contributing_factor_vehicle_2.as_ref()),
        vehicle_type_code_1: clean_text(raw.vehicle_type_code_1.as_ref()),
        vehicle_type_code_2: clean_text(raw.vehicle_type_code_2.as_ref()),
        total_persons: coercer.count_opt(schema::TOTAL_PERSONS, raw.total_persons.as_ref()),
        avg_person_age: coercer.float(schema::AVG_PERSON_AGE, raw.avg_person_age.as_ref()),
        female_persons: coercer.count_opt(schema::FEMALE_PERSONS, raw.female_persons.as_ref()),
        male_persons: coercer.count_opt(schema::MALE_PERSONS, raw.male_persons.as_ref()),
        unknown_sex: coercer.count_opt(schema::UNKNOWN_SEX, raw.unknown_sex.as_ref()),
    };

    NormalizedRow {
        record,
        issues: coercer.issues,
        negative_columns: coercer.negative_columns,
        declared_total_injured,
        declared_total_killed,
        declared_year,
        declared_weekday,
        declared_is_weekend,
    }
}

/// Returns the trimmed cell text, or `None` for empty cells.
fn non_empty(cell: Option<&String>) -> Option<&str> {
    let text = cell?.trim();
    if text.is_empty() { None } else { Some(text) }
}

/// Trims a free-text cell and maps pandas artifacts (`nan`, `null`,
/// `none`) to missing.
fn clean_text(cell: Option<&String>) -> Option<String> {
    let text = non_empty(cell)?;
    if text.eq_ignore_ascii_case("nan")
        || text.eq_ignore_ascii_case("null")
        || text.eq_ignore_ascii_case("none")
    {
        return None;
    }
    Some(text.to_string())
}

/// Contributing-factor cells additionally treat `Unspecified` as missing.
fn clean_factor(cell: Option<&String>) -> Option<String> {
    clean_text(cell).filter(|text| !text.eq_ignore_ascii_case("unspecified"))
}

/// Postal codes survive a round-trip through pandas as floats
/// (`"11201.0"`); strip the fraction but keep the code as text.
fn clean_zip(cell: Option<&String>) -> Option<String> {
    let text = clean_text(cell)?;
    Some(text.strip_suffix(".0").unwrap_or(&text).to_string())
}

fn parse_integer(text: &str) -> Option<i64> {
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    // Float spelling with a zero fraction, e.g. "2.0".
    let float = text.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 {
        #[allow(clippy::cast_possible_truncation)]
        return Some(float as i64);
    }
    None
}

/// Parses a crash date in ISO or US format.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDate::parse_from_str(text, "%m/%d/%Y").ok()
}

/// Parses a crash time with or without seconds.
#[must_use]
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    if let Ok(time) = NaiveTime::parse_from_str(text, "%H:%M:%S") {
        return Some(time);
    }
    NaiveTime::parse_from_str(text, "%H:%M").ok()
}

/// Parses a combined datetime (space- or T-separated, optional fraction).
#[must_use]
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%m/%d/%Y %H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime);
        }
    }
    None
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") || text == "1" {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") || text == "0" {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_from_reader;

    fn single_row(csv_data: &str) -> NormalizedRow {
        let table = load_from_reader(csv_data.as_bytes()).unwrap();
        let normalized = normalize(&table);
        assert_eq!(normalized.rows.len(), 1);
        normalized.rows.into_iter().next().unwrap()
    }

    #[test]
    fn coerces_counts_and_derives_totals() {
        let row = single_row(
            "COLLISION_ID,CRASH_DATE,BOROUGH,NUMBER_OF_PERSONS_INJURED,NUMBER_OF_CYCLIST_INJURED\n\
             1,2022-01-15,BROOKLYN,2.0,1\n",
        );
        assert_eq!(row.record.persons_injured, 2);
        assert_eq!(row.record.cyclists_injured, 1);
        // Missing count columns normalize to zero.
        assert_eq!(row.record.motorists_injured, 0);
        // Totals absent, so they are the sum of the sub-counts.
        assert_eq!(row.record.total_injured, 3);
        assert_eq!(row.record.total_killed, 0);
        assert!(row.issues.is_empty());
    }

    #[test]
    fn negative_count_coerces_to_zero_and_is_remembered() {
        let row = single_row(
            "COLLISION_ID,CRASH_DATE,BOROUGH,NUMBER_OF_PERSONS_KILLED\n1,2022-01-15,QUEENS,-1\n",
        );
        assert_eq!(row.record.persons_killed, 0);
        assert_eq!(row.negative_columns, vec!["NUMBER_OF_PERSONS_KILLED"]);
    }

    #[test]
    fn huge_counts_do_not_overflow_derived_totals() {
        let row = single_row(
            "COLLISION_ID,CRASH_DATE,BOROUGH,NUMBER_OF_PERSONS_INJURED,NUMBER_OF_PEDESTRIANS_INJURED\n\
             1,2022-01-15,BROOKLYN,4294967295,4294967295\n",
        );
        assert_eq!(row.record.persons_injured, u32::MAX);
        assert_eq!(row.record.pedestrians_injured, u32::MAX);
        // The derived total saturates instead of wrapping.
        assert_eq!(row.record.total_injured, u32::MAX);
        assert!(row.issues.is_empty());
    }

    #[test]
    fn count_past_u32_range_coerces_to_zero_with_issue() {
        let row = single_row(
            "COLLISION_ID,CRASH_DATE,BOROUGH,NUMBER_OF_PERSONS_INJURED\n1,2022-01-15,BROOKLYN,4294967296\n",
        );
        assert_eq!(row.record.persons_injured, 0);
        assert_eq!(row.issues.len(), 1);
        assert_eq!(row.issues[0].column, "NUMBER_OF_PERSONS_INJURED");
    }

    #[test]
    fn declared_total_past_u32_range_falls_back_to_sum() {
        let row = single_row(
            "COLLISION_ID,CRASH_DATE,BOROUGH,NUMBER_OF_PERSONS_INJURED,TOTAL_INJURED\n\
             1,2022-01-15,BROOKLYN,2,4294967296\n",
        );
        assert_eq!(row.record.total_injured, 2);
        assert_eq!(row.issues.len(), 1);
        assert_eq!(row.issues[0].column, "TOTAL_INJURED");
        // The stated value is kept so validation still sees the mismatch.
        assert_eq!(row.declared_total_injured, Some(4_294_967_296));
    }

    #[test]
    fn unparseable_cell_becomes_missing_with_issue() {
        let row = single_row(
            "COLLISION_ID,CRASH_DATE,LATITUDE,LONGITUDE\n1,2022-01-15,forty,-73.99\n",
        );
        assert_eq!(row.record.latitude, None);
        assert_eq!(row.record.longitude, Some(-73.99));
        assert_eq!(row.issues.len(), 1);
        assert_eq!(row.issues[0].column, "LATITUDE");
        assert_eq!(row.issues[0].value, "forty");
    }

    #[test]
    fn derives_weekday_and_weekend_from_date() {
        // 2022-01-15 is a Saturday.
        let row = single_row("COLLISION_ID,CRASH_DATE,BOROUGH\n1,2022-01-15,BRONX\n");
        assert_eq!(row.record.crash_weekday, Some(Weekday::Sat));
        assert_eq!(row.record.is_weekend, Some(true));
        assert_eq!(row.record.crash_year, Some(2022));
        assert_eq!(row.record.crash_month, Some(1));
        assert_eq!(row.record.crash_day, Some(15));
    }

    #[test]
    fn stated_weekday_wins_over_derived() {
        let row = single_row(
            "COLLISION_ID,CRASH_DATE,CRASH_WEEKDAY,BOROUGH\n1,2022-01-15,Monday,BRONX\n",
        );
        // Kept as stated; validation flags the mismatch.
        assert_eq!(row.record.crash_weekday, Some(Weekday::Mon));
        assert_eq!(row.declared_weekday, Some(Weekday::Mon));
    }

    #[test]
    fn combines_date_and_time_into_datetime() {
        let row = single_row(
            "COLLISION_ID,CRASH_DATE,CRASH_TIME,BOROUGH\n1,2022-01-15,14:30,BROOKLYN\n",
        );
        let datetime = row.record.crash_datetime.unwrap();
        assert_eq!(datetime.to_string(), "2022-01-15 14:30:00");
        assert_eq!(row.record.crash_hour, Some(14));
    }

    #[test]
    fn datetime_column_backfills_missing_date() {
        let row = single_row(
            "COLLISION_ID,CRASH_DATE,CRASH_DATETIME,BOROUGH\n1,,2022-01-15 14:30:00,QUEENS\n",
        );
        assert_eq!(
            row.record.crash_date,
            NaiveDate::from_ymd_opt(2022, 1, 15)
        );
        assert_eq!(row.record.crash_time.unwrap().to_string(), "14:30:00");
    }

    #[test]
    fn insane_year_falls_back_to_date() {
        let row = single_row(
            "COLLISION_ID,CRASH_DATE,CRASH_YEAR,BOROUGH\n1,2022-01-15,9999,MANHATTAN\n",
        );
        assert_eq!(row.record.crash_year, Some(2022));
        assert_eq!(row.declared_year, None);
        assert_eq!(row.issues.len(), 1);
    }

    #[test]
    fn cleans_sentinel_strings_and_zero_coords() {
        let row = single_row(
            "COLLISION_ID,CRASH_DATE,BOROUGH,VEHICLE_TYPE_CODE_1,CONTRIBUTING_FACTOR_VEHICLE_1,LATITUDE,LONGITUDE,ZIP_CODE\n\
             1,2022-01-15,nan,Sedan,Unspecified,0.0,0.0,11201.0\n",
        );
        assert_eq!(row.record.borough, None);
        assert_eq!(row.record.vehicle_type_code_1.as_deref(), Some("Sedan"));
        assert_eq!(row.record.contributing_factor_vehicle_1, None);
        assert_eq!(row.record.latitude, None);
        assert_eq!(row.record.longitude, None);
        assert_eq!(row.record.zip_code.as_deref(), Some("11201"));
    }

    #[test]
    fn unknown_borough_is_an_issue() {
        let row = single_row("COLLISION_ID,CRASH_DATE,BOROUGH\n1,2022-01-15,YONKERS\n");
        assert_eq!(row.record.borough, None);
        assert_eq!(row.issues[0].column, "BOROUGH");
    }

    #[test]
    fn normalization_is_idempotent() {
        let header = "COLLISION_ID,CRASH_DATE,CRASH_TIME,BOROUGH,ZIP_CODE,LATITUDE,LONGITUDE,\
                      NUMBER_OF_PERSONS_INJURED,NUMBER_OF_PERSONS_KILLED,CONTRIBUTING_FACTOR_VEHICLE_1,\
                      VEHICLE_TYPE_CODE_1,CRASH_YEAR,CRASH_MONTH,CRASH_DAY,CRASH_WEEKDAY,CRASH_HOUR,\
                      IS_WEEKEND,TOTAL_INJURED,TOTAL_KILLED";
        let data = format!(
            "{header}\n12345,2022-01-15,14:30:00,BROOKLYN,11201,40.6942,-73.9902,2,0,Unsafe Speed,Sedan,2022,1,15,Saturday,14,true,2,0\n"
        );
        let first = single_row(&data);
        assert!(first.issues.is_empty());

        // Re-serialize the normalized record the way the clean writer would
        // and normalize again; nothing may change.
        let record = &first.record;
        let requoted = format!(
            "{header}\n{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
            record.collision_id.unwrap(),
            record.crash_date.unwrap().format("%Y-%m-%d"),
            record.crash_time.unwrap().format("%H:%M:%S"),
            record.borough.unwrap(),
            record.zip_code.as_deref().unwrap(),
            record.latitude.unwrap(),
            record.longitude.unwrap(),
            record.persons_injured,
            record.persons_killed,
            record.contributing_factor_vehicle_1.as_deref().unwrap(),
            record.vehicle_type_code_1.as_deref().unwrap(),
            record.crash_year.unwrap(),
            record.crash_month.unwrap(),
            record.crash_day.unwrap(),
            "Saturday",
            record.crash_hour.unwrap(),
            record.is_weekend.unwrap(),
            record.total_injured,
            record.total_killed,
        );
        let second = single_row(&requoted);
        assert_eq!(second.record, first.record);
        assert!(second.issues.is_empty());
    }
}
