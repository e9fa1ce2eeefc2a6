//! Row validation against the documented schema invariants.
//!
//! Every check is per-row and independent except duplicate detection,
//! which threads an explicit [`SeenIds`] accumulator through a single
//! linear pass. The first occurrence of an id is authoritative; later
//! occurrences are the ones flagged.

use std::collections::BTreeSet;

use chrono::Datelike;
use collision_map_models::{is_weekend_day, RowDiagnostics, Violation};

use crate::config::ValidatorConfig;
use crate::normalize::{NormalizedRow, NormalizedTable};
use crate::progress::ProgressCallback;

/// Identifiers seen so far during the duplicate pass. Kept as an explicit
/// accumulator rather than ambient state so row checks stay composable
/// and testable in isolation.
#[derive(Debug, Default)]
pub struct SeenIds(BTreeSet<i64>);

impl SeenIds {
    /// Records `id`, returning `true` if this is its first occurrence.
    pub fn record(&mut self, id: i64) -> bool {
        self.0.insert(id)
    }
}

/// Validates every normalized row, producing diagnostics in file order.
#[must_use]
pub fn validate(
    table: &NormalizedTable,
    config: &ValidatorConfig,
    progress: Option<&dyn ProgressCallback>,
) -> Vec<RowDiagnostics> {
    let mut seen = SeenIds::default();
    let mut diagnostics = Vec::with_capacity(table.rows.len());

    for (index, row) in table.rows.iter().enumerate() {
        diagnostics.push(check_row(row, index + 1, config, &mut seen));
        if let Some(p) = progress {
            p.inc(1);
        }
    }

    diagnostics
}

/// Checks a single row against every invariant.
pub fn check_row(
    row: &NormalizedRow,
    row_number: usize,
    config: &ValidatorConfig,
    seen: &mut SeenIds,
) -> RowDiagnostics {
    let record = &row.record;
    let mut violations = Vec::new();

    if let (Some(latitude), Some(longitude)) = (record.latitude, record.longitude)
        && !config.bounds.contains(latitude, longitude)
    {
        violations.push(Violation::OutOfBoundsCoords);
    }

    let negative_total = row.declared_total_injured.is_some_and(|v| v < 0)
        || row.declared_total_killed.is_some_and(|v| v < 0);
    if !row.negative_columns.is_empty() || negative_total {
        violations.push(Violation::NegativeCount);
    }

    let injured_mismatch = row
        .declared_total_injured
        .is_some_and(|stated| stated >= 0 && stated != i64::from(record.injured_sum()));
    let killed_mismatch = row
        .declared_total_killed
        .is_some_and(|stated| stated >= 0 && stated != i64::from(record.killed_sum()));
    if injured_mismatch || killed_mismatch {
        violations.push(Violation::SumMismatch);
    }

    if let Some(id) = record.collision_id
        && !seen.record(id)
    {
        violations.push(Violation::DuplicateId);
    }

    if let Some(date) = record.crash_date {
        if row.declared_year.is_some_and(|year| year != date.year()) {
            violations.push(Violation::YearMismatch);
        }

        let weekday_wrong = row
            .declared_weekday
            .is_some_and(|weekday| weekday != date.weekday());
        let weekend_wrong = row
            .declared_is_weekend
            .is_some_and(|weekend| weekend != is_weekend_day(date.weekday()));
        if weekday_wrong || weekend_wrong {
            violations.push(Violation::WeekdayMismatch);
        }
    }

    let hour_bad = record.crash_hour.is_some_and(|hour| hour > 23);
    let month_bad = record
        .crash_month
        .is_some_and(|month| !(1..=12).contains(&month));
    let day_bad = record.crash_day.is_some_and(|day| !(1..=31).contains(&day));
    if hour_bad || month_bad || day_bad {
        violations.push(Violation::RangeViolation);
    }

    RowDiagnostics {
        row: row_number,
        collision_id: record.collision_id,
        violations,
        coercion_issues: row.issues.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_from_reader;
    use crate::normalize::normalize;

    const HEADER: &str = "CRASH_DATE,CRASH_TIME,BOROUGH,ZIP_CODE,LATITUDE,LONGITUDE,\
NUMBER_OF_PERSONS_INJURED,NUMBER_OF_PERSONS_KILLED,CONTRIBUTING_FACTOR_VEHICLE_1,\
VEHICLE_TYPE_CODE_1,CRASH_YEAR,CRASH_MONTH,CRASH_DAY,CRASH_WEEKDAY,CRASH_HOUR,IS_WEEKEND,\
COLLISION_ID";

    fn diagnose(rows: &str) -> Vec<RowDiagnostics> {
        let data = format!("{HEADER}\n{rows}");
        let table = load_from_reader(data.as_bytes()).unwrap();
        let normalized = normalize(&table);
        validate(&normalized, &ValidatorConfig::default(), None)
    }

    #[test]
    fn documented_example_row_is_clean() {
        let diags = diagnose(
            "2022-01-15,14:30,BROOKLYN,11201,40.6942,-73.9902,2,0,Unsafe Speed,Sedan,2022,1,15,Saturday,14,true,12345\n",
        );
        assert!(diags[0].is_clean(), "unexpected tags: {:?}", diags[0].violations);
    }

    #[test]
    fn out_of_bounds_latitude_is_flagged_not_dropped() {
        let diags = diagnose(
            "2022-01-15,14:30,BROOKLYN,11201,41.9,-73.9902,2,0,Unsafe Speed,Sedan,2022,1,15,Saturday,14,true,12345\n",
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].violations, vec![Violation::OutOfBoundsCoords]);
    }

    #[test]
    fn out_of_bounds_longitude_is_flagged() {
        let diags = diagnose(
            "2022-01-15,14:30,BROOKLYN,11201,40.6942,-75.5,0,0,,,2022,1,15,Saturday,14,true,1\n",
        );
        assert_eq!(diags[0].violations, vec![Violation::OutOfBoundsCoords]);
    }

    #[test]
    fn missing_coordinates_are_not_a_bounds_violation() {
        let diags = diagnose("2022-01-15,14:30,BROOKLYN,11201,,,0,0,,,2022,1,15,Saturday,14,true,1\n");
        assert!(diags[0].is_clean());
    }

    #[test]
    fn duplicate_id_flags_second_occurrence_only() {
        let diags = diagnose(
            "2022-01-15,14:30,BROOKLYN,11201,40.6942,-73.9902,2,0,,,2022,1,15,Saturday,14,true,12345\n\
             2022-01-16,09:00,QUEENS,11354,40.7654,-73.8318,0,0,,,2022,1,16,Sunday,9,true,12345\n",
        );
        assert!(diags[0].is_clean());
        assert_eq!(diags[1].violations, vec![Violation::DuplicateId]);
    }

    #[test]
    fn year_mismatch_is_flagged() {
        let diags = diagnose(
            "2022-01-15,14:30,BROOKLYN,11201,40.6942,-73.9902,0,0,,,2021,1,15,Saturday,14,true,1\n",
        );
        assert_eq!(diags[0].violations, vec![Violation::YearMismatch]);
    }

    #[test]
    fn stated_weekday_inconsistent_with_date_is_flagged() {
        // 2022-01-15 is a Saturday, not a Monday.
        let diags = diagnose(
            "2022-01-15,14:30,BROOKLYN,11201,40.6942,-73.9902,0,0,,,2022,1,15,Monday,14,false,1\n",
        );
        assert_eq!(diags[0].violations, vec![Violation::WeekdayMismatch]);
    }

    #[test]
    fn negative_count_is_flagged() {
        let diags = diagnose(
            "2022-01-15,14:30,BROOKLYN,11201,40.6942,-73.9902,-2,0,,,2022,1,15,Saturday,14,true,1\n",
        );
        assert_eq!(diags[0].violations, vec![Violation::NegativeCount]);
    }

    #[test]
    fn out_of_range_hour_is_flagged() {
        let diags = diagnose(
            "2022-01-15,14:30,BROOKLYN,11201,40.6942,-73.9902,0,0,,,2022,1,15,Saturday,27,true,1\n",
        );
        assert_eq!(diags[0].violations, vec![Violation::RangeViolation]);
    }

    #[test]
    fn stated_total_mismatch_is_flagged() {
        let data = "COLLISION_ID,CRASH_DATE,BOROUGH,NUMBER_OF_PERSONS_INJURED,TOTAL_INJURED\n\
                    1,2022-01-15,BROOKLYN,2,5\n";
        let table = load_from_reader(data.as_bytes()).unwrap();
        let normalized = normalize(&table);
        let diags = validate(&normalized, &ValidatorConfig::default(), None);
        assert_eq!(diags[0].violations, vec![Violation::SumMismatch]);
    }

    #[test]
    fn matching_stated_total_reconciles() {
        let data = "COLLISION_ID,CRASH_DATE,BOROUGH,NUMBER_OF_PERSONS_INJURED,NUMBER_OF_CYCLIST_INJURED,TOTAL_INJURED\n\
                    1,2022-01-15,BROOKLYN,2,1,3\n";
        let table = load_from_reader(data.as_bytes()).unwrap();
        let normalized = normalize(&table);
        let diags = validate(&normalized, &ValidatorConfig::default(), None);
        assert!(diags[0].is_clean());
    }

    #[test]
    fn rows_without_an_id_never_collide() {
        let data = "COLLISION_ID,CRASH_DATE,BOROUGH\n,2022-01-15,BROOKLYN\n,2022-01-16,QUEENS\n";
        let table = load_from_reader(data.as_bytes()).unwrap();
        let normalized = normalize(&table);
        let diags = validate(&normalized, &ValidatorConfig::default(), None);
        assert!(diags.iter().all(RowDiagnostics::is_clean));
    }
}
