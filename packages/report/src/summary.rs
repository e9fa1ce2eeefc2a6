//! Aggregate breakdowns of the validated dataset.
//!
//! Mirrors the axes the downstream dashboard slices on: borough, year,
//! hour of day, and casualties by victim class. `BTreeMap` keys keep the
//! JSON output deterministically ordered.

use std::collections::BTreeMap;

use chrono::Weekday;
use collision_map_models::CollisionRecord;
use serde::{Deserialize, Serialize};

/// Key used for records whose borough is unknown.
pub const UNKNOWN_BOROUGH: &str = "UNKNOWN";

/// Casualty totals split by victim class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasualtyTotals {
    pub pedestrians: u64,
    pub cyclists: u64,
    pub motorists: u64,
    pub persons: u64,
}

/// Aggregate statistics over the output records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Number of records summarized.
    pub total_records: u64,
    /// Record count per borough (unknown boroughs under [`UNKNOWN_BOROUGH`]).
    pub by_borough: BTreeMap<String, u64>,
    /// Record count per crash year.
    pub by_year: BTreeMap<i32, u64>,
    /// Record count per hour of day.
    pub by_hour: BTreeMap<u32, u64>,
    /// Record count per named weekday.
    pub by_weekday: BTreeMap<String, u64>,
    /// Injuries by victim class.
    pub injured: CasualtyTotals,
    /// Deaths by victim class.
    pub killed: CasualtyTotals,
    /// Sum of `total_injured` across all records.
    pub total_injured: u64,
    /// Sum of `total_killed` across all records.
    pub total_killed: u64,
}

impl DatasetSummary {
    /// Builds the summary in a single pass over the records.
    #[must_use]
    pub fn from_records(records: &[CollisionRecord]) -> Self {
        let mut summary = Self {
            total_records: records.len() as u64,
            ..Self::default()
        };

        for record in records {
            let borough = record
                .borough
                .map_or_else(|| UNKNOWN_BOROUGH.to_string(), |b| b.to_string());
            *summary.by_borough.entry(borough).or_insert(0) += 1;

            if let Some(year) = record.crash_year {
                *summary.by_year.entry(year).or_insert(0) += 1;
            }
            if let Some(hour) = record.crash_hour {
                *summary.by_hour.entry(hour).or_insert(0) += 1;
            }
            if let Some(weekday) = record.crash_weekday {
                *summary
                    .by_weekday
                    .entry(weekday_name(weekday).to_string())
                    .or_insert(0) += 1;
            }

            summary.injured.pedestrians += u64::from(record.pedestrians_injured);
            summary.injured.cyclists += u64::from(record.cyclists_injured);
            summary.injured.motorists += u64::from(record.motorists_injured);
            summary.injured.persons += u64::from(record.persons_injured);
            summary.killed.pedestrians += u64::from(record.pedestrians_killed);
            summary.killed.cyclists += u64::from(record.cyclists_killed);
            summary.killed.motorists += u64::from(record.motorists_killed);
            summary.killed.persons += u64::from(record.persons_killed);
            summary.total_injured += u64::from(record.total_injured);
            summary.total_killed += u64::from(record.total_killed);
        }

        summary
    }
}

/// Full English weekday name, matching the dataset's `CRASH_WEEKDAY`
/// spelling.
#[must_use]
pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collision_map_ingest::loader::load_from_reader;
    use collision_map_ingest::normalize::normalize;

    fn records(data: &str) -> Vec<CollisionRecord> {
        let table = load_from_reader(data.as_bytes()).unwrap();
        normalize(&table)
            .rows
            .into_iter()
            .map(|row| row.record)
            .collect()
    }

    #[test]
    fn aggregates_by_borough_year_and_hour() {
        let records = records(
            "COLLISION_ID,CRASH_DATE,CRASH_TIME,BOROUGH,NUMBER_OF_PEDESTRIANS_INJURED\n\
             1,2022-01-15,14:30,BROOKLYN,1\n\
             2,2022-06-01,14:05,BROOKLYN,0\n\
             3,2023-03-10,09:00,,2\n",
        );
        let summary = DatasetSummary::from_records(&records);

        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.by_borough["BROOKLYN"], 2);
        assert_eq!(summary.by_borough[UNKNOWN_BOROUGH], 1);
        assert_eq!(summary.by_year[&2022], 2);
        assert_eq!(summary.by_year[&2023], 1);
        assert_eq!(summary.by_hour[&14], 2);
        assert_eq!(summary.injured.pedestrians, 3);
        // Totals were absent, so they were derived from the sub-counts.
        assert_eq!(summary.total_injured, 3);
        assert_eq!(summary.total_killed, 0);
    }

    #[test]
    fn empty_dataset_summarizes_to_zeros() {
        let summary = DatasetSummary::from_records(&[]);
        assert_eq!(summary.total_records, 0);
        assert!(summary.by_borough.is_empty());
    }
}
