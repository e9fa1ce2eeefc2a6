#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical collision record types and validation taxonomies.
//!
//! This crate defines the strongly-typed [`CollisionRecord`] that every raw
//! CSV row is mapped into at the ingestion boundary, plus the violation tags
//! a validated row can carry. All loosely-typed cell handling happens
//! upstream; everything downstream of ingestion works with these types.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// One of the five NYC boroughs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Borough {
    Brooklyn,
    Manhattan,
    Queens,
    Bronx,
    /// Serialized with a space, matching the source dataset spelling.
    #[serde(rename = "STATEN ISLAND")]
    #[strum(serialize = "STATEN ISLAND")]
    StatenIsland,
}

impl Borough {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Brooklyn,
            Self::Manhattan,
            Self::Queens,
            Self::Bronx,
            Self::StatenIsland,
        ]
    }

    /// Parses a raw borough cell, tolerating case and surrounding
    /// whitespace. Returns `None` for empty cells and unknown values.
    #[must_use]
    pub fn from_raw(value: &str) -> Option<Self> {
        let cleaned = value.trim().to_uppercase();
        if cleaned.is_empty() {
            return None;
        }
        cleaned.parse().ok()
    }
}

/// A validation violation tag attached to a single row.
///
/// Rows with zero tags are "clean". Tags are accumulated per row by the
/// validator and surface in the diagnostic report; none of them abort the
/// run on their own.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Violation {
    /// Latitude or longitude outside the configured NYC bounding box.
    OutOfBoundsCoords,
    /// A count column held a negative value before coercion.
    NegativeCount,
    /// A stated casualty total disagrees with the sum of its sub-counts.
    SumMismatch,
    /// This `COLLISION_ID` was already seen on an earlier row.
    DuplicateId,
    /// `CRASH_YEAR` disagrees with the year component of `CRASH_DATE`.
    YearMismatch,
    /// `CRASH_WEEKDAY` or `IS_WEEKEND` disagrees with `CRASH_DATE`.
    WeekdayMismatch,
    /// Hour, month, or day-of-month outside its documented range.
    RangeViolation,
}

/// What to do with rows that carry one or more violation tags.
///
/// The source documentation says violations are "handled" without mandating
/// drop-vs-flag, so the policy is explicit and configurable. The default is
/// [`Self::Flag`]: flagged rows pass through to the output carrying their
/// tags, keeping downstream record counts unaffected.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InvalidRowPolicy {
    /// Keep flagged rows in the output; triage happens via the report.
    #[default]
    Flag,
    /// Exclude flagged rows from the output (they still appear in the
    /// report and in the totals).
    Drop,
    /// Abort the whole run on the first flagged row.
    Fail,
}

/// A collision record normalized to the canonical schema.
///
/// Constructed once per source row during ingestion. After validation it is
/// immutable input to downstream reporting; there is no persistent mutable
/// store and the dataset is reloaded on each run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionRecord {
    /// Unique collision identifier from the source dataset. `None` when the
    /// cell was empty or unparseable (such rows are never "clean" twins of
    /// another row — duplicate detection only considers present ids).
    pub collision_id: Option<i64>,

    /// Borough where the collision occurred, if known.
    pub borough: Option<Borough>,
    /// Postal code, kept as text (leading zeros matter).
    pub zip_code: Option<String>,
    /// Latitude (WGS84). `None` if missing or unparseable.
    pub latitude: Option<f64>,
    /// Longitude (WGS84). `None` if missing or unparseable.
    pub longitude: Option<f64>,
    pub on_street_name: Option<String>,
    pub cross_street_name: Option<String>,
    pub off_street_name: Option<String>,

    /// Calendar date of the crash. `None` when the date cell was missing or
    /// unparseable; all date-derived fields are `None` in that case too.
    pub crash_date: Option<NaiveDate>,
    /// Time of day of the crash.
    pub crash_time: Option<NaiveTime>,
    /// Combined date + time, derived when the source column is absent.
    pub crash_datetime: Option<NaiveDateTime>,
    /// Four-digit crash year.
    pub crash_year: Option<i32>,
    /// Month 1-12.
    pub crash_month: Option<u32>,
    /// Day of month 1-31.
    pub crash_day: Option<u32>,
    /// Named day of week.
    pub crash_weekday: Option<Weekday>,
    /// Hour of day 0-23.
    pub crash_hour: Option<u32>,
    /// Whether the crash happened on a Saturday or Sunday.
    pub is_weekend: Option<bool>,

    pub persons_injured: u32,
    pub persons_killed: u32,
    pub pedestrians_injured: u32,
    pub pedestrians_killed: u32,
    pub cyclists_injured: u32,
    pub cyclists_killed: u32,
    pub motorists_injured: u32,
    pub motorists_killed: u32,
    /// Stated total when the source provided one, otherwise the sum of the
    /// four injured sub-counts.
    pub total_injured: u32,
    /// Stated total when the source provided one, otherwise the sum of the
    /// four killed sub-counts.
    pub total_killed: u32,

    pub contributing_factor_vehicle_1: Option<String>,
    pub contributing_factor_vehicle_2: Option<String>,
    pub vehicle_type_code_1: Option<String>,
    pub vehicle_type_code_2: Option<String>,

    /// Person-level aggregates, present only when the source table was
    /// merged with the persons dataset.
    pub total_persons: Option<u32>,
    pub avg_person_age: Option<f64>,
    pub female_persons: Option<u32>,
    pub male_persons: Option<u32>,
    pub unknown_sex: Option<u32>,
}

impl CollisionRecord {
    /// Sum of the four injured sub-counts (pedestrians, cyclists,
    /// motorists, persons).
    #[must_use]
    pub const fn injured_sum(&self) -> u32 {
        self.persons_injured
            .saturating_add(self.pedestrians_injured)
            .saturating_add(self.cyclists_injured)
            .saturating_add(self.motorists_injured)
    }

    /// Sum of the four killed sub-counts.
    #[must_use]
    pub const fn killed_sum(&self) -> u32 {
        self.persons_killed
            .saturating_add(self.pedestrians_killed)
            .saturating_add(self.cyclists_killed)
            .saturating_add(self.motorists_killed)
    }
}

/// Returns whether the given weekday counts as a weekend day.
#[must_use]
pub const fn is_weekend_day(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// A cell value that could not be coerced to its expected semantic type.
///
/// Recovered locally by treating the value as missing; recorded here so the
/// report shows what was thrown away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoercionIssue {
    /// Documented column name the value came from.
    pub column: String,
    /// The raw cell content that failed to coerce.
    pub value: String,
}

/// Per-row diagnostics produced by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowDiagnostics {
    /// 1-based data row number (header row not counted).
    pub row: usize,
    /// Collision id of the row, when present.
    pub collision_id: Option<i64>,
    /// Violation tags accumulated for this row. Empty means clean.
    pub violations: Vec<Violation>,
    /// Values that failed type coercion during normalization.
    pub coercion_issues: Vec<CoercionIssue>,
}

impl RowDiagnostics {
    /// Whether this row carries no violation tags. Coercion issues do not
    /// make a row unclean; they are itemized in the report separately.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Dataset-level counters for a validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    /// Rows read from the source file.
    pub rows_read: u64,
    /// Rows with zero violation tags.
    pub clean_rows: u64,
    /// Rows carrying at least one violation tag.
    pub flagged_rows: u64,
    /// Rows excluded from the output by the invalid-row policy.
    pub dropped_rows: u64,
    /// Total coercion issues across all rows.
    pub coercion_issues: u64,
}

/// The diagnostic report handed to a human for triage before the data
/// reaches downstream reporting.
///
/// Only rows with at least one violation or coercion issue are listed;
/// clean rows are represented in the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Dataset-level counters.
    pub totals: ReportTotals,
    /// Policy that was applied to flagged rows.
    pub policy: InvalidRowPolicy,
    /// Diagnostics for every row with a violation or coercion issue.
    pub flagged: Vec<RowDiagnostics>,
}

/// Which documented columns the input file actually provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaCheck {
    /// Documented columns found in the header row.
    pub present: Vec<String>,
    /// Documented columns absent from the header row. These are treated as
    /// absent data, not as an error (required columns excepted).
    pub missing: Vec<String>,
}

impl SchemaCheck {
    /// Whether the named documented column is present in the input.
    #[must_use]
    pub fn has(&self, column: &str) -> bool {
        self.present.iter().any(|c| c == column)
    }
}
