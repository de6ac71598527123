//! Column scanner: temporal detection, coercion, and flag derivation.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::column::ColumnProfile;
use super::dataset::DatasetProfile;
use super::types::ColumnType;
use crate::error::{Result, TsalignError};
use crate::input::{CellValue, TabularDataset};

/// Keywords whose presence in a column name (case-insensitive substring)
/// marks the column as temporal.
pub const TEMPORAL_KEYWORDS: &[&str] = &[
    "date",
    "datetime",
    "time",
    "timestamp",
    "timezone",
    "date_time",
    "time_stamp",
];

/// Trailing all-digit fractional-seconds suffix.
static FRACTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.(\d+)$").unwrap());

/// Timestamp formats tried against coerced values. Fractional seconds are
/// normalized to six digits before parsing, so `%.f` always has input.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S%.f",
];

/// Date-only formats, parsed to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// Profiler configuration.
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    /// Maximum distinct non-null values for a text column to also count as
    /// categorical.
    pub categorical_threshold: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            categorical_threshold: 20,
        }
    }
}

/// Scans a dataset and classifies each column.
pub struct Profiler {
    config: ProfilerConfig,
}

impl Profiler {
    /// Create a profiler with default configuration.
    pub fn new() -> Self {
        Self {
            config: ProfilerConfig::default(),
        }
    }

    /// Create a profiler with custom configuration.
    pub fn with_config(config: ProfilerConfig) -> Self {
        Self { config }
    }

    /// Profile every column of a dataset, coercing temporal columns in place.
    ///
    /// Columns whose name contains a temporal keyword have their cells
    /// rewritten as timestamps; cells that fail to parse become
    /// [`CellValue::Null`] rather than aborting the scan.
    ///
    /// # Errors
    ///
    /// Returns [`TsalignError::ShapeMismatch`] if the columns do not share a
    /// single row count.
    pub fn profile(&self, dataset: &mut TabularDataset) -> Result<DatasetProfile> {
        let expected = dataset.row_count();
        for col in dataset.columns() {
            if col.values.len() != expected {
                return Err(TsalignError::ShapeMismatch {
                    column: col.name.trim().to_string(),
                    expected,
                    actual: col.values.len(),
                });
            }
        }

        let mut profiles = Vec::with_capacity(dataset.column_count());

        for col in dataset.columns_mut() {
            let name = col.name.trim().to_string();
            debug!("profiling column '{name}'");

            let lowered = name.to_lowercase();
            let name_implies_temporal =
                TEMPORAL_KEYWORDS.iter().any(|kw| lowered.contains(kw));

            let mut column_type = ColumnType::of_cells(&col.values);
            let is_temporal = column_type.is_temporal() || name_implies_temporal;

            if is_temporal && !column_type.is_temporal() {
                coerce_temporal(&mut col.values);
                column_type = ColumnType::of_cells(&col.values);
            }

            let mut profile = ColumnProfile::from_type(name, column_type);
            // Name-based detection survives even when every cell failed to
            // coerce and the declared type stayed non-temporal.
            profile.is_temporal = is_temporal;
            profile.is_categorical = column_type == ColumnType::Text
                && is_low_cardinality(&col.values, self.config.categorical_threshold);

            profiles.push(profile);
        }

        Ok(DatasetProfile::from_columns(profiles))
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite every cell of a column as a parsed timestamp, or `Null` on
/// failure. Nulls pass through unchanged.
fn coerce_temporal(values: &mut [CellValue]) {
    for cell in values {
        let Some(text) = cell.to_text() else {
            continue;
        };
        let normalized = normalize_fractional_seconds(&text);
        *cell = match parse_timestamp(&normalized) {
            Some(ts) => CellValue::Timestamp(ts),
            None => CellValue::Null,
        };
    }
}

/// Normalize the fractional-seconds suffix of a time-bearing value to
/// exactly six digits: pad short fractions with zeros, truncate long ones,
/// and append `.000000` when no fraction is present.
///
/// Values without a time component (no `:`) are left untouched; fractional
/// seconds can only follow seconds. Heterogeneous producers emit 1 to 9
/// fractional digits, and a fixed width keeps the parse formats uniform.
fn normalize_fractional_seconds(raw: &str) -> String {
    let s = raw.trim();
    if !s.contains(':') {
        return s.to_string();
    }
    if let Some(caps) = FRACTION_RE.captures(s) {
        let whole = caps.get(0).expect("whole match");
        let frac = caps.get(1).expect("fraction group").as_str();
        let head = &s[..whole.start()];
        if frac.len() >= 6 {
            format!("{head}.{}", &frac[..6])
        } else {
            format!("{head}.{frac:0<6}")
        }
    } else {
        format!("{s}.000000")
    }
}

/// Try each supported timestamp format, then date-only formats at midnight.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Distinct non-null values at or below the threshold, with at least one
/// non-null value present.
fn is_low_cardinality(values: &[CellValue], threshold: usize) -> bool {
    let mut distinct: HashSet<&str> = HashSet::new();
    let mut non_null = 0usize;
    for cell in values {
        if let CellValue::Text(s) = cell {
            non_null += 1;
            distinct.insert(s.as_str());
            if distinct.len() > threshold {
                return false;
            }
        }
    }
    non_null > 0
}
