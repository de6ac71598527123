//! Facade tying the profiler and aligner together.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::align::{AlignmentResult, DtwAligner, SequenceRole};
use crate::error::{Result, TsalignError};
use crate::input::{CellValue, Column, TabularDataset};
use crate::profile::{DatasetProfile, Profiler, ProfilerConfig};

/// Result of aligning two datasets by their value columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetAlignment {
    /// Name of the value column chosen from the baseline dataset.
    pub baseline_column: String,
    /// Name of the value column chosen from the comparison dataset.
    pub comparison_column: String,
    /// The alignment itself.
    pub result: AlignmentResult,
}

/// Profiles datasets and aligns their value columns.
///
/// The value column of each dataset is its first numeric column in column
/// order; callers wanting a different column (or wanting an index/ID column
/// excluded) drop or reorder columns before handing the dataset over.
pub struct AlignmentEngine {
    profiler: Profiler,
    aligner: DtwAligner,
}

impl AlignmentEngine {
    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self {
            profiler: Profiler::new(),
            aligner: DtwAligner::new(),
        }
    }

    /// Create an engine with a custom profiler configuration.
    pub fn with_profiler_config(config: ProfilerConfig) -> Self {
        Self {
            profiler: Profiler::with_config(config),
            aligner: DtwAligner::new(),
        }
    }

    /// Profile a dataset, coercing temporal columns in place.
    pub fn profile(&self, dataset: &mut TabularDataset) -> Result<DatasetProfile> {
        self.profiler.profile(dataset)
    }

    /// Profile both datasets, select each one's first numeric column, and
    /// align the two value sequences.
    pub fn align_datasets(
        &self,
        baseline: &mut TabularDataset,
        comparison: &mut TabularDataset,
    ) -> Result<DatasetAlignment> {
        let baseline_profile = self.profiler.profile(baseline)?;
        let comparison_profile = self.profiler.profile(comparison)?;

        let (baseline_column, baseline_values) =
            value_column(baseline, &baseline_profile, SequenceRole::Baseline)?;
        let (comparison_column, comparison_values) =
            value_column(comparison, &comparison_profile, SequenceRole::Comparison)?;

        debug!(
            "aligning '{baseline_column}' ({} rows) against '{comparison_column}' ({} rows)",
            baseline_values.len(),
            comparison_values.len()
        );

        let result = self.aligner.align(&baseline_values, &comparison_values)?;

        Ok(DatasetAlignment {
            baseline_column,
            comparison_column,
            result,
        })
    }

    /// Collapse a dataset to the daily mean of its numeric columns.
    ///
    /// The dataset is profiled first (coercing temporal columns in place),
    /// then rows are grouped by the calendar date of the first temporal
    /// column. Rows whose timestamp failed to coerce are dropped; null value
    /// cells are skipped within their group, and a group with no usable
    /// values for a column yields a null cell. The result carries a `date`
    /// column (midnight timestamps, ascending) followed by one mean column
    /// per numeric input column, in original column order.
    ///
    /// # Errors
    ///
    /// Returns [`TsalignError::NoTemporalColumn`] when no column is temporal.
    pub fn daily_average(&self, dataset: &mut TabularDataset) -> Result<TabularDataset> {
        let profile = self.profiler.profile(dataset)?;
        let Some(time_index) = profile.first_temporal_column_index() else {
            warn!("dataset has no temporal column to aggregate over");
            return Err(TsalignError::NoTemporalColumn);
        };

        let numeric_indices: Vec<usize> = profile
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_numeric)
            .map(|(i, _)| i)
            .collect();

        // Date -> per-numeric-column running (sum, count). BTreeMap keeps
        // the output sorted by date.
        let mut groups: BTreeMap<NaiveDate, Vec<(f64, usize)>> = BTreeMap::new();
        let columns = dataset.columns();
        for row in 0..dataset.row_count() {
            let CellValue::Timestamp(ts) = &columns[time_index].values[row] else {
                continue;
            };
            let sums = groups
                .entry(ts.date())
                .or_insert_with(|| vec![(0.0, 0); numeric_indices.len()]);
            for (slot, &col) in numeric_indices.iter().enumerate() {
                if let Some(v) = columns[col].values[row].as_f64()
                    && v.is_finite()
                {
                    sums[slot].0 += v;
                    sums[slot].1 += 1;
                }
            }
        }

        debug!(
            "aggregated {} rows into {} daily groups over '{}'",
            dataset.row_count(),
            groups.len(),
            profile.columns[time_index].name
        );

        let mut date_cells = Vec::with_capacity(groups.len());
        let mut mean_cells: Vec<Vec<CellValue>> =
            vec![Vec::with_capacity(groups.len()); numeric_indices.len()];
        for (date, sums) in &groups {
            date_cells.push(CellValue::Timestamp(date.and_time(NaiveTime::MIN)));
            for (slot, &(sum, count)) in sums.iter().enumerate() {
                mean_cells[slot].push(if count == 0 {
                    CellValue::Null
                } else {
                    CellValue::Float(sum / count as f64)
                });
            }
        }

        let mut out = vec![Column::new("date", date_cells)];
        for (slot, &col) in numeric_indices.iter().enumerate() {
            out.push(Column::new(
                profile.columns[col].name.clone(),
                std::mem::take(&mut mean_cells[slot]),
            ));
        }

        TabularDataset::new(out)
    }
}

impl Default for AlignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the first numeric column of a profiled dataset as `f64` values.
///
/// Null cells map to NaN so the aligner's validation reports the offending
/// row index.
fn value_column(
    dataset: &TabularDataset,
    profile: &DatasetProfile,
    role: SequenceRole,
) -> Result<(String, Vec<f64>)> {
    let Some(index) = profile.first_numeric_column_index() else {
        warn!("{role} dataset has no numeric column");
        return Err(TsalignError::NoNumericColumn { role });
    };

    // Profile order mirrors column order, so the index is authoritative even
    // when two headers trim to the same name.
    let name = profile.columns[index].name.clone();
    let column = &dataset.columns()[index];

    let values: Vec<f64> = column
        .values
        .iter()
        .map(|cell| cell.as_f64().unwrap_or(f64::NAN))
        .collect();

    Ok((name, values))
}
