//! Dataset-level profile aggregate.

use serde::{Deserialize, Serialize};

use super::column::ColumnProfile;

/// Aggregate profile over all columns of a dataset.
///
/// The aggregate fields are pure functions of `columns` and are computed
/// once by [`DatasetProfile::from_columns`]; they carry no independent state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetProfile {
    /// Per-column profiles in original column order.
    pub columns: Vec<ColumnProfile>,
    /// True if any column is temporal.
    pub has_temporal_column: bool,
    /// Names of temporal columns, in original column order.
    pub temporal_column_names: Vec<String>,
    /// Count of numeric columns; `None` when there are none.
    pub numeric_column_count: Option<usize>,
}

impl DatasetProfile {
    /// Build the aggregate from per-column profiles.
    pub fn from_columns(columns: Vec<ColumnProfile>) -> Self {
        let temporal_column_names: Vec<String> = columns
            .iter()
            .filter(|c| c.is_temporal)
            .map(|c| c.name.clone())
            .collect();
        let numeric = columns.iter().filter(|c| c.is_numeric).count();

        Self {
            has_temporal_column: !temporal_column_names.is_empty(),
            temporal_column_names,
            numeric_column_count: (numeric > 0).then_some(numeric),
            columns,
        }
    }

    /// First numeric column name, the engine's default value column.
    pub fn first_numeric_column(&self) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.is_numeric)
            .map(|c| c.name.as_str())
    }

    /// Index of the first numeric column. Profiles keep original column
    /// order, so this indexes straight into the profiled dataset.
    pub fn first_numeric_column_index(&self) -> Option<usize> {
        self.columns.iter().position(|c| c.is_numeric)
    }

    /// Index of the first temporal column, the dataset's time axis.
    pub fn first_temporal_column_index(&self) -> Option<usize> {
        self.columns.iter().position(|c| c.is_temporal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ColumnType;

    fn profile(name: &str, column_type: ColumnType) -> ColumnProfile {
        ColumnProfile::from_type(name, column_type)
    }

    #[test]
    fn aggregates_are_derived() {
        let p = DatasetProfile::from_columns(vec![
            {
                let mut c = profile("ts", ColumnType::Timestamp);
                c.is_temporal = true;
                c
            },
            profile("value", ColumnType::Float),
            profile("label", ColumnType::Text),
        ]);
        assert!(p.has_temporal_column);
        assert_eq!(p.temporal_column_names, vec!["ts"]);
        assert_eq!(p.numeric_column_count, Some(1));
        assert_eq!(p.first_numeric_column(), Some("value"));
        assert_eq!(p.first_numeric_column_index(), Some(1));
        assert_eq!(p.first_temporal_column_index(), Some(0));
    }

    #[test]
    fn zero_numeric_columns_is_none() {
        let p = DatasetProfile::from_columns(vec![profile("label", ColumnType::Text)]);
        assert_eq!(p.numeric_column_count, None);
        assert_eq!(p.first_numeric_column_index(), None);
        assert_eq!(p.first_temporal_column_index(), None);
        assert!(!p.has_temporal_column);
        assert!(p.temporal_column_names.is_empty());
    }
}
