//! Column type tags.

use serde::{Deserialize, Serialize};

use crate::input::CellValue;

/// Declared scalar type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Whole numbers.
    Integer,
    /// Floating-point numbers (also covers integer/float mixtures).
    Float,
    /// Boolean values.
    Boolean,
    /// Text values.
    Text,
    /// Timestamps.
    Timestamp,
    /// Empty or all-null column.
    Unknown,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Timestamp)
    }

    /// Derive the declared type of a column from its cells.
    ///
    /// Nulls are ignored. A mixed integer/float column is promoted to
    /// `Float`; any other mixture degrades to `Text`, mirroring how a
    /// loosely-typed frame would store it.
    pub fn of_cells(cells: &[CellValue]) -> Self {
        let mut ints = 0usize;
        let mut floats = 0usize;
        let mut bools = 0usize;
        let mut texts = 0usize;
        let mut timestamps = 0usize;
        let mut non_null = 0usize;

        for cell in cells {
            match cell {
                CellValue::Int(_) => ints += 1,
                CellValue::Float(_) => floats += 1,
                CellValue::Bool(_) => bools += 1,
                CellValue::Text(_) => texts += 1,
                CellValue::Timestamp(_) => timestamps += 1,
                CellValue::Null => continue,
            }
            non_null += 1;
        }

        if non_null == 0 {
            ColumnType::Unknown
        } else if ints == non_null {
            ColumnType::Integer
        } else if ints + floats == non_null {
            ColumnType::Float
        } else if bools == non_null {
            ColumnType::Boolean
        } else if timestamps == non_null {
            ColumnType::Timestamp
        } else if texts == non_null {
            ColumnType::Text
        } else {
            ColumnType::Text
        }
    }
}

impl Default for ColumnType {
    fn default() -> Self {
        ColumnType::Unknown
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Text => "text",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Unknown => "unknown",
        };
        f.write_str(tag)
    }
}
