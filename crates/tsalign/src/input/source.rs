//! In-memory tabular dataset and source metadata.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TsalignError};

/// A single scalar cell in a tabular dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Whole number.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Parsed timestamp (naive; upstream producers do not carry offsets).
    /// Listed before `Text` so untagged deserialization tries it first.
    Timestamp(NaiveDateTime),
    /// Text value.
    Text(String),
    /// Missing value marker (the NaT equivalent).
    Null,
}

impl CellValue {
    /// Returns true if this cell is the missing-value marker.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Render the cell as text, the way temporal coercion sees it.
    ///
    /// Returns `None` for `Null`, which coercion passes through unchanged.
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Int(v) => Some(v.to_string()),
            CellValue::Float(v) => Some(v.to_string()),
            CellValue::Bool(v) => Some(v.to_string()),
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Timestamp(ts) => Some(ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()),
            CellValue::Null => None,
        }
    }

    /// Numeric view of the cell. `Null` maps to NaN so that downstream
    /// validation can report the exact offending index.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Null => Some(f64::NAN),
            _ => None,
        }
    }
}

/// A named, ordered column of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name as supplied by the source.
    pub name: String,
    /// Cell values in row order.
    pub values: Vec<CellValue>,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// An ordered collection of equal-length columns.
///
/// The shape is fixed at construction; the profiler may rewrite a temporal
/// column's values in place but never changes row or column counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularDataset {
    columns: Vec<Column>,
}

impl TabularDataset {
    /// Create a dataset, validating that all columns share the same length.
    ///
    /// # Errors
    ///
    /// Returns [`TsalignError::ShapeMismatch`] naming the first column whose
    /// length differs from the first column's, and
    /// [`TsalignError::DataFormat`] if no columns are given.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let Some(first) = columns.first() else {
            return Err(TsalignError::DataFormat(
                "dataset must have at least one column".to_string(),
            ));
        };
        let expected = first.values.len();
        for col in &columns {
            if col.values.len() != expected {
                return Err(TsalignError::ShapeMismatch {
                    column: col.name.clone(),
                    expected,
                    actual: col.values.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Number of rows (all columns share it by construction).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Mutable access for in-place temporal coercion.
    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Metadata about a parsed raw payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// SHA-256 hash of the payload bytes.
    pub hash: String,
    /// Payload size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the payload was parsed.
    pub parsed_at: DateTime<Utc>,
}
