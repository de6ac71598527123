//! Per-column profile record.

use serde::{Deserialize, Serialize};

use super::types::ColumnType;

/// Classification of a single column.
///
/// The flags are deliberately non-exclusive: a low-cardinality text column is
/// both `is_text` and `is_categorical`, and a column named like a time axis
/// keeps `is_temporal` even when its cells failed to coerce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name, surrounding whitespace trimmed.
    pub name: String,
    /// Declared scalar type after any temporal coercion.
    pub column_type: ColumnType,
    /// Declared timestamp type, or the name contains a temporal keyword.
    pub is_temporal: bool,
    /// Integer or float.
    pub is_numeric: bool,
    /// Whole numbers only.
    pub is_integer: bool,
    /// Floating-point (or promoted integer/float mixture).
    pub is_float: bool,
    /// Low-cardinality discrete values.
    pub is_categorical: bool,
    /// Boolean values.
    pub is_boolean: bool,
    /// Text values.
    pub is_text: bool,
}

impl ColumnProfile {
    /// Build a profile from a declared type, deriving all type-driven flags.
    ///
    /// `is_temporal` and `is_categorical` depend on more than the declared
    /// type (name keywords, cardinality), so the profiler sets them.
    pub(crate) fn from_type(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            is_temporal: column_type.is_temporal(),
            is_numeric: column_type.is_numeric(),
            is_integer: column_type == ColumnType::Integer,
            is_float: column_type == ColumnType::Float,
            is_categorical: false,
            is_boolean: column_type == ColumnType::Boolean,
            is_text: column_type == ColumnType::Text,
        }
    }
}
