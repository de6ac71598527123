//! Payload parsers: row-oriented JSON records and delimited text.

use std::io::{BufRead, BufReader};

use indexmap::IndexMap;
use log::debug;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::source::{CellValue, Column, SourceMetadata, TabularDataset};
use crate::error::{Result, TsalignError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parse a row-oriented JSON payload (an array of flat objects) into a
/// rectangular dataset.
///
/// Field order is preserved as first seen across records. A field missing
/// from a record becomes [`CellValue::Null`] in that row, so ragged records
/// still produce a rectangular dataset.
///
/// # Errors
///
/// Returns [`TsalignError::DataFormat`] when the payload is not an array of
/// objects or a field holds a nested array/object.
pub fn parse_records(payload: &str) -> Result<TabularDataset> {
    let value: Value = serde_json::from_str(payload)?;

    let Value::Array(records) = value else {
        return Err(TsalignError::DataFormat(
            "expected a JSON array of records".to_string(),
        ));
    };

    // Column name -> cells collected so far. IndexMap keeps first-seen order.
    let mut columns: IndexMap<String, Vec<CellValue>> = IndexMap::new();

    for (row, record) in records.iter().enumerate() {
        let Value::Object(fields) = record else {
            return Err(TsalignError::DataFormat(format!(
                "record {row} is not a JSON object"
            )));
        };

        for (name, value) in fields {
            let cell = json_scalar(value).ok_or_else(|| {
                TsalignError::DataFormat(format!(
                    "field '{name}' in record {row} is not a scalar"
                ))
            })?;
            // Backfill Nulls if this column first appears mid-payload.
            let cells = columns.entry(name.clone()).or_insert_with(|| {
                let mut backfill = Vec::with_capacity(records.len());
                backfill.resize(row, CellValue::Null);
                backfill
            });
            cells.push(cell);
        }

        // Columns absent from this record get a Null for this row.
        for cells in columns.values_mut() {
            if cells.len() == row {
                cells.push(CellValue::Null);
            }
        }
    }

    if columns.is_empty() {
        return Err(TsalignError::DataFormat(
            "payload contains no columns".to_string(),
        ));
    }

    debug!(
        "parsed {} records into {} columns",
        records.len(),
        columns.len()
    );

    TabularDataset::new(
        columns
            .into_iter()
            .map(|(name, values)| Column::new(name, values))
            .collect(),
    )
}

/// Convert a JSON scalar to a cell. Nested values are rejected by the caller.
fn json_scalar(value: &Value) -> Option<CellValue> {
    match value {
        Value::Null => Some(CellValue::Null),
        Value::Bool(b) => Some(CellValue::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(CellValue::Int(i))
            } else {
                n.as_f64().map(CellValue::Float)
            }
        }
        Value::String(s) => Some(CellValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parser configuration for delimited text payloads.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the payload has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses delimited tabular payloads into typed datasets.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a delimited payload and return the typed dataset plus metadata.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<(TabularDataset, SourceMetadata)> {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.to_string()).collect()
        } else {
            Vec::new()
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows
                && row_idx >= max
            {
                break;
            }
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        let headers = if headers.is_empty() {
            match rows.first() {
                Some(first) => (0..first.len()).map(|i| format!("column_{}", i + 1)).collect(),
                None => {
                    return Err(TsalignError::DataFormat(
                        "no data rows found".to_string(),
                    ))
                }
            }
        } else {
            headers
        };

        if headers.is_empty() {
            return Err(TsalignError::DataFormat("no columns found".to_string()));
        }

        // Rectangularize: pad short rows, truncate long ones.
        let expected = headers.len();
        for row in &mut rows {
            while row.len() < expected {
                row.push(String::new());
            }
            row.truncate(expected);
        }

        let columns: Vec<Column> = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let raw: Vec<&str> = rows.iter().map(|r| r[i].as_str()).collect();
                Column::new(name.clone(), type_column(&raw))
            })
            .collect();

        let dataset = TabularDataset::new(columns)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let metadata = SourceMetadata {
            hash,
            size_bytes: bytes.len() as u64,
            format,
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            parsed_at: chrono::Utc::now(),
        };

        Ok((dataset, metadata))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a raw text value represents a missing/null value.
fn is_null_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nan")
}

/// Type a raw text column as a whole: every non-null value must agree on a
/// scalar type or the column stays textual.
fn type_column(raw: &[&str]) -> Vec<CellValue> {
    let non_null: Vec<&str> = raw
        .iter()
        .copied()
        .filter(|v| !is_null_value(v))
        .collect();

    let all_int = !non_null.is_empty()
        && non_null.iter().all(|v| v.trim().parse::<i64>().is_ok());
    let all_float = !non_null.is_empty()
        && non_null.iter().all(|v| v.trim().parse::<f64>().is_ok());
    let all_bool = !non_null.is_empty()
        && non_null
            .iter()
            .all(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "false"));

    raw.iter()
        .map(|v| {
            if is_null_value(v) {
                CellValue::Null
            } else if all_int {
                CellValue::Int(v.trim().parse().unwrap_or_default())
            } else if all_float {
                CellValue::Float(v.trim().parse().unwrap_or_default())
            } else if all_bool {
                CellValue::Bool(v.trim().eq_ignore_ascii_case("true"))
            } else {
                CellValue::Text(v.to_string())
            }
        })
        .collect()
}

/// Detect the delimiter by analyzing the first few non-empty lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(TsalignError::DataFormat("empty payload".to_string()));
    }

    // Score each candidate by its quote-aware per-line counts and keep the
    // best one. Single-column payloads fall through to the comma default.
    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &candidate in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|l| count_delimiter_in_line(l, candidate))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // A consistent count dominates; a near-consistent one still beats a
        // ragged one. Tabs get a slight bonus as they rarely occur in data.
        let score = if consistent {
            first_count * 1000 + (if candidate == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = candidate;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, ignoring any inside quoted fields.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_preserve_field_order() {
        let ds = parse_records(r#"[{"t": 1, "v": 2.5}, {"t": 2, "v": 3.5}]"#).unwrap();
        let names: Vec<&str> = ds.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["t", "v"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.columns()[1].values[0], CellValue::Float(2.5));
    }

    #[test]
    fn missing_fields_become_null() {
        let ds = parse_records(r#"[{"a": 1, "b": 2}, {"a": 3}, {"b": 4, "c": 5}]"#).unwrap();
        assert_eq!(ds.column_count(), 3);
        let b = ds.column("b").unwrap();
        assert_eq!(b.values, vec![CellValue::Int(2), CellValue::Null, CellValue::Int(4)]);
        let c = ds.column("c").unwrap();
        assert_eq!(c.values, vec![CellValue::Null, CellValue::Null, CellValue::Int(5)]);
    }

    #[test]
    fn rejects_non_array_payload() {
        assert!(matches!(
            parse_records(r#"{"a": 1}"#),
            Err(TsalignError::DataFormat(_))
        ));
    }

    #[test]
    fn rejects_nested_field() {
        assert!(matches!(
            parse_records(r#"[{"a": [1, 2]}]"#),
            Err(TsalignError::DataFormat(_))
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            parse_records("not json"),
            Err(TsalignError::Json(_))
        ));
    }

    #[test]
    fn csv_columns_are_typed() {
        let payload = b"t,value,label\n1,0.5,on\n2,1.5,off\n3,2.5,on\n";
        let (ds, meta) = Parser::new().parse_bytes(payload).unwrap();
        assert_eq!(meta.format, "csv");
        assert_eq!(ds.columns()[0].values[0], CellValue::Int(1));
        assert_eq!(ds.columns()[1].values[2], CellValue::Float(2.5));
        assert_eq!(ds.columns()[2].values[0], CellValue::Text("on".into()));
    }

    #[test]
    fn quoted_fields_do_not_confuse_detection() {
        let payload = b"name,desc,value\nalpha,\"x, y\",1.5\nbeta,\"p, q\",2.5\n";
        let (ds, meta) = Parser::new().parse_bytes(payload).unwrap();
        assert_eq!(meta.format, "csv");
        assert_eq!(ds.column_count(), 3);
        assert_eq!(ds.columns()[1].values[0], CellValue::Text("x, y".into()));
        assert_eq!(ds.columns()[2].values[1], CellValue::Float(2.5));
    }

    #[test]
    fn delimiter_counts_skip_quoted_sections() {
        assert_eq!(count_delimiter_in_line("a,\"x, y\",b", b','), 2);
        assert_eq!(count_delimiter_in_line("\"a,b,c\"", b','), 0);
        assert_eq!(count_delimiter_in_line("a\t\"x\ty\"\tb", b'\t'), 2);
    }

    #[test]
    fn tsv_auto_detected() {
        let payload = b"a\tb\n1\t2\n";
        let (_, meta) = Parser::new().parse_bytes(payload).unwrap();
        assert_eq!(meta.format, "tsv");
    }

    #[test]
    fn null_markers_become_null_cells() {
        let payload = b"v\n1\nNA\n3\n";
        let (ds, _) = Parser::new().parse_bytes(payload).unwrap();
        assert_eq!(
            ds.columns()[0].values,
            vec![CellValue::Int(1), CellValue::Null, CellValue::Int(3)]
        );
    }

    #[test]
    fn metadata_hash_is_stable() {
        let payload = b"a,b\n1,2\n";
        let (_, m1) = Parser::new().parse_bytes(payload).unwrap();
        let (_, m2) = Parser::new().parse_bytes(payload).unwrap();
        assert_eq!(m1.hash, m2.hash);
        assert!(m1.hash.starts_with("sha256:"));
    }
}
