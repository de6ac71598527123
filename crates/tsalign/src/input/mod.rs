//! Input parsing and in-memory dataset types.

mod parser;
mod source;

pub use parser::{parse_records, Parser, ParserConfig};
pub use source::{CellValue, Column, SourceMetadata, TabularDataset};
