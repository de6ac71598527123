//! tsalign: column profiling and DTW alignment for tabular time-series data.
//!
//! The crate has two cooperating components, consumed leaf-first:
//!
//! - **Column profiler**: classifies each column of an in-memory tabular
//!   dataset (numeric, temporal, categorical, boolean, text), recovers which
//!   column encodes time, and coerces temporal columns to real timestamps
//!   with sub-second precision normalized to six digits.
//! - **DTW aligner**: min-max normalizes two numeric sequences, builds the
//!   cumulative cost matrix, backtracks the minimum-cost warping path, and
//!   reports the path, per-step cumulative costs, and total distance.
//!
//! Both are pure, synchronous computations with no I/O; callers own
//! serialization, caching, and transport.
//!
//! # Example
//!
//! ```
//! use tsalign::{AlignmentEngine, parse_records};
//!
//! let mut baseline = parse_records(
//!     r#"[{"Time_Stamp": "2024-01-01 00:00:00.1", "value": 0.0},
//!         {"Time_Stamp": "2024-01-01 00:01:00.2", "value": 1.0}]"#,
//! )?;
//! let mut comparison = parse_records(
//!     r#"[{"Time_Stamp": "2024-01-01 00:00:00", "value": 0.0},
//!         {"Time_Stamp": "2024-01-01 00:01:00", "value": 1.0}]"#,
//! )?;
//!
//! let engine = AlignmentEngine::new();
//! let alignment = engine.align_datasets(&mut baseline, &mut comparison)?;
//!
//! assert_eq!(alignment.result.total_distance, 0.0);
//! # Ok::<(), tsalign::TsalignError>(())
//! ```

pub mod align;
pub mod error;
pub mod input;
pub mod profile;

mod engine;

pub use align::{
    mean_normalize, min_max_normalize, z_score_normalize, AlignmentResult, DtwAligner,
    SequenceRole, WarpingPath, WarpingStep,
};
pub use engine::{AlignmentEngine, DatasetAlignment};
pub use error::{Result, TsalignError};
pub use input::{parse_records, CellValue, Column, Parser, ParserConfig, SourceMetadata, TabularDataset};
pub use profile::{ColumnProfile, ColumnType, DatasetProfile, Profiler, ProfilerConfig};
