//! Column profiling: semantic type classification and temporal coercion.

mod column;
mod dataset;
mod profiler;
mod types;

pub use column::ColumnProfile;
pub use dataset::DatasetProfile;
pub use profiler::{Profiler, ProfilerConfig, TEMPORAL_KEYWORDS};
pub use types::ColumnType;
