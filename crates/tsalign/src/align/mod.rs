//! Dynamic Time Warping alignment of numeric sequences.

mod dtw;
mod matrix;
mod normalize;
mod path;

pub use dtw::{AlignmentResult, DtwAligner};
pub use normalize::{mean_normalize, min_max_normalize, z_score_normalize};
pub use path::{WarpingPath, WarpingStep};

use serde::{Deserialize, Serialize};

/// Which of the two alignment inputs an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceRole {
    /// The first (reference) sequence.
    Baseline,
    /// The second (post-change) sequence.
    Comparison,
}

impl std::fmt::Display for SequenceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceRole::Baseline => f.write_str("baseline"),
            SequenceRole::Comparison => f.write_str("comparison"),
        }
    }
}
