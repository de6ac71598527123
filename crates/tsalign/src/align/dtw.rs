//! DTW alignment: cost matrices, backtracking, and the result type.

use log::debug;
use serde::{Deserialize, Serialize};

use super::matrix::Matrix;
use super::normalize::min_max_normalize;
use super::path::{WarpingPath, WarpingStep};
use super::SequenceRole;
use crate::error::Result;

/// Result of aligning two sequences.
///
/// Value semantics only: holds no reference to the input sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentResult {
    /// The optimal warping path from `(0, 0)` to `(n-1, m-1)`.
    pub path: WarpingPath,
    /// Cumulative cost at each path step, in path order.
    pub cumulative_costs: Vec<f64>,
    /// Cumulative cost at the final cell.
    pub total_distance: f64,
}

/// Stateless DTW aligner. Each [`align`][DtwAligner::align] call is an
/// independent, deterministic computation; the `O(n * m)` matrices live only
/// for the duration of the call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DtwAligner;

impl DtwAligner {
    /// Create an aligner.
    pub fn new() -> Self {
        Self
    }

    /// Align two numeric sequences and return the warping path, per-step
    /// cumulative costs, and total distance.
    ///
    /// Each input is min-max normalized onto a fresh buffer; the local cost
    /// is the absolute difference of normalized values. The cumulative
    /// matrix seeds every cell of row 0 and column 0 except the origin to
    /// `+inf`, which forces the path to originate at `(0, 0)`; seeding by
    /// cumulative sum instead would change both distances and paths.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TsalignError::EmptySequence`] | either input is empty |
    /// | [`TsalignError::NonFiniteValue`] | either input holds NaN/infinity |
    /// | [`TsalignError::DegenerateRange`] | either input is constant |
    ///
    /// [`TsalignError::EmptySequence`]: crate::error::TsalignError::EmptySequence
    /// [`TsalignError::NonFiniteValue`]: crate::error::TsalignError::NonFiniteValue
    /// [`TsalignError::DegenerateRange`]: crate::error::TsalignError::DegenerateRange
    pub fn align(&self, baseline: &[f64], comparison: &[f64]) -> Result<AlignmentResult> {
        let a = min_max_normalize(baseline, SequenceRole::Baseline)?;
        let b = min_max_normalize(comparison, SequenceRole::Comparison)?;

        let n = a.len();
        let m = b.len();
        debug!("aligning {n}x{m} sequences");

        // Local cost: absolute difference of normalized values.
        let mut cost = Matrix::filled(n, m, 0.0);
        for i in 0..n {
            for j in 0..m {
                cost.set(i, j, (a[i] - b[j]).abs());
            }
        }

        let cumulative = cumulative_matrix(&cost);
        let path = backtrack(&cumulative);

        let cumulative_costs: Vec<f64> = path
            .steps()
            .iter()
            .map(|step| cumulative.get(step.a, step.b))
            .collect();
        let total_distance = cumulative.get(n - 1, m - 1);
        debug!("DTW distance: {total_distance}");

        Ok(AlignmentResult {
            path,
            cumulative_costs,
            total_distance,
        })
    }
}

/// Build the cumulative cost matrix.
///
/// `D[0][0] = cost[0][0]`; the rest of row 0 and column 0 stay `+inf`;
/// interior cells take `cost[i][j] + min(D[i-1][j], D[i][j-1], D[i-1][j-1])`.
fn cumulative_matrix(cost: &Matrix) -> Matrix {
    let n = cost.rows();
    let m = cost.cols();
    let mut cumulative = Matrix::filled(n, m, f64::INFINITY);
    cumulative.set(0, 0, cost.get(0, 0));

    for i in 1..n {
        for j in 1..m {
            let best = cumulative
                .get(i - 1, j)
                .min(cumulative.get(i, j - 1))
                .min(cumulative.get(i - 1, j - 1));
            cumulative.set(i, j, cost.get(i, j) + best);
        }
    }

    cumulative
}

/// Backtrack the optimal path from `(n-1, m-1)` to `(0, 0)` inclusive.
///
/// Tie-break is the first minimum in the fixed candidate order up `(i-1, j)`,
/// left `(i, j-1)`, diagonal `(i-1, j-1)`. Swapping this order changes which
/// of several equal-cost paths is reported.
fn backtrack(cumulative: &Matrix) -> WarpingPath {
    let mut i = cumulative.rows() - 1;
    let mut j = cumulative.cols() - 1;
    let mut steps = vec![WarpingStep { a: i, b: j }];

    while i > 0 || j > 0 {
        if i == 0 {
            j -= 1;
        } else if j == 0 {
            i -= 1;
        } else {
            let up = cumulative.get(i - 1, j);
            let left = cumulative.get(i, j - 1);
            let diagonal = cumulative.get(i - 1, j - 1);

            if up <= left && up <= diagonal {
                i -= 1;
            } else if left <= diagonal {
                j -= 1;
            } else {
                i -= 1;
                j -= 1;
            }
        }
        steps.push(WarpingStep { a: i, b: j });
    }

    steps.reverse();
    WarpingPath::new(steps)
}
