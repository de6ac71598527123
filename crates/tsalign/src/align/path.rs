//! Warping path types.

use serde::{Deserialize, Serialize};

/// A single step in a warping path, mapping index `a` in the baseline
/// sequence to index `b` in the comparison sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpingStep {
    /// Index into the baseline sequence.
    pub a: usize,
    /// Index into the comparison sequence.
    pub b: usize,
}

/// An ordered sequence of warping steps from `(0, 0)` to `(n-1, m-1)`,
/// monotonically non-decreasing in both coordinates; consecutive steps
/// differ by one of `(1,0)`, `(0,1)`, `(1,1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpingPath(Vec<WarpingStep>);

impl WarpingPath {
    pub(crate) fn new(steps: Vec<WarpingStep>) -> Self {
        Self(steps)
    }

    /// The warping steps as a slice.
    pub fn steps(&self) -> &[WarpingStep] {
        &self.0
    }

    /// Number of steps in the path.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the path contains no steps.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a WarpingPath {
    type Item = &'a WarpingStep;
    type IntoIter = std::slice::Iter<'a, WarpingStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
