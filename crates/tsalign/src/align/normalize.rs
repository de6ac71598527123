//! Sequence normalization with input validation.
//!
//! Min-max is what the aligner uses; the z-score and mean variants are
//! offered for callers preparing sequences themselves.

use super::SequenceRole;
use crate::error::{Result, TsalignError};

/// Rescale a sequence onto `[0, 1]` via `(x - min) / (max - min)`, writing
/// into a freshly allocated buffer. The input is never mutated.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`TsalignError::EmptySequence`] | `values` is empty |
/// | [`TsalignError::NonFiniteValue`] | any value is NaN or infinite |
/// | [`TsalignError::DegenerateRange`] | all values are equal |
pub fn min_max_normalize(values: &[f64], role: SequenceRole) -> Result<Vec<f64>> {
    validate(values, role)?;

    let (min, max) = bounds(values);
    let range = max - min;
    if range == 0.0 {
        return Err(degenerate(values, role, min));
    }

    Ok(values.iter().map(|v| (v - min) / range).collect())
}

/// Center a sequence on its mean and scale by its population standard
/// deviation, `(x - mean) / std`.
///
/// Shares [`min_max_normalize`]'s validation; a constant sequence has zero
/// deviation and is rejected the same way.
pub fn z_score_normalize(values: &[f64], role: SequenceRole) -> Result<Vec<f64>> {
    validate(values, role)?;

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    let std = variance.sqrt();
    if std == 0.0 {
        return Err(degenerate(values, role, values[0]));
    }

    Ok(values.iter().map(|v| (v - mean) / std).collect())
}

/// Center a sequence on its mean and scale by its range,
/// `(x - mean) / (max - min)`.
pub fn mean_normalize(values: &[f64], role: SequenceRole) -> Result<Vec<f64>> {
    validate(values, role)?;

    let (min, max) = bounds(values);
    let range = max - min;
    if range == 0.0 {
        return Err(degenerate(values, role, min));
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Ok(values.iter().map(|v| (v - mean) / range).collect())
}

fn validate(values: &[f64], role: SequenceRole) -> Result<()> {
    if values.is_empty() {
        return Err(TsalignError::EmptySequence { role });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(TsalignError::NonFiniteValue { role, index });
    }
    Ok(())
}

fn bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

fn degenerate(values: &[f64], role: SequenceRole, value: f64) -> TsalignError {
    TsalignError::DegenerateRange {
        role,
        value,
        len: values.len(),
    }
}
