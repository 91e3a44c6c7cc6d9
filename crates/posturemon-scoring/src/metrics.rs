//! Numeric helpers shared by scoring and history summaries.
//!
//! Every function is total: empty inputs return a neutral value (`0.0` or
//! `None`) instead of panicking or producing `NaN` from a division by zero.

/// Clamp `value` to `[min, max]`. `NaN` collapses to `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Count of values as `f64`. Slices this long are never materialized, so
/// the conversion through `u32` saturates harmlessly.
fn len_f64(values: &[f64]) -> f64 {
    f64::from(u32::try_from(values.len()).unwrap_or(u32::MAX))
}

/// Arithmetic mean; 0 when empty.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / len_f64(values)
}

/// Simple moving average over the trailing `window` values.
pub fn sma(values: &[f64], window: usize) -> f64 {
    let start = values.len().saturating_sub(window);
    values.get(start..).map_or(0.0, average)
}

/// Smallest value, if any.
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().min_by(f64::total_cmp)
}

/// Largest value, if any.
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().max_by(f64::total_cmp)
}
