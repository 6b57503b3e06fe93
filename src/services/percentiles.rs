//! Percentile helpers for already-sorted slices.
//!
//! - Empty input => `None`.
//! - `percentile <= 0` => first element.
//! - `percentile >= 100` => last element.
//! - Otherwise we compute a position within `[0, len-1]` and either round it
//!   to the nearest index or interpolate between its neighbours.

/// Returns the nearest-rank percentile value from a slice sorted in
/// ascending order.
pub fn value_sorted<T: Copy>(sorted_values: &[T], percentile: f64) -> Option<T> {
    if sorted_values.is_empty() {
        return None;
    }

    let index = if percentile <= 0.0 {
        0
    } else if percentile >= 100.0 {
        sorted_values.len() - 1
    } else {
        position(sorted_values.len(), percentile).round() as usize
    };

    sorted_values.get(index).copied()
}

/// Linearly interpolated percentile, matching the usual "linear" quantile
/// definition used by dataframe libraries.
pub fn interpolated_sorted(sorted_values: &[f64], percentile: f64) -> Option<f64> {
    let first = *sorted_values.first()?;
    let last = *sorted_values.last()?;
    if percentile <= 0.0 {
        return Some(first);
    }
    if percentile >= 100.0 {
        return Some(last);
    }

    let position = position(sorted_values.len(), percentile);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    let low_value = sorted_values[lower];
    let high_value = sorted_values[upper];
    Some(low_value + (high_value - low_value) * fraction)
}

/// Sorts a copy of `values` (NaN-free input assumed) for the helpers above.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

fn position(len: usize, percentile: f64) -> f64 {
    (percentile / 100.0) * (len as f64 - 1.0)
}
