use thiserror::Error;
use tracing::debug;

use crate::domain::distribution::{
    DistributionEntry, DistributionTable, INTERVAL_MAX, INTERVAL_MIN, INTERVAL_SCALE,
};
use crate::domain::observation::{grand_total, Observation};
use crate::services::percentiles::{interpolated_sorted, sorted_copy};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionError {
    #[error("total rainfall is {total}, it must be greater than zero; the dataset is not valid")]
    InvalidDistribution { total: f64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DistributionOptions {
    /// When set, every total is clipped to this percentile (0-100) of the
    /// observed totals before probabilities are computed.
    pub outlier_percentile: Option<f64>,
}

impl DistributionOptions {
    pub fn with_outlier_clipping(percentile: f64) -> Self {
        Self {
            outlier_percentile: Some(percentile),
        }
    }
}

/// Builds the 000-999 interval table from year-ordered observations.
///
/// Cumulative probabilities are scaled by 1000 and rounded half-to-even; the
/// upper bound is that value minus one and each lower bound follows the
/// previous upper bound. The first lower bound is pinned to 0 and the last
/// upper bound to 999 so rounding drift can never leave a gap at either end.
///
/// # Errors
/// Returns [`DistributionError::InvalidDistribution`] when the (possibly
/// clipped) totals do not sum to a positive finite value, including empty
/// input.
pub fn build_distribution(
    observations: &[Observation],
    options: &DistributionOptions,
) -> Result<DistributionTable, DistributionError> {
    let totals = dampened_totals(observations, options.outlier_percentile);

    let total: f64 = totals.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(DistributionError::InvalidDistribution { total });
    }

    let mut entries = Vec::with_capacity(observations.len());
    let mut cumulative_probability = 0.0;
    let mut previous_upper = INTERVAL_MIN - 1;
    for (observation, total_rainfall) in observations.iter().zip(totals) {
        let probability = total_rainfall / total;
        cumulative_probability += probability;
        let upper_bound = scaled_upper_bound(cumulative_probability);
        entries.push(DistributionEntry {
            year: observation.year,
            total_rainfall,
            probability,
            cumulative_probability,
            lower_bound: previous_upper + 1,
            upper_bound,
        });
        previous_upper = upper_bound;
    }

    if let Some(first) = entries.first_mut() {
        first.lower_bound = INTERVAL_MIN;
    }
    if let Some(last) = entries.last_mut() {
        if last.upper_bound != INTERVAL_MAX {
            debug!(
                year = last.year,
                computed = last.upper_bound,
                "pinning last upper bound to the top of the range"
            );
        }
        last.upper_bound = INTERVAL_MAX;
    }

    debug!(entries = entries.len(), total, "built distribution table");
    Ok(DistributionTable::from_entries(entries))
}

fn scaled_upper_bound(cumulative_probability: f64) -> i32 {
    (cumulative_probability * INTERVAL_SCALE).round_ties_even() as i32 - 1
}

fn dampened_totals(observations: &[Observation], outlier_percentile: Option<f64>) -> Vec<f64> {
    let totals: Vec<f64> = observations.iter().map(|o| o.total_rainfall).collect();
    let Some(percentile) = outlier_percentile else {
        return totals;
    };
    let Some(ceiling) = interpolated_sorted(&sorted_copy(&totals), percentile) else {
        return totals;
    };

    debug!(
        percentile,
        ceiling,
        unclipped_total = grand_total(observations),
        "clipping outlier totals"
    );
    totals.into_iter().map(|value| value.min(ceiling)).collect()
}
