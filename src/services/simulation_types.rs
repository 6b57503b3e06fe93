use serde::Serialize;

use crate::domain::distribution::{DistributionEntry, DistributionTable};
use crate::services::percentiles::{sorted_copy, value_sorted};

/// One trial: a three-digit draw and the annual total it maps to.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulationDraw {
    pub sequence_index: usize,
    pub random_value: u16,
    pub predicted_value: f64,
    /// False when no interval contained `random_value`. Such a draw records
    /// a prediction of 0 and is left out of the mean.
    pub matched: bool,
}

#[derive(Serialize, Debug, Clone)]
pub struct SimulationResult {
    pub distribution_table: DistributionTable,
    pub draws: Vec<SimulationDraw>,
    pub final_prediction: f64,
    pub daily_average: f64,
    pub trial_count: usize,
    pub unmatched_trials: usize,
}

impl SimulationResult {
    pub fn matched_predictions(&self) -> Vec<f64> {
        self.draws
            .iter()
            .filter(|draw| draw.matched)
            .map(|draw| draw.predicted_value)
            .collect()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IntervalRow {
    pub year: i32,
    pub total_rainfall: f64,
    pub probability: String,
    pub cumulative_probability: String,
    pub lower_bound: i32,
    pub upper_bound: i32,
    pub interval: String,
}

impl From<&DistributionEntry> for IntervalRow {
    fn from(entry: &DistributionEntry) -> Self {
        Self {
            year: entry.year,
            total_rainfall: entry.total_rainfall,
            probability: format!("{:.4}", entry.probability),
            cumulative_probability: format!("{:.4}", entry.cumulative_probability),
            lower_bound: entry.lower_bound,
            upper_bound: entry.upper_bound,
            interval: format!("{:03} - {:03}", entry.lower_bound, entry.upper_bound),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DrawRow {
    pub index: usize,
    pub random_number: String,
    pub prediction: f64,
}

impl From<&SimulationDraw> for DrawRow {
    fn from(draw: &SimulationDraw) -> Self {
        Self {
            index: draw.sequence_index,
            random_number: format!("{:03}", draw.random_value),
            prediction: draw.predicted_value,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictionSpread {
    pub p5: f64,
    pub p50: f64,
    pub p95: f64,
}

#[derive(Serialize, Debug, Clone)]
pub struct SimulationReport {
    pub data_source: String,
    pub seed: u64,
    pub trial_count: usize,
    pub unmatched_trials: usize,
    pub final_prediction: f64,
    pub daily_average: f64,
    pub spread: Option<PredictionSpread>,
    pub interval_table: Vec<IntervalRow>,
    pub simulation_results: Vec<DrawRow>,
}

impl SimulationReport {
    pub fn from_result(result: &SimulationResult, data_source: &str, seed: u64) -> Self {
        Self {
            data_source: data_source.to_string(),
            seed,
            trial_count: result.trial_count,
            unmatched_trials: result.unmatched_trials,
            final_prediction: result.final_prediction,
            daily_average: result.daily_average,
            spread: prediction_spread(&result.matched_predictions()),
            interval_table: interval_rows(&result.distribution_table),
            simulation_results: result.draws.iter().map(DrawRow::from).collect(),
        }
    }
}

pub fn interval_rows(table: &DistributionTable) -> Vec<IntervalRow> {
    table.entries().iter().map(IntervalRow::from).collect()
}

fn prediction_spread(predictions: &[f64]) -> Option<PredictionSpread> {
    let sorted = sorted_copy(predictions);
    Some(PredictionSpread {
        p5: value_sorted(&sorted, 5.0)?,
        p50: value_sorted(&sorted, 50.0)?,
        p95: value_sorted(&sorted, 95.0)?,
    })
}
