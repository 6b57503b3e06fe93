use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::domain::distribution::{DistributionTable, PartitionFault, INTERVAL_MAX, INTERVAL_MIN};
use crate::services::simulation_types::{SimulationDraw, SimulationResult};

pub const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("trial count must be greater than zero")]
    InvalidTrialCount,
    #[error("internal fault: distribution table does not partition 000-999 ({0})")]
    InconsistentTable(#[from] PartitionFault),
}

/// Samples annual rainfall from a distribution table with a fixed seed.
///
/// Every call to [`MonteCarloSampler::run`] starts a fresh generator from the
/// seed, so equal tables and trial counts always give equal draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloSampler {
    seed: u64,
}

impl MonteCarloSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run(
        &self,
        table: &DistributionTable,
        trial_count: usize,
    ) -> Result<SimulationResult, SimulationError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        run_with_rng(table, trial_count, &mut rng)
    }
}

pub fn run_with_rng<R: Rng + ?Sized>(
    table: &DistributionTable,
    trial_count: usize,
    rng: &mut R,
) -> Result<SimulationResult, SimulationError> {
    if trial_count == 0 {
        return Err(SimulationError::InvalidTrialCount);
    }
    table.check_partition()?;

    let draws: Vec<SimulationDraw> = (1..=trial_count)
        .map(|sequence_index| {
            let random_value = rng.gen_range(INTERVAL_MIN..=INTERVAL_MAX);
            draw_from_table(table, sequence_index, random_value)
        })
        .collect();

    let (final_prediction, unmatched_trials) = aggregate_draws(&draws);
    let daily_average = final_prediction / DAYS_PER_YEAR;
    info!(
        trial_count,
        unmatched_trials,
        final_prediction,
        daily_average,
        "monte carlo run finished"
    );

    Ok(SimulationResult {
        distribution_table: table.clone(),
        draws,
        final_prediction,
        daily_average,
        trial_count,
        unmatched_trials,
    })
}

fn draw_from_table(
    table: &DistributionTable,
    sequence_index: usize,
    random_value: i32,
) -> SimulationDraw {
    let matched = table.lookup(random_value);
    if matched.is_none() {
        error!(sequence_index, random_value, "draw matched no interval");
    }
    debug!(
        sequence_index,
        random_value,
        year = ?matched.map(|entry| entry.year),
        "draw"
    );

    SimulationDraw {
        sequence_index,
        random_value: random_value as u16,
        predicted_value: matched.map(|entry| entry.total_rainfall).unwrap_or(0.0),
        matched: matched.is_some(),
    }
}

/// Mean of the matched predictions, plus the number of unmatched draws.
///
/// Unmatched draws count toward the trial count but not toward the mean's
/// denominator. With no matched draws the prediction is 0.
pub fn aggregate_draws(draws: &[SimulationDraw]) -> (f64, usize) {
    let matched: Vec<f64> = draws
        .iter()
        .filter(|draw| draw.matched)
        .map(|draw| draw.predicted_value)
        .collect();
    let unmatched = draws.len() - matched.len();

    if matched.is_empty() {
        return (0.0, unmatched);
    }
    let mean = matched.iter().sum::<f64>() / matched.len() as f64;
    (mean, unmatched)
}
