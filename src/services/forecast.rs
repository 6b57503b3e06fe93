use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::distribution::DistributionTable;
use crate::domain::observation::Observation;
use crate::services::distribution_builder::{build_distribution, DistributionError, DistributionOptions};
use crate::services::forecast_config::ForecastConfig;
use crate::services::monte_carlo_sampler::{MonteCarloSampler, SimulationError};
use crate::services::rainfall_csv::IngestOptions;
use crate::services::rainfall_yaml::{load_observations, ObservationSourceError};
use crate::services::simulation_types::SimulationResult;

pub const MIN_TRIALS: usize = 1;
pub const MAX_TRIALS: usize = 1000;

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error(transparent)]
    Source(#[from] ObservationSourceError),
    #[error(transparent)]
    Distribution(#[from] DistributionError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

impl ForecastError {
    /// True when the failure points at a defect in table construction rather
    /// than at the input data.
    pub fn is_internal_fault(&self) -> bool {
        matches!(
            self,
            ForecastError::Simulation(SimulationError::InconsistentTable(_))
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOptions {
    pub ingest: IngestOptions,
    pub distribution: DistributionOptions,
    pub seed: u64,
    pub trial_count: usize,
}

impl ForecastOptions {
    pub fn from_config(config: &ForecastConfig, trial_count: usize) -> Self {
        Self {
            ingest: config.ingest_options(),
            distribution: config.distribution_options(),
            seed: config.seed,
            trial_count,
        }
    }
}

/// Floors the requested trial count at 1 and caps it at 1000.
pub fn clamp_trial_count(requested: i64) -> usize {
    let clamped = requested.clamp(MIN_TRIALS as i64, MAX_TRIALS as i64) as usize;
    if clamped as i64 != requested {
        warn!(requested, clamped, "trial count out of range, clamping");
    }
    clamped
}

pub fn forecast_from_file<P: AsRef<Path>>(
    path: P,
    options: &ForecastOptions,
) -> Result<SimulationResult, ForecastError> {
    let observations = load_observations(path, &options.ingest)?;
    forecast_from_observations(&observations, options)
}

/// Builds a fresh distribution table and samples it. Nothing is shared
/// between calls, so concurrent forecasts need no coordination.
pub fn forecast_from_observations(
    observations: &[Observation],
    options: &ForecastOptions,
) -> Result<SimulationResult, ForecastError> {
    let table = build_distribution(observations, &options.distribution)?;
    let sampler = MonteCarloSampler::new(options.seed);
    let result = sampler.run(&table, options.trial_count)?;
    info!(
        years = table.len(),
        seed = options.seed,
        final_prediction = result.final_prediction,
        "forecast complete"
    );
    Ok(result)
}

pub fn distribution_from_file<P: AsRef<Path>>(
    path: P,
    ingest: &IngestOptions,
    distribution: &DistributionOptions,
) -> Result<DistributionTable, ForecastError> {
    let observations = load_observations(path, ingest)?;
    Ok(build_distribution(&observations, distribution)?)
}
