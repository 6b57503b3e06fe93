use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::services::distribution_builder::DistributionOptions;
use crate::services::rainfall_csv::{ColumnNames, IngestOptions, DEFAULT_CITY};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_TRIALS: usize = 100;
pub const DEFAULT_OUTLIER_PERCENTILE: f64 = 95.0;

#[derive(Error, Debug)]
pub enum ForecastConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("outlier_percentile must be within 0..=100, got {0}")]
    InvalidPercentile(f64),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Used when no input file is given on the command line.
    pub data_file: Option<PathBuf>,
    pub city: String,
    pub seed: u64,
    pub handle_outliers: bool,
    pub outlier_percentile: f64,
    pub default_trials: usize,
    pub columns: ColumnNames,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            city: DEFAULT_CITY.to_string(),
            seed: DEFAULT_SEED,
            handle_outliers: false,
            outlier_percentile: DEFAULT_OUTLIER_PERCENTILE,
            default_trials: DEFAULT_TRIALS,
            columns: ColumnNames::default(),
        }
    }
}

impl ForecastConfig {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ForecastConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ForecastConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ForecastConfig =
            serde_yaml::from_str(&contents).map_err(|source| ForecastConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` when given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ForecastConfigError> {
        match path {
            Some(path) => Self::from_yaml_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ForecastConfigError> {
        if !(0.0..=100.0).contains(&self.outlier_percentile) {
            return Err(ForecastConfigError::InvalidPercentile(
                self.outlier_percentile,
            ));
        }
        Ok(())
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            city: self.city.clone(),
            columns: self.columns.clone(),
        }
    }

    pub fn distribution_options(&self) -> DistributionOptions {
        if self.handle_outliers {
            DistributionOptions::with_outlier_clipping(self.outlier_percentile)
        } else {
            DistributionOptions::default()
        }
    }
}
