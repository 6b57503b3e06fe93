pub mod aggregate_cmd;
pub mod base_commands;
pub mod completions_cmd;
pub mod distribution_cmd;
pub mod plot_rainfall_cmd;
pub mod report_format;
pub mod simulate_cmd;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::services::forecast::ForecastError;
use crate::services::forecast_config::ForecastConfigError;
use crate::services::histogram::HistogramError;
use crate::services::rainfall_plot::RainfallPlotError;
use crate::services::rainfall_yaml::ObservationSourceError;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("no input file given; pass --input or set data_file in the config")]
    MissingInput,
    #[error(transparent)]
    Config(#[from] ForecastConfigError),
    #[error(transparent)]
    Source(#[from] ObservationSourceError),
    #[error(transparent)]
    Forecast(#[from] ForecastError),
    #[error(transparent)]
    Plot(#[from] RainfallPlotError),
    #[error(transparent)]
    Histogram(#[from] HistogramError),
    #[error("failed to serialize output: {0}")]
    Serialize(String),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl CommandError {
    pub fn is_internal_fault(&self) -> bool {
        matches!(self, CommandError::Forecast(error) if error.is_internal_fault())
    }
}

pub(crate) fn write_output(path: &Path, contents: &[u8]) -> Result<(), CommandError> {
    std::fs::write(path, contents).map_err(|source| CommandError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn data_source_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
