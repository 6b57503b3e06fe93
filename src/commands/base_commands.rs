use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::commands::CommandError;
use crate::services::forecast_config::ForecastConfig;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the rainfall data comes from and how it is filtered.
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Monthly rainfall CSV or yearly observations YAML (falls back to `data_file` in the config)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Forecast config YAML
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Region to keep from a monthly CSV (case-insensitive substring)
    #[arg(long)]
    pub city: Option<String>,
}

impl DataArgs {
    /// Loads the config file, if any, and applies command-line overrides.
    pub fn load_config(&self) -> Result<ForecastConfig, CommandError> {
        let mut config = ForecastConfig::load(self.config.as_deref())?;
        if let Some(city) = &self.city {
            config.city = city.clone();
        }
        Ok(config)
    }

    pub fn input_path(&self, config: &ForecastConfig) -> Result<PathBuf, CommandError> {
        self.input
            .clone()
            .or_else(|| config.data_file.clone())
            .ok_or(CommandError::MissingInput)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sum monthly rainfall into yearly totals and serialize to YAML
    Aggregate {
        #[command(flatten)]
        data: DataArgs,
        /// Output YAML file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Build and print the 000-999 interval table
    Distribution {
        #[command(flatten)]
        data: DataArgs,
        /// Clip yearly totals to the configured percentile first
        #[arg(long)]
        handle_outliers: bool,
        /// Optional output YAML file for the table
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Predict annual rainfall with a seeded Monte Carlo simulation
    Simulate {
        #[command(flatten)]
        data: DataArgs,
        /// Clip yearly totals to the configured percentile first
        #[arg(long)]
        handle_outliers: bool,
        /// Output file for the full result
        #[arg(short, long)]
        output: PathBuf,
        /// Number of trials, clamped to 1..=1000 (defaults to the config value)
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        trials: Option<i64>,
        /// Random seed (defaults to the config value)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Output file format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
        /// Optional PNG histogram of the simulated values
        #[arg(long)]
        histogram: Option<String>,
    },
    /// Plot yearly rainfall totals into a PNG chart
    PlotRainfall {
        #[command(flatten)]
        data: DataArgs,
        /// Output PNG file
        #[arg(short, long)]
        output: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
