use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::observation::Observation;
use crate::services::rainfall_csv::{load_observations_from_csv, IngestOptions, RainfallCsvError};

#[derive(Error, Debug)]
pub enum RainfallYamlError {
    #[error("data file not found: {0}")]
    SourceUnavailable(PathBuf),
    #[error("failed to read observations file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse observations yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("year {0} appears more than once")]
    DuplicateYear(i32),
    #[error("year {year} has negative total rainfall")]
    NegativeRainfall { year: i32 },
    #[error("year {year} has a non-finite total rainfall")]
    NonFiniteRainfall { year: i32 },
}

#[derive(Error, Debug)]
pub enum ObservationSourceError {
    #[error(transparent)]
    Csv(#[from] RainfallCsvError),
    #[error(transparent)]
    Yaml(#[from] RainfallYamlError),
}

#[derive(Serialize, Deserialize)]
struct ObservationRecord {
    year: i32,
    total_rainfall: f64,
}

pub fn serialize_observations_to_yaml<W: Write>(
    writer: &mut W,
    data: &[Observation],
) -> io::Result<()> {
    let records: Vec<ObservationRecord> = data
        .iter()
        .map(|o| ObservationRecord {
            year: o.year,
            total_rainfall: o.total_rainfall,
        })
        .collect();

    let yaml = serde_yaml::to_string(&records).map_err(io::Error::other)?;
    writer.write_all(yaml.as_bytes())
}

/// Parses yearly records and returns them sorted by year.
pub fn deserialize_observations_from_yaml_str(
    input: &str,
) -> Result<Vec<Observation>, RainfallYamlError> {
    let records: Vec<ObservationRecord> = serde_yaml::from_str(input)?;
    let mut observations: Vec<Observation> = records
        .into_iter()
        .map(|record| {
            if !record.total_rainfall.is_finite() {
                Err(RainfallYamlError::NonFiniteRainfall { year: record.year })
            } else if record.total_rainfall < 0.0 {
                Err(RainfallYamlError::NegativeRainfall { year: record.year })
            } else {
                Ok(Observation::new(record.year, record.total_rainfall))
            }
        })
        .collect::<Result<_, _>>()?;

    observations.sort_by_key(|o| o.year);
    if let Some(pair) = observations.windows(2).find(|pair| pair[0].year == pair[1].year) {
        return Err(RainfallYamlError::DuplicateYear(pair[0].year));
    }
    Ok(observations)
}

pub fn load_observations_from_yaml_file(path: &Path) -> Result<Vec<Observation>, RainfallYamlError> {
    let contents = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => RainfallYamlError::SourceUnavailable(path.to_path_buf()),
        _ => RainfallYamlError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    deserialize_observations_from_yaml_str(&contents)
}

/// Loads yearly observations from a `.yaml`/`.yml` file, or aggregates them
/// from a monthly CSV file for any other extension.
pub fn load_observations<P: AsRef<Path>>(
    path: P,
    options: &IngestOptions,
) -> Result<Vec<Observation>, ObservationSourceError> {
    let path = path.as_ref();
    if is_yaml_file(path) {
        Ok(load_observations_from_yaml_file(path)?)
    } else {
        Ok(load_observations_from_csv(path, options)?)
    }
}

fn is_yaml_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}
