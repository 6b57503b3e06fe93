use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::observation::Observation;

pub const DEFAULT_CITY: &str = "KOTA BANDUNG";

#[derive(Error, Debug)]
pub enum RainfallCsvError {
    #[error("data file not found: {0}")]
    SourceUnavailable(PathBuf),
    #[error("failed to read data file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("dataset is missing required columns: {}", missing.join(", "))]
    SchemaInvalid { missing: Vec<String> },
    #[error("no rows for '{city}' found in the dataset")]
    EmptyDataset { city: String },
    #[error("failed to parse csv data: {0}")]
    Parse(#[from] csv::Error),
}

/// Header names of the four columns the monthly dataset must provide.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub region: String,
    pub year: String,
    pub month: String,
    pub rainfall: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            region: "bps_nama_kabupaten_kota".to_string(),
            year: "tahun".to_string(),
            month: "bulan".to_string(),
            rainfall: "jumlah_curah_hujan".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOptions {
    /// Case-insensitive substring matched against the region column.
    pub city: String,
    pub columns: ColumnNames,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            columns: ColumnNames::default(),
        }
    }
}

struct ColumnPositions {
    region: usize,
    year: usize,
    rainfall: usize,
}

/// Reads monthly rows from a CSV file and sums them into yearly observations,
/// ordered by year.
///
/// # Errors
/// - [`RainfallCsvError::SourceUnavailable`] when the file does not exist.
/// - [`RainfallCsvError::SchemaInvalid`] when a required column is absent.
/// - [`RainfallCsvError::EmptyDataset`] when no row matches the city.
pub fn load_observations_from_csv<P: AsRef<Path>>(
    path: P,
    options: &IngestOptions,
) -> Result<Vec<Observation>, RainfallCsvError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => RainfallCsvError::SourceUnavailable(path.to_path_buf()),
        _ => RainfallCsvError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    observations_from_csv_reader(file, options)
}

pub fn observations_from_csv_reader<R: io::Read>(
    reader: R,
    options: &IngestOptions,
) -> Result<Vec<Observation>, RainfallCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let positions = column_positions(&headers, &options.columns)?;

    let city = options.city.to_lowercase();
    let mut yearly: BTreeMap<i32, f64> = BTreeMap::new();
    let mut city_rows = 0usize;
    let mut dropped_rows = 0usize;
    for record in reader.records() {
        let record = record?;
        let region = record.get(positions.region).unwrap_or_default();
        if !region.to_lowercase().contains(&city) {
            continue;
        }
        city_rows += 1;

        let year = record.get(positions.year).and_then(parse_year);
        let rainfall = record.get(positions.rainfall).and_then(parse_rainfall);
        match (year, rainfall) {
            (Some(year), Some(rainfall)) => *yearly.entry(year).or_insert(0.0) += rainfall,
            _ => {
                dropped_rows += 1;
                debug!(
                    line = ?record.position().map(|p| p.line()),
                    "dropping row without numeric year or rainfall"
                );
            }
        }
    }

    if city_rows == 0 {
        return Err(RainfallCsvError::EmptyDataset {
            city: options.city.clone(),
        });
    }
    if dropped_rows > 0 {
        warn!(dropped_rows, "ignored rows with a non-numeric year or rainfall value");
    }
    info!(city = %options.city, city_rows, years = yearly.len(), "aggregated monthly rainfall");

    Ok(yearly
        .into_iter()
        .map(|(year, total)| Observation::new(year, total))
        .collect())
}

fn column_positions(
    headers: &csv::StringRecord,
    columns: &ColumnNames,
) -> Result<ColumnPositions, RainfallCsvError> {
    let position = |name: &str| headers.iter().position(|header| header == name);
    let region = position(&columns.region);
    let year = position(&columns.year);
    let month = position(&columns.month);
    let rainfall = position(&columns.rainfall);

    match (region, year, month, rainfall) {
        (Some(region), Some(year), Some(_), Some(rainfall)) => Ok(ColumnPositions {
            region,
            year,
            rainfall,
        }),
        _ => {
            let mut missing: Vec<String> = [
                (&columns.region, region),
                (&columns.year, year),
                (&columns.month, month),
                (&columns.rainfall, rainfall),
            ]
            .into_iter()
            .filter(|(_, found)| found.is_none())
            .map(|(name, _)| name.clone())
            .collect();
            missing.sort();
            Err(RainfallCsvError::SchemaInvalid { missing })
        }
    }
}

fn parse_year(value: &str) -> Option<i32> {
    value.parse().ok()
}

fn parse_rainfall(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|rainfall| rainfall.is_finite() && *rainfall >= 0.0)
}
