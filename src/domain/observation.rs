use serde::{Deserialize, Serialize};

/// One year's aggregated rainfall total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    pub total_rainfall: f64,
}

impl Observation {
    pub fn new(year: i32, total_rainfall: f64) -> Self {
        Self {
            year,
            total_rainfall,
        }
    }
}

pub fn grand_total(observations: &[Observation]) -> f64 {
    observations.iter().map(|o| o.total_rainfall).sum()
}
