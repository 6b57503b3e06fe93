use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;

use crate::domain::observation::Observation;
use crate::services::rainfall_csv::IngestOptions;
use crate::services::rainfall_yaml::{load_observations, ObservationSourceError};

#[derive(Error, Debug)]
pub enum RainfallPlotError {
    #[error(transparent)]
    Source(#[from] ObservationSourceError),
    #[error("rainfall data is empty")]
    EmptyRainfall,
    #[error("failed to render rainfall plot: {0}")]
    Plot(String),
}

pub fn plot_rainfall_from_file<P: AsRef<Path>>(
    input_path: P,
    output_path: &str,
    options: &IngestOptions,
) -> Result<(), RainfallPlotError> {
    let observations = load_observations(input_path, options)?;
    if observations.is_empty() {
        return Err(RainfallPlotError::EmptyRainfall);
    }
    render_plot_png(output_path, &observations)
}

fn render_plot_png(
    output_path: &str,
    observations: &[Observation],
) -> Result<(), RainfallPlotError> {
    let max_total = observations
        .iter()
        .map(|o| o.total_rainfall)
        .fold(0.0_f64, f64::max);
    let max_y = (max_total * 1.1).max(1.0);
    let max_x = observations.len() as i32;

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| RainfallPlotError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Annual Rainfall", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(80)
        .build_cartesian_2d(0..max_x, 0.0..max_y)
        .map_err(|e| RainfallPlotError::Plot(e.to_string()))?;

    let label_count = observations.len().clamp(1, 12);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Year")
        .y_desc("Total rainfall (mm)")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(label_count)
        .x_label_formatter(&|index| {
            usize::try_from(*index)
                .ok()
                .and_then(|idx| observations.get(idx))
                .map(|o| o.year.to_string())
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| RainfallPlotError::Plot(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled().stroke_width(1);
    chart
        .draw_series(observations.iter().enumerate().map(|(idx, o)| {
            Rectangle::new(
                [(idx as i32, 0.0), (idx as i32 + 1, o.total_rainfall)],
                bar_style,
            )
        }))
        .map_err(|e| RainfallPlotError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| RainfallPlotError::Plot(e.to_string()))?;
    Ok(())
}
