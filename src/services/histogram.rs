use std::collections::BTreeMap;

use plotters::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("failed to render histogram: {0}")]
    Render(String),
}

/// Writes a histogram of simulated annual rainfall to `output_path`.
/// Does nothing for an empty slice.
pub fn write_histogram_png(output_path: &str, predictions: &[f64]) -> Result<(), HistogramError> {
    if predictions.is_empty() {
        return Ok(());
    }
    let bins = bin_predictions(predictions);
    render_histogram_png(output_path, &bins)
}

struct Bins {
    width: f64,
    counts: BTreeMap<i64, usize>,
}

// Square-root rule; identical values fall into a single unit-wide bin.
fn bin_predictions(predictions: &[f64]) -> Bins {
    let min_value = predictions.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_value = predictions
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);

    let range = max_value - min_value;
    let width = if range > f64::EPSILON {
        range / (predictions.len() as f64).sqrt()
    } else {
        1.0
    };

    let mut counts = BTreeMap::new();
    for value in predictions {
        let bucket = (*value / width).round() as i64;
        *counts.entry(bucket).or_insert(0usize) += 1;
    }
    Bins { width, counts }
}

fn render_histogram_png(output_path: &str, bins: &Bins) -> Result<(), HistogramError> {
    let max_count = *bins.counts.values().max().unwrap_or(&1);
    let min_bucket = bins.counts.keys().next().copied().unwrap_or(0) - 1;
    let max_bucket = bins.counts.keys().next_back().copied().unwrap_or(0) + 1;
    let width = bins.width;

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Simulated Annual Rainfall", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(min_bucket..max_bucket, 0..(max_count + 1))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Annual rainfall (mm)")
        .y_desc("Trials")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_label_formatter(&|value| format!("{:.0}", *value as f64 * width))
        .draw()
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    let bar_color = RGBColor(30, 122, 204);
    let bar_style = ShapeStyle::from(&bar_color).filled();
    chart
        .draw_series(bins.counts.iter().map(|(bucket, count)| {
            Rectangle::new([(*bucket, 0), (*bucket + 1, *count)], bar_style)
        }))
        .map_err(|e| HistogramError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| HistogramError::Render(e.to_string()))?;
    Ok(())
}
