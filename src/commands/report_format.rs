use crate::services::simulation_types::{IntervalRow, SimulationReport};

pub fn format_simulation_report(report: &SimulationReport) -> String {
    let mut lines = Vec::new();
    lines.push("Rainfall Simulation Report".to_string());
    lines.push(format!("Data source: {}", report.data_source));
    lines.push(format!("Seed: {}", report.seed));
    lines.push(format!("Trials: {}", report.trial_count));
    if report.unmatched_trials > 0 {
        lines.push(format!(
            "Unmatched trials: {} (left out of the mean)",
            report.unmatched_trials
        ));
    }
    lines.push(String::new());
    lines.push(format_distribution_table(&report.interval_table));
    lines.push(String::new());
    lines.push("Simulation:".to_string());
    lines.push("No. | Random | Prediction".to_string());
    lines.push("----|--------|-----------".to_string());
    for row in &report.simulation_results {
        lines.push(format!(
            "{} | {} | {}",
            row.index,
            row.random_number,
            format_thousands(row.prediction)
        ));
    }
    lines.push(String::new());
    if let Some(spread) = &report.spread {
        lines.push(format!(
            "Spread: P5 {} | P50 {} | P95 {}",
            format_thousands(spread.p5),
            format_thousands(spread.p50),
            format_thousands(spread.p95)
        ));
    }
    lines.push(format!(
        "Final prediction: {} mm/year",
        format_thousands(report.final_prediction)
    ));
    lines.push(format!(
        "Daily average: {} mm/day",
        format_thousands(report.daily_average)
    ));

    lines.join("\n")
}

pub fn format_distribution_table(rows: &[IntervalRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push("Interval table:".to_string());
    lines.push("Year | Total rainfall | Probability | Cumulative | Interval".to_string());
    lines.push("-----|----------------|-------------|------------|---------".to_string());
    for row in rows {
        lines.push(format!(
            "{} | {} | {} | {} | {}",
            row.year,
            format_thousands(row.total_rainfall),
            row.probability,
            row.cumulative_probability,
            row.interval
        ));
    }
    lines.join("\n")
}

/// Two decimals with comma-grouped thousands, e.g. `12,345.68`.
pub fn format_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
