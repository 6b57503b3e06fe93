use crate::commands::base_commands::{Commands, OutputFormat};
use crate::commands::report_format::format_simulation_report;
use crate::commands::{data_source_name, write_output, CommandError};
use crate::services::forecast::{clamp_trial_count, forecast_from_file, ForecastOptions};
use crate::services::histogram::write_histogram_png;
use crate::services::simulation_types::SimulationReport;

pub fn simulate_command(cmd: Commands) -> Result<(), CommandError> {
    if let Commands::Simulate {
        data,
        handle_outliers,
        output,
        trials,
        seed,
        format,
        histogram,
    } = cmd
    {
        let mut config = data.load_config()?;
        config.handle_outliers |= handle_outliers;
        if let Some(seed) = seed {
            config.seed = seed;
        }
        let input = data.input_path(&config)?;
        let trial_count = clamp_trial_count(
            trials.unwrap_or_else(|| i64::try_from(config.default_trials).unwrap_or(i64::MAX)),
        );

        let options = ForecastOptions::from_config(&config, trial_count);
        let result = forecast_from_file(&input, &options)?;
        let report = SimulationReport::from_result(&result, &data_source_name(&input), config.seed);

        // Nothing is written until the histogram has rendered.
        let contents = render_report(&report, format)?;
        if let Some(histogram_path) = &histogram {
            write_histogram_png(histogram_path, &result.matched_predictions())?;
        }
        if let Err(error) = write_output(&output, contents.as_bytes()) {
            if let Some(histogram_path) = &histogram {
                let _ = std::fs::remove_file(histogram_path);
            }
            return Err(error);
        }

        println!("{}", format_simulation_report(&report));
        println!(
            "Simulation result for {trial_count} trials written to {}",
            output.display()
        );
        if let Some(histogram_path) = histogram {
            println!("Simulation histogram written to {histogram_path}");
        }
    }
    Ok(())
}

fn render_report(report: &SimulationReport, format: OutputFormat) -> Result<String, CommandError> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| CommandError::Serialize(e.to_string()))
        }
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| CommandError::Serialize(e.to_string())),
    }
}
