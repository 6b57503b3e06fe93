use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_distribution_table;
use crate::commands::{write_output, CommandError};
use crate::services::forecast::distribution_from_file;
use crate::services::simulation_types::interval_rows;

pub fn distribution_command(cmd: Commands) -> Result<(), CommandError> {
    if let Commands::Distribution {
        data,
        handle_outliers,
        output,
    } = cmd
    {
        let mut config = data.load_config()?;
        config.handle_outliers |= handle_outliers;
        let input = data.input_path(&config)?;

        let table = distribution_from_file(
            &input,
            &config.ingest_options(),
            &config.distribution_options(),
        )?;
        let rows = interval_rows(&table);
        println!("{}", format_distribution_table(&rows));

        if let Some(output) = output {
            let yaml =
                serde_yaml::to_string(&rows).map_err(|e| CommandError::Serialize(e.to_string()))?;
            write_output(&output, yaml.as_bytes())?;
            println!("Interval table written to {}", output.display());
        }
    }
    Ok(())
}
