use crate::commands::base_commands::Commands;
use crate::commands::{write_output, CommandError};
use crate::services::rainfall_yaml::{load_observations, serialize_observations_to_yaml};

pub fn aggregate_command(cmd: Commands) -> Result<(), CommandError> {
    if let Commands::Aggregate { data, output } = cmd {
        let config = data.load_config()?;
        let input = data.input_path(&config)?;
        let observations = load_observations(&input, &config.ingest_options())?;

        let mut buffer = Vec::new();
        serialize_observations_to_yaml(&mut buffer, &observations)
            .map_err(|e| CommandError::Serialize(e.to_string()))?;
        write_output(&output, &buffer)?;
        println!(
            "Yearly rainfall for {} years written to {}",
            observations.len(),
            output.display()
        );
    }
    Ok(())
}
