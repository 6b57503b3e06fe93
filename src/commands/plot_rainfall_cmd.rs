use crate::commands::base_commands::Commands;
use crate::commands::CommandError;
use crate::services::rainfall_plot::plot_rainfall_from_file;

pub fn plot_rainfall_command(cmd: Commands) -> Result<(), CommandError> {
    if let Commands::PlotRainfall { data, output } = cmd {
        let config = data.load_config()?;
        let input = data.input_path(&config)?;
        plot_rainfall_from_file(&input, &output, &config.ingest_options())?;
        println!("Rainfall plot written to {output}");
    }
    Ok(())
}
