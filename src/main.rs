use std::process::ExitCode;

use clap::Parser;

use rainfall_forecasts::commands::aggregate_cmd::aggregate_command;
use rainfall_forecasts::commands::base_commands::{CliArgs, Commands};
use rainfall_forecasts::commands::completions_cmd::completions_command;
use rainfall_forecasts::commands::distribution_cmd::distribution_command;
use rainfall_forecasts::commands::plot_rainfall_cmd::plot_rainfall_command;
use rainfall_forecasts::commands::simulate_cmd::simulate_command;
use rainfall_forecasts::logging::init_tracing;

// sysexits.h EX_SOFTWARE
const INTERNAL_FAULT_EXIT: u8 = 70;

fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();

    let outcome = match args.command {
        cmd @ Commands::Aggregate { .. } => aggregate_command(cmd),
        cmd @ Commands::Distribution { .. } => distribution_command(cmd),
        cmd @ Commands::Simulate { .. } => simulate_command(cmd),
        cmd @ Commands::PlotRainfall { .. } => plot_rainfall_command(cmd),
        cmd @ Commands::Completions { .. } => {
            completions_command(cmd);
            Ok(())
        }
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_internal_fault() => {
            eprintln!("Internal error: {e}");
            ExitCode::from(INTERNAL_FAULT_EXIT)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
