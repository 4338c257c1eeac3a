// vidnorm-cli/src/lib.rs
//
// Library portion of the vidnorm CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, ConvertArgs, InspectArgs, ValidateArgs};
pub use commands::{run_convert, run_inspect, run_validate};

/// Runs the parsed command line.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config_file = cli.config.as_deref();
    match &cli.command {
        Commands::Convert(args) => run_convert(args, config_file, cli.verbose),
        Commands::Validate(args) => run_validate(args, config_file, cli.verbose),
        Commands::Inspect(args) => run_inspect(args, config_file, cli.verbose),
    }
}
