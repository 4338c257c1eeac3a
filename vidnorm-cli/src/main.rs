// vidnorm-cli/src/main.rs
//
// Entry point for the `vidnorm` binary.
//
// Parses arguments, hands the command to the library, and maps the result to
// an exit code: 0 when the command completed (per-file failures included,
// unless --fail-on-error), 1 on fatal errors.

use clap::Parser;
use std::process::ExitCode;
use vidnorm_cli::{Cli, run, terminal};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            terminal::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
