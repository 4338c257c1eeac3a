//! Implementation of the 'inspect' subcommand.

use crate::cli::InspectArgs;
use crate::commands::start_logging;
use crate::config::{base_config, inspect_config};
use crate::terminal::{print_description, print_section};

use anyhow::{Context, Result, bail};
use std::path::Path;
use vidnorm_core::Pipeline;

/// Describes the given files. Fails only if none of them could be probed.
pub fn run_inspect(args: &InspectArgs, config_file: Option<&Path>, verbose: bool) -> Result<()> {
    let config = inspect_config(base_config(config_file)?, &args.runtime);
    config.validate().context("Invalid configuration")?;
    start_logging(&config, verbose)?;

    let descriptions = Pipeline::from_config(config).inspect_paths(&args.files)?;

    print_section("Inspection");
    for description in &descriptions {
        print_description(description);
    }

    if descriptions.is_empty() {
        bail!("None of the {} file(s) could be inspected", args.files.len());
    }
    Ok(())
}
