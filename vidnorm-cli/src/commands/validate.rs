//! Implementation of the 'validate' subcommand.

use crate::cli::ValidateArgs;
use crate::commands::start_logging;
use crate::config::{base_config, validate_config};
use crate::terminal::{print_section, print_status, print_success, print_warning};

use anyhow::{Context, Result};
use std::path::Path;
use vidnorm_core::Pipeline;
use vidnorm_core::utils::display_name;

/// Probes every file in the input directory without converting anything.
pub fn run_validate(args: &ValidateArgs, config_file: Option<&Path>, verbose: bool) -> Result<()> {
    let config = validate_config(base_config(config_file)?, &args.dirs, &args.runtime);
    config.validate().context("Invalid configuration")?;
    start_logging(&config, verbose)?;

    let input_dir = config.input_dir.clone();
    let report = Pipeline::from_config(config).validate_only()?;

    print_section("Validation");
    print_status("Input", input_dir.display());
    for file in &report.accepted {
        print_success(&format!("{}: accepted", display_name(file)));
    }
    for rejection in &report.rejections {
        print_warning(&format!("{}: {}", display_name(&rejection.file), rejection.reason));
    }
    if report.is_empty() {
        print_warning("Input directory is empty");
    }
    print_status("Accepted", report.accepted.len());
    print_status("Rejected", report.rejections.len());
    Ok(())
}
