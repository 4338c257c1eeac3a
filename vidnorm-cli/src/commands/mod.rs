//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of one subcommand. Commands
//! return `anyhow::Result`; `main` turns an `Err` into a non-zero exit.

/// The `convert` command: the full pipeline.
pub mod convert;

/// The `inspect` command: describe arbitrary files.
pub mod inspect;

/// The `validate` command: report accepted and rejected inputs.
pub mod validate;

pub use convert::run_convert;
pub use inspect::run_inspect;
pub use validate::run_validate;

use anyhow::{Context, Result};
use vidnorm_core::CoreConfig;
use vidnorm_core::file_logging::{LoggingOptions, setup_logging};

/// Installs console and file logging for the resolved configuration.
pub(crate) fn start_logging(config: &CoreConfig, verbose: bool) -> Result<()> {
    let options = LoggingOptions::new(&config.log_dir, config.log_max_bytes, config.log_backups)
        .verbose(verbose);
    setup_logging(&options).context("Could not initialize logging")?;
    log::debug!("Log file: {}", options.log_file().display());
    Ok(())
}
