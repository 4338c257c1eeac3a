//! Implementation of the 'convert' subcommand.
//!
//! Resolves configuration, starts logging, runs the full pipeline and prints
//! a per-file summary.

use crate::cli::ConvertArgs;
use crate::commands::start_logging;
use crate::config::{base_config, convert_config};
use crate::terminal::{print_description, print_section, print_status, print_summary, print_warning};

use anyhow::{Context, Result, bail};
use std::path::Path;
use vidnorm_core::Pipeline;
use vidnorm_core::utils::display_name;

pub fn run_convert(args: &ConvertArgs, config_file: Option<&Path>, verbose: bool) -> Result<()> {
    let config = convert_config(base_config(config_file)?, args);
    config.validate().context("Invalid configuration")?;
    start_logging(&config, verbose)?;

    let started = chrono::Local::now();
    log::info!("vidnorm run started at {}", started.format("%Y-%m-%d %H:%M:%S"));

    print_section("Configuration");
    print_status("Input", config.input_dir.display());
    print_status("Output", config.output_dir.display());
    print_status("Log directory", config.log_dir.display());
    print_status("Parallel jobs", config.max_concurrency);
    print_status(
        "Profile",
        format!(
            "{} preset={} crf={} max-height={} audio={}@{}",
            config.profile.video_codec,
            config.profile.preset,
            config.profile.crf,
            config.profile.max_height,
            config.profile.audio_codec,
            config.profile.audio_bitrate
        ),
    );

    let pipeline = Pipeline::from_config(config);
    let report = pipeline.run()?;

    if report.nothing_to_do() {
        print_section("Summary");
        print_summary(&report.summary());
        print_warning("No video files accepted, nothing to do");
        return Ok(());
    }

    print_section("Inputs");
    for description in &report.input_descriptions {
        print_description(description);
    }

    print_section("Outputs");
    for description in &report.output_descriptions {
        print_description(description);
    }

    print_section("Summary");
    let summary = report.summary();
    print_summary(&summary);
    print_status("Converted", report.conversions.success_count());
    print_status("Failed", report.conversions.failure_count());
    print_status("Rejected", report.validation.rejections.len());
    print_status("Elapsed", format!("{:.1}s", report.elapsed.as_secs_f64()));

    log::info!(
        "vidnorm run finished at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    if args.fail_on_error && report.has_failures() {
        let failed: Vec<String> = report
            .conversions
            .failures()
            .map(|(input, _)| display_name(input))
            .collect();
        bail!("{} conversion(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}
