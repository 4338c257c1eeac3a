// ============================================================================
// vidnorm-core/src/processing/pipeline.rs
// ============================================================================
//
// PIPELINE DRIVER: Validate, Inspect, Convert, Inspect Outputs
//
// Ties the stages together for one batch run:
// 1. Environment check: both external tools must be startable
// 2. Validation of every file in the input directory
// 3. Inspection of the accepted inputs
// 4. Sequential output name allocation, then bounded parallel conversion
// 5. Inspection of every produced output
// 6. Run summary covering every input file
//
// Only environment and configuration problems abort the run. Everything that
// goes wrong with an individual file is recorded and the batch carries on.

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::{FfmpegTranscoder, FfprobeProber, MediaProber, Transcoder};
use crate::reporting::{ConversionOutcome, ConversionReport, RunSummary, log_outcome};

use super::conversion::{OutputPathAllocator, convert};
use super::inspection::{MediaDescription, describe_all};
use super::parallel::run_all;
use super::validation::{ValidationReport, validate};

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub started_at: DateTime<Local>,
    pub validation: ValidationReport,
    pub input_descriptions: Vec<MediaDescription>,
    pub conversions: ConversionReport,
    pub output_descriptions: Vec<MediaDescription>,
    pub elapsed: Duration,
}

impl PipelineReport {
    /// True when validation accepted nothing and no conversion was attempted.
    pub fn nothing_to_do(&self) -> bool {
        self.validation.accepted.is_empty()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::new(&self.validation.dispositions, &self.conversions)
    }

    pub fn has_failures(&self) -> bool {
        self.conversions.failure_count() > 0
    }
}

/// Batch pipeline over an injectable prober and transcoder.
pub struct Pipeline<P: MediaProber, T: Transcoder> {
    config: CoreConfig,
    prober: P,
    transcoder: T,
}

impl Pipeline<FfprobeProber, FfmpegTranscoder> {
    /// Pipeline backed by the ffprobe and ffmpeg paths in `config`.
    pub fn from_config(config: CoreConfig) -> Self {
        let prober = FfprobeProber::new(config.ffprobe_path.clone());
        let transcoder = FfmpegTranscoder::new(config.ffmpeg_path.clone());
        Self::new(config, prober, transcoder)
    }
}

impl<P: MediaProber, T: Transcoder> Pipeline<P, T> {
    pub fn new(config: CoreConfig, prober: P, transcoder: T) -> Self {
        Self {
            config,
            prober,
            transcoder,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Fails fast when configuration is invalid or a tool cannot be started.
    pub fn check_environment(&self) -> CoreResult<()> {
        self.config.validate()?;
        self.prober.ensure_available()?;
        self.transcoder.ensure_available()?;
        Ok(())
    }

    fn ensure_input_dir(&self) -> CoreResult<()> {
        if !self.config.input_dir.is_dir() {
            return Err(CoreError::PathError(format!(
                "Input directory '{}' does not exist or is not a directory",
                self.config.input_dir.display()
            )));
        }
        Ok(())
    }

    /// Validation stage only, for the `validate` command.
    pub fn validate_only(&self) -> CoreResult<ValidationReport> {
        self.config.validate()?;
        self.prober.ensure_available()?;
        self.ensure_input_dir()?;
        validate(&self.prober, &self.config.input_dir)
    }

    /// Describes arbitrary files, for the `inspect` command.
    pub fn inspect_paths(&self, paths: &[PathBuf]) -> CoreResult<Vec<MediaDescription>> {
        self.prober.ensure_available()?;
        describe_all(&self.prober, paths)
    }

    /// Runs the whole batch.
    pub fn run(&self) -> CoreResult<PipelineReport> {
        let started_at = Local::now();
        let timer = Instant::now();

        self.check_environment()?;
        self.ensure_input_dir()?;
        fs::create_dir_all(&self.config.output_dir).map_err(|e| {
            CoreError::PathError(format!(
                "Failed to create output directory '{}': {}",
                self.config.output_dir.display(),
                e
            ))
        })?;

        log::info!("Input directory: {}", self.config.input_dir.display());
        log::info!("Output directory: {}", self.config.output_dir.display());

        let validation = validate(&self.prober, &self.config.input_dir)?;
        if validation.accepted.is_empty() {
            log::info!("No video files accepted, nothing to do");
            let report = PipelineReport {
                started_at,
                validation,
                input_descriptions: Vec::new(),
                conversions: ConversionReport::default(),
                output_descriptions: Vec::new(),
                elapsed: timer.elapsed(),
            };
            report.summary().log();
            return Ok(report);
        }

        log::info!("Inspecting {} accepted file(s)", validation.accepted.len());
        let input_descriptions = describe_all(&self.prober, &validation.accepted)?;

        let conversions = self.convert_all(&validation.accepted);

        let produced: Vec<PathBuf> = conversions
            .successes()
            .map(|(_, output)| output.to_path_buf())
            .collect();
        log::info!("Inspecting {} produced file(s)", produced.len());
        let output_descriptions = describe_all(&self.prober, &produced)?;

        let report = PipelineReport {
            started_at,
            validation,
            input_descriptions,
            conversions,
            output_descriptions,
            elapsed: timer.elapsed(),
        };
        report.summary().log();
        log::info!("Run finished in {:.2}s", report.elapsed.as_secs_f64());
        Ok(report)
    }

    /// Allocates outputs in order, converts in parallel, and merges the
    /// outcomes back into input order.
    fn convert_all(&self, accepted: &[PathBuf]) -> ConversionReport {
        let allocator = OutputPathAllocator::new(&self.config.output_dir, self.config.sanitize_names);
        let (jobs, unallocated) = allocator.allocate_jobs(accepted);

        let transcoder = &self.transcoder;
        let profile = &self.config.profile;
        let outcomes = run_all(&jobs, self.config.max_concurrency, |job| {
            convert(transcoder, job, profile)
        });

        let mut by_input: Vec<(PathBuf, ConversionOutcome)> = jobs
            .into_iter()
            .map(|job| job.input)
            .zip(outcomes)
            .chain(unallocated)
            .collect();
        by_input.sort_by_key(|(input, _)| position_of(accepted, input));

        for (input, outcome) in &by_input {
            log_outcome(input, outcome);
        }
        ConversionReport { entries: by_input }
    }
}

fn position_of(list: &[PathBuf], item: &Path) -> usize {
    list.iter().position(|p| p == item).unwrap_or(usize::MAX)
}
