//! Conversion jobs and collision-free output naming.
//!
//! Output names are `<stem>_converted.mp4`, then `<stem>_converted_1.mp4`,
//! `<stem>_converted_2.mp4` and so on. Every name is claimed on disk with
//! `create_new` before any transcoder runs, so two jobs (or two runs sharing
//! an output directory) can never be handed the same path.

use crate::config::EncodingProfile;
use crate::error::{CoreError, CoreResult};
use crate::external::Transcoder;
use crate::reporting::ConversionOutcome;
use crate::utils::{display_name, sanitize_file_stem};

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Suffix added to every output stem.
pub const OUTPUT_SUFFIX: &str = "_converted";

/// Container extension of produced files.
pub const OUTPUT_EXTENSION: &str = "mp4";

/// Numeric suffixes tried before giving up on a stem.
const MAX_NAME_ATTEMPTS: u32 = 10_000;

/// An accepted input paired with its claimed output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Hands out unique output paths inside one directory.
#[derive(Debug, Clone)]
pub struct OutputPathAllocator {
    output_dir: PathBuf,
    sanitize_names: bool,
}

impl OutputPathAllocator {
    pub fn new(output_dir: impl Into<PathBuf>, sanitize_names: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            sanitize_names,
        }
    }

    /// Output stem for `input`, before any numeric suffix.
    pub fn base_stem(&self, input: &Path) -> String {
        let raw = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = if self.sanitize_names {
            sanitize_file_stem(&raw)
        } else if raw.is_empty() {
            "output".to_string()
        } else {
            raw
        };
        format!("{stem}{OUTPUT_SUFFIX}")
    }

    fn candidate(&self, stem: &str, attempt: u32) -> PathBuf {
        let name = if attempt == 0 {
            format!("{stem}.{OUTPUT_EXTENSION}")
        } else {
            format!("{stem}_{attempt}.{OUTPUT_EXTENSION}")
        };
        self.output_dir.join(name)
    }

    /// Claims the first free output path for `input`.
    ///
    /// The returned path exists as an empty placeholder owned by the caller.
    pub fn allocate(&self, input: &Path) -> CoreResult<PathBuf> {
        let stem = self.base_stem(input);
        for attempt in 0..MAX_NAME_ATTEMPTS {
            let candidate = self.candidate(&stem, attempt);
            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(_) => {
                    log::debug!("Claimed output {} for {}", candidate.display(), display_name(input));
                    return Ok(candidate);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(CoreError::Io(e)),
            }
        }
        Err(CoreError::OutputNameExhausted(input.display().to_string()))
    }

    /// Allocates outputs for `inputs` in order.
    ///
    /// Inputs whose name cannot be claimed are returned separately with the
    /// failure text instead of aborting the others.
    pub fn allocate_jobs(&self, inputs: &[PathBuf]) -> (Vec<ConversionJob>, Vec<(PathBuf, ConversionOutcome)>) {
        let mut jobs = Vec::with_capacity(inputs.len());
        let mut unallocated = Vec::new();
        for input in inputs {
            match self.allocate(input) {
                Ok(output) => jobs.push(ConversionJob {
                    input: input.clone(),
                    output,
                }),
                Err(e) => {
                    log::error!("Could not allocate output for {}: {}", display_name(input), e);
                    unallocated.push((input.clone(), ConversionOutcome::Failure(e.to_string())));
                }
            }
        }
        (jobs, unallocated)
    }
}

/// Runs one conversion job to completion.
///
/// Never returns an error: any failure becomes `ConversionOutcome::Failure`
/// and the job's placeholder output is removed.
pub fn convert<T: Transcoder + ?Sized>(
    transcoder: &T,
    job: &ConversionJob,
    profile: &EncodingProfile,
) -> ConversionOutcome {
    log::info!(
        "Converting {} -> {}",
        display_name(&job.input),
        display_name(&job.output)
    );

    match transcoder.transcode(&job.input, &job.output, profile) {
        Ok(()) => ConversionOutcome::Success(job.output.clone()),
        Err(e) => {
            remove_placeholder(&job.output);
            ConversionOutcome::Failure(e.to_string())
        }
    }
}

pub(crate) fn remove_placeholder(output: &Path) {
    if let Err(e) = fs::remove_file(output) {
        if e.kind() != io::ErrorKind::NotFound {
            log::warn!("Could not remove partial output {}: {}", output.display(), e);
        }
    }
}
