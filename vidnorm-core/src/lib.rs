//! Core library for batch video normalization using ffprobe and ffmpeg.
//!
//! This crate validates the files in an input directory, describes the
//! accepted videos, converts them to a common encoding profile with a bounded
//! worker pool, and describes the produced outputs.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidnorm_core::{CoreConfig, Pipeline};
//! use std::path::PathBuf;
//!
//! let mut config = CoreConfig::new(
//!     PathBuf::from("/path/to/input"),
//!     PathBuf::from("/path/to/output"),
//!     PathBuf::from("/path/to/logs")
//! );
//! config.max_concurrency = 4;
//! config.profile.crf = 26;
//!
//! let pipeline = Pipeline::from_config(config);
//! let report = pipeline.run().unwrap();
//! println!("{}", report.summary());
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod file_logging;
pub mod processing;
pub mod reporting;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder, EncodingProfile, FileConfig};
pub use discovery::find_candidate_files;
pub use error::{CoreError, CoreResult};
pub use external::{FfmpegTranscoder, FfprobeProber, MediaProber, ProbeResult, Transcoder};
pub use processing::{
    ConversionJob, MediaDescription, OutputPathAllocator, Pipeline, PipelineReport,
    ValidationReport,
};
pub use reporting::{ConversionOutcome, ConversionReport, Disposition, RunSummary};
pub use utils::{format_bitrate, format_duration, format_size};
