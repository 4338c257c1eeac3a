//! Batch processing stages and the driver that runs them.
//!
//! Each stage lives in its own submodule and can be used on its own; the
//! `pipeline` module strings them together for a full run.

/// Video/non-video classification of candidate files
pub mod validation;

/// Formatted metadata descriptions
pub mod inspection;

/// Output naming and single-job conversion
pub mod conversion;

/// Bounded parallel execution
pub mod parallel;

/// Full-run orchestration
pub mod pipeline;

pub use conversion::{ConversionJob, OutputPathAllocator, convert};
pub use inspection::{MediaDescription, StreamDescription, describe, describe_all};
pub use parallel::run_all;
pub use pipeline::{Pipeline, PipelineReport};
pub use validation::{Rejection, ValidationReport, validate};
