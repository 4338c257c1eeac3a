//! Bounded parallel execution of conversion jobs.
//!
//! Jobs run on a dedicated rayon pool sized to the configured concurrency.
//! The global rayon pool is never touched, so callers can run several batches
//! with different widths in one process.

use crate::reporting::ConversionOutcome;
use crate::utils::display_name;

use rayon::prelude::*;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use super::conversion::ConversionJob;

/// Runs `work` on every job with at most `max_concurrency` jobs in flight.
///
/// Outcomes are returned in submission order once every job has finished. A
/// panic inside `work` becomes a `Failure` for that job only.
pub fn run_all<F>(jobs: &[ConversionJob], max_concurrency: usize, work: F) -> Vec<ConversionOutcome>
where
    F: Fn(&ConversionJob) -> ConversionOutcome + Sync,
{
    if jobs.is_empty() {
        return Vec::new();
    }

    let threads = max_concurrency.max(1).min(jobs.len());
    log::info!(
        "Starting {} conversion(s) with up to {} in parallel",
        jobs.len(),
        threads
    );

    let guarded = |job: &ConversionJob| run_guarded(job, &work);

    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("vidnorm-worker-{i}"))
        .build()
    {
        Ok(pool) => pool.install(|| jobs.par_iter().map(guarded).collect()),
        Err(e) => {
            log::warn!("Failed to build worker pool ({e}), converting sequentially");
            jobs.iter().map(guarded).collect()
        }
    }
}

fn run_guarded<F>(job: &ConversionJob, work: &F) -> ConversionOutcome
where
    F: Fn(&ConversionJob) -> ConversionOutcome,
{
    match catch_unwind(AssertUnwindSafe(|| work(job))) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::error!("Worker panicked while converting {}: {}", display_name(&job.input), message);
            super::conversion::remove_placeholder(&job.output);
            ConversionOutcome::Failure(format!("worker panicked: {message}"))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
