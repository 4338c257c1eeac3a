// ============================================================================
// vidnorm-core/src/reporting/mod.rs
// ============================================================================
//
// REPORTING: Per-File Outcomes and the Run Summary
//
// Validation and conversion each end in a tagged outcome per file. Both are
// logged through `log_outcome` and folded into a `RunSummary`, so the log and
// the CLI summary always agree on what happened to every input file.

use crate::utils::display_name;

use std::fmt;
use std::path::{Path, PathBuf};

/// Validation outcome for a single candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Accepted,
    Rejected { reason: String },
}

/// Conversion outcome for a single job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Path of the produced output file
    Success(PathBuf),
    /// Diagnostic text explaining the failure
    Failure(String),
}

/// Common view over the outcome enums, used for logging and summaries.
pub trait Outcome {
    fn is_success(&self) -> bool;

    /// Short human-readable description of the outcome.
    fn describe(&self) -> String;
}

impl Outcome for Disposition {
    fn is_success(&self) -> bool {
        matches!(self, Disposition::Accepted)
    }

    fn describe(&self) -> String {
        match self {
            Disposition::Accepted => "accepted".to_string(),
            Disposition::Rejected { reason } => format!("rejected: {reason}"),
        }
    }
}

impl Outcome for ConversionOutcome {
    fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Success(_))
    }

    fn describe(&self) -> String {
        match self {
            ConversionOutcome::Success(output) => format!("converted to {}", output.display()),
            ConversionOutcome::Failure(detail) => format!("conversion failed: {detail}"),
        }
    }
}

/// Logs one file's outcome: `info` on success, `error` otherwise.
pub fn log_outcome(file: &Path, outcome: &impl Outcome) {
    if outcome.is_success() {
        log::info!("{}: {}", display_name(file), outcome.describe());
    } else {
        log::error!("{}: {}", display_name(file), outcome.describe());
    }
}

/// Ordered conversion outcomes for one run, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub entries: Vec<(PathBuf, ConversionOutcome)>,
}

impl ConversionReport {
    pub fn successes(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.entries.iter().filter_map(|(input, outcome)| match outcome {
            ConversionOutcome::Success(output) => Some((input.as_path(), output.as_path())),
            ConversionOutcome::Failure(_) => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.entries.iter().filter_map(|(input, outcome)| match outcome {
            ConversionOutcome::Failure(detail) => Some((input.as_path(), detail.as_str())),
            ConversionOutcome::Success(_) => None,
        })
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Final state of one input file across the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    pub file: PathBuf,
    pub success: bool,
    pub detail: String,
}

/// One line per input file describing where it ended up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub entries: Vec<SummaryEntry>,
}

impl RunSummary {
    /// Builds the summary from validation dispositions and conversion outcomes.
    ///
    /// Rejected files keep their rejection; accepted files take the outcome of
    /// their conversion, if one was recorded.
    pub fn new(dispositions: &[(PathBuf, Disposition)], conversions: &ConversionReport) -> Self {
        let entries = dispositions
            .iter()
            .map(|(file, disposition)| {
                let conversion = conversions
                    .entries
                    .iter()
                    .find(|(input, _)| input == file)
                    .map(|(_, outcome)| outcome);

                match (disposition, conversion) {
                    (Disposition::Accepted, Some(outcome)) => SummaryEntry {
                        file: file.clone(),
                        success: outcome.is_success(),
                        detail: outcome.describe(),
                    },
                    _ => SummaryEntry {
                        file: file.clone(),
                        success: disposition.is_success(),
                        detail: disposition.describe(),
                    },
                }
            })
            .collect();

        Self { entries }
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.success).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    /// Writes the summary to the log, one line per file.
    pub fn log(&self) {
        log::info!("Run summary: {} file(s), {} ok, {} not converted", self.entries.len(), self.succeeded(), self.failed());
        for entry in &self.entries {
            if entry.success {
                log::info!("  {}: {}", display_name(&entry.file), entry.detail);
            } else {
                log::error!("  {}: {}", display_name(&entry.file), entry.detail);
            }
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            let mark = if entry.success { "ok" } else { "FAILED" };
            writeln!(f, "{:<7}{}: {}", mark, display_name(&entry.file), entry.detail)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_merges_validation_and_conversion() {
        let dispositions = vec![
            (PathBuf::from("in/a.mkv"), Disposition::Accepted),
            (
                PathBuf::from("in/notes.txt"),
                Disposition::Rejected { reason: "no video stream".to_string() },
            ),
            (PathBuf::from("in/b.mkv"), Disposition::Accepted),
        ];
        let conversions = ConversionReport {
            entries: vec![
                (
                    PathBuf::from("in/a.mkv"),
                    ConversionOutcome::Success(PathBuf::from("out/a_converted.mp4")),
                ),
                (
                    PathBuf::from("in/b.mkv"),
                    ConversionOutcome::Failure("Invalid data found".to_string()),
                ),
            ],
        };

        let summary = RunSummary::new(&dispositions, &conversions);
        assert_eq!(summary.entries.len(), 3);
        assert!(summary.entries[0].success);
        assert!(summary.entries[0].detail.contains("a_converted.mp4"));
        assert!(!summary.entries[1].success);
        assert!(summary.entries[1].detail.contains("no video stream"));
        assert!(!summary.entries[2].success);
        assert_eq!(summary.succeeded(), 1);
        assert_eq!(summary.failed(), 2);

        let rendered = summary.to_string();
        assert!(rendered.contains("FAILED notes.txt"));
    }

    #[test]
    fn test_conversion_report_counts() {
        let report = ConversionReport {
            entries: vec![
                (PathBuf::from("a"), ConversionOutcome::Success(PathBuf::from("a_out"))),
                (PathBuf::from("b"), ConversionOutcome::Failure("boom".to_string())),
            ],
        };
        assert_eq!(report.success_count(), 1);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.failures().next(), Some((Path::new("b"), "boom")));
    }
}
