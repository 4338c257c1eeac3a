//! Input validation: decides which candidate files are video.
//!
//! A file is accepted when the prober reports at least one video stream.
//! Probe failures and non-video files become rejections with a reason; they
//! never abort the batch.

use crate::discovery::find_candidate_files;
use crate::error::CoreResult;
use crate::external::MediaProber;
use crate::reporting::{Disposition, log_outcome};

use std::path::{Path, PathBuf};

/// A rejected candidate and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub file: PathBuf,
    pub reason: String,
}

/// Result of validating one input directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Accepted files in enumeration order
    pub accepted: Vec<PathBuf>,
    pub rejections: Vec<Rejection>,
    /// Every candidate with its disposition, in enumeration order
    pub dispositions: Vec<(PathBuf, Disposition)>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.dispositions.is_empty()
    }

    fn record(&mut self, file: PathBuf, disposition: Disposition) {
        log_outcome(&file, &disposition);
        match &disposition {
            Disposition::Accepted => self.accepted.push(file.clone()),
            Disposition::Rejected { reason } => self.rejections.push(Rejection {
                file: file.clone(),
                reason: reason.clone(),
            }),
        }
        self.dispositions.push((file, disposition));
    }
}

/// Decides the disposition of a single file.
///
/// Fatal errors (e.g. the prober binary vanished mid-run) are propagated;
/// every other probe error becomes a rejection carrying the prober's text.
pub fn classify<P: MediaProber + ?Sized>(prober: &P, file: &Path) -> CoreResult<Disposition> {
    match prober.probe(file) {
        Ok(probe) if probe.has_video_stream => Ok(Disposition::Accepted),
        Ok(_) => Ok(Disposition::Rejected {
            reason: "no video stream found".to_string(),
        }),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => Ok(Disposition::Rejected { reason: e.to_string() }),
    }
}

/// Validates every regular file directly inside `input_dir`.
///
/// An empty directory, or one where everything is rejected, yields an empty
/// `accepted` list. Failing to read the directory itself is an error.
pub fn validate<P: MediaProber + ?Sized>(prober: &P, input_dir: &Path) -> CoreResult<ValidationReport> {
    let candidates = find_candidate_files(input_dir)?;
    log::debug!("Found {} candidate file(s) in {}", candidates.len(), input_dir.display());

    let mut report = ValidationReport::default();
    for file in candidates {
        let disposition = classify(prober, &file)?;
        report.record(file, disposition);
    }

    log::info!(
        "Validation complete: {} accepted, {} rejected",
        report.accepted.len(),
        report.rejections.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::external::ProbeResult;
    use std::fs::File;
    use tempfile::tempdir;

    /// Accepts files whose name contains "video", fails on "broken".
    struct NameProber;

    impl MediaProber for NameProber {
        fn probe(&self, path: &Path) -> CoreResult<ProbeResult> {
            let name = path.file_name().unwrap().to_string_lossy();
            if name.contains("broken") {
                return Err(CoreError::ProbeFailed {
                    path: path.display().to_string(),
                    message: "moov atom not found".to_string(),
                });
            }
            Ok(ProbeResult {
                has_video_stream: name.contains("video"),
                ..ProbeResult::default()
            })
        }
    }

    #[test]
    fn test_validate_partitions_candidates() {
        let dir = tempdir().unwrap();
        for name in ["b_video.mkv", "a_video.mp4", "song.mp3", "broken.mp4"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let report = validate(&NameProber, dir.path()).unwrap();
        let accepted: Vec<_> = report
            .accepted
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(accepted, vec!["a_video.mp4", "b_video.mkv"]);
        assert_eq!(report.rejections.len(), 2);
        assert_eq!(report.dispositions.len(), 4);

        let broken = report
            .rejections
            .iter()
            .find(|r| r.file.ends_with("broken.mp4"))
            .unwrap();
        assert!(broken.reason.contains("moov atom not found"));
    }

    #[test]
    fn test_validate_empty_directory() {
        let dir = tempdir().unwrap();
        let report = validate(&NameProber, dir.path()).unwrap();
        assert!(report.accepted.is_empty());
        assert!(report.rejections.is_empty());
        assert!(report.is_empty());
    }

    #[test]
    fn test_fatal_probe_error_propagates() {
        struct MissingProber;
        impl MediaProber for MissingProber {
            fn probe(&self, _path: &Path) -> CoreResult<ProbeResult> {
                Err(CoreError::DependencyNotFound("ffprobe".to_string()))
            }
        }

        let dir = tempdir().unwrap();
        File::create(dir.path().join("clip.mkv")).unwrap();
        let result = validate(&MissingProber, dir.path());
        assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));
    }
}
