// ============================================================================
// vidnorm-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the Prober and the Transcoder
//
// The pipeline only ever talks to the external multimedia toolkit through the
// two traits below. Production implementations shell out to ffprobe and
// ffmpeg; tests inject scripted implementations instead.
//
// KEY COMPONENTS:
// - MediaProber: "what streams and format metadata does this file have"
// - Transcoder: "convert this input to this output with this profile"
// - check_dependency: environment check run before any file is touched

use crate::config::EncodingProfile;
use crate::error::{CoreError, CoreResult};

use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// ffprobe invocation and output parsing
pub mod ffprobe_executor;

/// ffmpeg invocation through ffmpeg-sidecar
pub mod ffmpeg_executor;

pub use ffmpeg_executor::FfmpegTranscoder;
pub use ffprobe_executor::{FfprobeProber, ProbeResult, ProbedStream, StreamKind};

/// Answers stream and format questions about a media file.
pub trait MediaProber {
    /// Probes `path`, returning its stream/format metadata.
    ///
    /// Fails with `CoreError::ProbeFailed` when the tool reports an error and
    /// with `CoreError::ProbeParse` when its output cannot be understood.
    fn probe(&self, path: &Path) -> CoreResult<ProbeResult>;

    /// Verifies the prober can be executed at all.
    fn ensure_available(&self) -> CoreResult<()> {
        Ok(())
    }
}

/// Converts one media file into another.
///
/// Implementations are shared across worker threads.
pub trait Transcoder: Send + Sync {
    /// Transcodes `input` into `output` using `profile`.
    ///
    /// `output` already exists as an empty placeholder claimed by the caller
    /// and must be overwritten. A non-zero exit is reported as
    /// `CoreError::CommandFailed` carrying the tool's diagnostic text.
    fn transcode(&self, input: &Path, output: &Path, profile: &EncodingProfile) -> CoreResult<()>;

    /// Verifies the transcoder can be executed at all.
    fn ensure_available(&self) -> CoreResult<()> {
        Ok(())
    }
}

impl<P: MediaProber + ?Sized> MediaProber for &P {
    fn probe(&self, path: &Path) -> CoreResult<ProbeResult> {
        (**self).probe(path)
    }

    fn ensure_available(&self) -> CoreResult<()> {
        (**self).ensure_available()
    }
}

impl<T: Transcoder + ?Sized> Transcoder for &T {
    fn transcode(&self, input: &Path, output: &Path, profile: &EncodingProfile) -> CoreResult<()> {
        (**self).transcode(input, output, profile)
    }

    fn ensure_available(&self) -> CoreResult<()> {
        (**self).ensure_available()
    }
}

/// Checks that an external command exists and can be started.
///
/// Runs `<cmd> -version` with its output discarded. Only failing to start the
/// process counts as missing; the exit status is not inspected.
pub fn check_dependency(cmd: &Path) -> CoreResult<()> {
    let result = Command::new(cmd)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::error!("Dependency '{}' not found.", cmd.display());
            Err(CoreError::DependencyNotFound(cmd.display().to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd.display(), e);
            Err(CoreError::CommandStart(cmd.display().to_string(), e))
        }
    }
}
