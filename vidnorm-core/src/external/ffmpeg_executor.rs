// ============================================================================
// vidnorm-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: Transcoder Backed by ffmpeg-sidecar
//
// Builds one ffmpeg command per conversion, drains its event stream to
// collect error lines, and turns a non-zero exit into a CommandFailed error
// carrying those lines.

use super::Transcoder;
use crate::config::EncodingProfile;
use crate::error::{CoreResult, command_failed_error, command_start_error};

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};
use std::path::{Path, PathBuf};

/// Error lines kept for the failure diagnostic.
const MAX_DIAGNOSTIC_LINES: usize = 20;

/// `Transcoder` backed by the ffmpeg executable.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg_path: PathBuf,
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new(PathBuf::from(crate::config::DEFAULT_FFMPEG_PATH))
    }
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg_path: PathBuf) -> Self {
        Self { ffmpeg_path }
    }

    /// Builds the ffmpeg command for one conversion.
    pub fn build_command(&self, input: &Path, output: &Path, profile: &EncodingProfile) -> FfmpegCommand {
        let mut cmd = FfmpegCommand::new_with_path(&self.ffmpeg_path);
        // File names need not be UTF-8; pass paths as OsStr
        cmd.arg("-y");
        cmd.arg("-i");
        cmd.arg(input);
        cmd.args(profile.to_args());
        cmd.arg(output);
        cmd
    }
}

fn push_diagnostic(lines: &mut Vec<String>, line: String) {
    let line = line.trim().to_string();
    if line.is_empty() {
        return;
    }
    if lines.len() == MAX_DIAGNOSTIC_LINES {
        lines.remove(0);
    }
    lines.push(line);
}

impl Transcoder for FfmpegTranscoder {
    fn transcode(&self, input: &Path, output: &Path, profile: &EncodingProfile) -> CoreResult<()> {
        let mut cmd = self.build_command(input, output, profile);
        log::debug!("Running ffmpeg command: {:?}", cmd);

        let mut child = cmd
            .spawn()
            .map_err(|e| command_start_error(self.ffmpeg_path.display().to_string(), e))?;

        let mut diagnostics: Vec<String> = Vec::new();
        match child.iter() {
            Ok(events) => {
                for event in events {
                    match event {
                        // Without a level prefix ffmpeg's own errors arrive as Unknown
                        FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal | LogLevel::Unknown, line) => {
                            push_diagnostic(&mut diagnostics, line)
                        }
                        FfmpegEvent::Log(LogLevel::Warning, line) => {
                            log::debug!("ffmpeg warning for {}: {}", input.display(), line)
                        }
                        FfmpegEvent::Error(line) => push_diagnostic(&mut diagnostics, line),
                        _ => {}
                    }
                }
            }
            Err(e) => {
                log::warn!("Could not read ffmpeg output for {}: {}", input.display(), e);
                push_diagnostic(&mut diagnostics, e.to_string());
            }
        }

        let status = child
            .wait()
            .map_err(|e| command_start_error(self.ffmpeg_path.display().to_string(), e))?;

        if status.success() {
            Ok(())
        } else {
            let stderr = if diagnostics.is_empty() {
                "no diagnostic output".to_string()
            } else {
                diagnostics.join("\n")
            };
            Err(command_failed_error("ffmpeg", status, stderr))
        }
    }

    fn ensure_available(&self) -> CoreResult<()> {
        super::check_dependency(&self.ffmpeg_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_command_arguments() {
        let transcoder = FfmpegTranscoder::new(PathBuf::from("/opt/bin/ffmpeg"));
        let mut cmd = transcoder.build_command(
            Path::new("in/clip one.mkv"),
            Path::new("out/clip_one_converted.mp4"),
            &EncodingProfile::default(),
        );
        let inner = cmd.as_inner();
        let args: Vec<String> = inner.get_args().map(|a| a.to_string_lossy().into_owned()).collect();

        assert_eq!(inner.get_program(), "/opt/bin/ffmpeg");
        assert!(args.contains(&"-y".to_string()));
        let input_pos = args.iter().position(|a| a == "in/clip one.mkv").unwrap();
        assert_eq!(args[input_pos - 1], "-i");
        let codec_pos = args.iter().position(|a| a == "-c:v").unwrap();
        assert_eq!(args[codec_pos + 1], "libx265");
        assert!(codec_pos > input_pos);
        assert_eq!(args.last().unwrap(), "out/clip_one_converted.mp4");
    }

    #[cfg(unix)]
    #[test]
    fn test_build_command_keeps_non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = Path::new(OsStr::from_bytes(b"in/caf\xe9.mkv")).to_path_buf();
        let output = Path::new(OsStr::from_bytes(b"out/caf\xe9_converted.mp4")).to_path_buf();
        let mut cmd = FfmpegTranscoder::default().build_command(&input, &output, &EncodingProfile::default());
        let args: Vec<&OsStr> = cmd.as_inner().get_args().collect();

        let input_pos = args.iter().position(|a| *a == input.as_os_str()).unwrap();
        assert_eq!(args[input_pos - 1], "-i");
        assert_eq!(*args.last().unwrap(), output.as_os_str());
    }

    #[test]
    fn test_diagnostics_are_bounded() {
        let mut lines = Vec::new();
        for i in 0..(MAX_DIAGNOSTIC_LINES + 5) {
            push_diagnostic(&mut lines, format!("line {i}"));
        }
        push_diagnostic(&mut lines, "   ".to_string());
        assert_eq!(lines.len(), MAX_DIAGNOSTIC_LINES);
        assert_eq!(lines.last().unwrap(), &format!("line {}", MAX_DIAGNOSTIC_LINES + 4));
    }
}
