//! ffprobe integration for stream detection and metadata extraction.
//!
//! ffprobe is run once per file with JSON output. The JSON is deserialized
//! into lenient structs: every field is optional, and numeric fields are
//! accepted either as JSON numbers or as the strings ffprobe usually emits.

use super::MediaProber;
use crate::error::{CoreError, CoreResult, command_start_error};

use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Kind of a probed stream, from ffprobe's `codec_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
    Other,
}

/// One stream as reported by the prober.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbedStream {
    pub index: u32,
    pub kind: StreamKind,
    pub codec_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub display_aspect_ratio: Option<String>,
}

/// Metadata extracted from a single probe.
///
/// Only `has_video_stream` and `audio_present` are always known; everything
/// else is `None` when the prober did not report it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeResult {
    pub has_video_stream: bool,
    /// Duration in seconds
    pub duration: Option<f64>,
    /// Overall bitrate in bits per second
    pub bit_rate: Option<u64>,
    pub size_bytes: Option<u64>,
    pub video_codec_name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub display_aspect_ratio: Option<String>,
    pub audio_present: bool,
    /// Streams in container order
    pub streams: Vec<ProbedStream>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FfprobeOutput {
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FfprobeStream {
    index: Option<u32>,
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    display_aspect_ratio: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FfprobeFormat {
    duration: Option<Value>,
    bit_rate: Option<Value>,
    size: Option<Value>,
}

fn value_as_f64(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite() && *v >= 0.0)
}

fn value_as_u64(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|v| *v >= 0.0).map(|v| v as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

impl FfprobeStream {
    fn kind(&self) -> StreamKind {
        match self.codec_type.as_deref() {
            Some("video") => StreamKind::Video,
            Some("audio") => StreamKind::Audio,
            _ => StreamKind::Other,
        }
    }
}

/// Parses ffprobe's `-print_format json -show_format -show_streams` output.
pub fn parse_probe_output(json: &[u8], path: &Path) -> CoreResult<ProbeResult> {
    let output: FfprobeOutput = serde_json::from_slice(json).map_err(|e| CoreError::ProbeParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let mut result = ProbeResult::default();

    if let Some(format) = &output.format {
        result.duration = value_as_f64(format.duration.as_ref());
        result.bit_rate = value_as_u64(format.bit_rate.as_ref());
        result.size_bytes = value_as_u64(format.size.as_ref());
    }

    for (position, stream) in output.streams.iter().enumerate() {
        // Cover art is a video stream too, so audio files carrying it are accepted
        let kind = stream.kind();
        match kind {
            StreamKind::Video if !result.has_video_stream => {
                result.has_video_stream = true;
                result.video_codec_name = stream.codec_name.clone();
                result.width = stream.width;
                result.height = stream.height;
                result.display_aspect_ratio = stream.display_aspect_ratio.clone();
            }
            StreamKind::Audio => result.audio_present = true,
            _ => {}
        }

        result.streams.push(ProbedStream {
            index: stream.index.unwrap_or(position as u32),
            kind,
            codec_name: stream.codec_name.clone(),
            width: stream.width,
            height: stream.height,
            display_aspect_ratio: stream.display_aspect_ratio.clone(),
        });
    }

    Ok(result)
}

/// `MediaProber` backed by the ffprobe executable.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    ffprobe_path: PathBuf,
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new(PathBuf::from(crate::config::DEFAULT_FFPROBE_PATH))
    }
}

impl FfprobeProber {
    pub fn new(ffprobe_path: PathBuf) -> Self {
        Self { ffprobe_path }
    }
}

impl MediaProber for FfprobeProber {
    fn probe(&self, path: &Path) -> CoreResult<ProbeResult> {
        log::debug!("Running ffprobe on: {}", path.display());

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| command_start_error(self.ffprobe_path.display().to_string(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("ffprobe exited with {}", output.status)
            } else {
                stderr
            };
            return Err(CoreError::ProbeFailed {
                path: path.display().to_string(),
                message,
            });
        }

        parse_probe_output(&output.stdout, path)
    }

    fn ensure_available(&self) -> CoreResult<()> {
        super::check_dependency(&self.ffprobe_path)
    }
}
