//! Human-readable descriptions of media files.
//!
//! Used for accepted inputs before conversion and for produced outputs after
//! it. Inspection failures are logged and skipped by `describe_all`.

use crate::error::CoreResult;
use crate::external::{MediaProber, ProbedStream, StreamKind};
use crate::utils::{UNKNOWN, display_name, format_bitrate, format_duration, format_size};

use std::fmt;
use std::path::{Path, PathBuf};

/// One reported stream. Only video and audio streams are described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamDescription {
    Video {
        index: u32,
        codec: Option<String>,
        /// `WIDTHxHEIGHT [aspect]`
        resolution: String,
    },
    Audio {
        index: u32,
    },
}

impl StreamDescription {
    fn from_probed(stream: &ProbedStream) -> Option<Self> {
        match stream.kind {
            StreamKind::Video => Some(StreamDescription::Video {
                index: stream.index,
                codec: stream.codec_name.clone(),
                resolution: format_resolution(
                    stream.width,
                    stream.height,
                    stream.display_aspect_ratio.as_deref(),
                ),
            }),
            StreamKind::Audio => Some(StreamDescription::Audio { index: stream.index }),
            StreamKind::Other => None,
        }
    }
}

impl fmt::Display for StreamDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamDescription::Video { index, codec, resolution } => write!(
                f,
                "Stream #{index}: video, codec {}, {resolution}",
                codec.as_deref().unwrap_or(UNKNOWN)
            ),
            StreamDescription::Audio { index } => write!(f, "Stream #{index}: audio present"),
        }
    }
}

fn format_resolution(width: Option<u32>, height: Option<u32>, aspect: Option<&str>) -> String {
    let dim = |v: Option<u32>| v.map_or_else(|| UNKNOWN.to_string(), |v| v.to_string());
    format!("{}x{} [{}]", dim(width), dim(height), aspect.unwrap_or(UNKNOWN))
}

/// Formatted metadata for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDescription {
    pub file: PathBuf,
    pub duration: String,
    pub bitrate: String,
    pub size: String,
    pub streams: Vec<StreamDescription>,
}

impl MediaDescription {
    /// Log lines for this description, header first.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{}: duration {}, bitrate {}, size {}",
            display_name(&self.file),
            self.duration,
            self.bitrate,
            self.size
        )];
        lines.extend(self.streams.iter().map(|s| format!("  {s}")));
        lines
    }

    pub fn log(&self) {
        for line in self.lines() {
            log::info!("{line}");
        }
    }
}

/// Probes `file` and formats its metadata.
pub fn describe<P: MediaProber + ?Sized>(prober: &P, file: &Path) -> CoreResult<MediaDescription> {
    let probe = prober.probe(file)?;
    Ok(MediaDescription {
        file: file.to_path_buf(),
        duration: format_duration(probe.duration),
        bitrate: format_bitrate(probe.bit_rate),
        size: format_size(probe.size_bytes),
        streams: probe.streams.iter().filter_map(StreamDescription::from_probed).collect(),
    })
}

/// Describes each file in order, logging descriptions and failures.
///
/// Failed files are left out of the result. Fatal errors are propagated.
pub fn describe_all<P: MediaProber + ?Sized>(
    prober: &P,
    files: &[PathBuf],
) -> CoreResult<Vec<MediaDescription>> {
    let mut descriptions = Vec::with_capacity(files.len());
    for file in files {
        match describe(prober, file) {
            Ok(description) => {
                description.log();
                descriptions.push(description);
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => log::error!("Could not inspect {}: {}", display_name(file), e),
        }
    }
    Ok(descriptions)
}
