// vidnorm-core/tests/common/mod.rs
//
// Scripted stand-ins for ffprobe and ffmpeg. A file's content decides what the
// prober reports, so a test sets up its scenario just by writing files:
//
//   "video"   -> one h264 video stream plus audio
//   "audio"   -> audio only
//   "corrupt" -> probe failure
//
// The transcoder writes "video" into its output so produced files inspect as
// video. Inputs whose name contains "fail" or "panic" fail or panic.

#![allow(dead_code)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use vidnorm_core::config::EncodingProfile;
use vidnorm_core::error::{CoreError, CoreResult};
use vidnorm_core::external::{MediaProber, ProbeResult, ProbedStream, StreamKind, Transcoder};

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[derive(Default)]
pub struct ScriptedProber {
    pub missing: bool,
    pub probed: Mutex<Vec<PathBuf>>,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing() -> Self {
        Self {
            missing: true,
            ..Self::default()
        }
    }
}

impl MediaProber for ScriptedProber {
    fn probe(&self, path: &Path) -> CoreResult<ProbeResult> {
        self.probed.lock().unwrap().push(path.to_path_buf());
        let content = fs::read_to_string(path).unwrap_or_default();
        match content.trim() {
            "video" => Ok(ProbeResult {
                has_video_stream: true,
                duration: Some(61.5),
                bit_rate: Some(2_000_000),
                size_bytes: Some(content.len() as u64),
                video_codec_name: Some("h264".to_string()),
                width: Some(1280),
                height: Some(720),
                display_aspect_ratio: Some("16:9".to_string()),
                audio_present: true,
                streams: vec![
                    ProbedStream {
                        index: 0,
                        kind: StreamKind::Video,
                        codec_name: Some("h264".to_string()),
                        width: Some(1280),
                        height: Some(720),
                        display_aspect_ratio: Some("16:9".to_string()),
                    },
                    ProbedStream {
                        index: 1,
                        kind: StreamKind::Audio,
                        codec_name: Some("aac".to_string()),
                        width: None,
                        height: None,
                        display_aspect_ratio: None,
                    },
                ],
            }),
            "audio" => Ok(ProbeResult {
                audio_present: true,
                ..ProbeResult::default()
            }),
            _ => Err(CoreError::ProbeFailed {
                path: path.display().to_string(),
                message: "Invalid data found when processing input".to_string(),
            }),
        }
    }

    fn ensure_available(&self) -> CoreResult<()> {
        if self.missing {
            Err(CoreError::DependencyNotFound("ffprobe".to_string()))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
pub struct ScriptedTranscoder {
    pub delay: Duration,
    pub in_flight: AtomicUsize,
    pub peak: AtomicUsize,
    pub calls: Mutex<Vec<PathBuf>>,
}

impl ScriptedTranscoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Transcoder for ScriptedTranscoder {
    fn transcode(&self, input: &Path, output: &Path, _profile: &EncodingProfile) -> CoreResult<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.lock().unwrap().push(input.to_path_buf());

        thread::sleep(self.delay);
        let name = input.file_name().unwrap().to_string_lossy().into_owned();
        let result = if name.contains("panic") {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            panic!("scripted panic for {name}");
        } else if name.contains("fail") {
            Err(CoreError::Io(io::Error::other("Conversion failed!")))
        } else {
            fs::write(output, "video").map_err(CoreError::from)
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
