//! Configuration structures and constants for the vidnorm-core library.
//!
//! `CoreConfig` is created by consumers of the library (like vidnorm-cli),
//! either directly, through [`CoreConfigBuilder`], or layered on top of a TOML
//! file via [`FileConfig`], and then passed to the pipeline at construction.

mod builder;
mod file;

use crate::error::{CoreError, CoreResult};
use serde::Deserialize;
use std::path::PathBuf;

pub use builder::CoreConfigBuilder;
pub use file::FileConfig;

// Default constants

/// Default input folder, relative to the working directory.
pub const DEFAULT_INPUT_DIR: &str = "convert";

/// Default output folder, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "converted";

/// Default log folder, relative to the working directory.
pub const DEFAULT_LOG_DIR: &str = "logging";

/// Default number of concurrent transcoder invocations.
pub const DEFAULT_MAX_CONCURRENCY: usize = 2;

/// Default video encoder.
pub const DEFAULT_VIDEO_CODEC: &str = "libx265";

/// Default encoder preset (speed/efficiency balance).
pub const DEFAULT_PRESET: &str = "medium";

/// Default constant rate factor.
/// Lower values produce higher quality but larger files. Range: 0-51.
pub const DEFAULT_CRF: u8 = 23;

/// Highest CRF accepted by the x264/x265 encoders.
pub const MAX_CRF: u8 = 51;

/// Default maximum output height; width follows the source aspect ratio.
pub const DEFAULT_MAX_HEIGHT: u32 = 720;

/// Default audio encoder.
pub const DEFAULT_AUDIO_CODEC: &str = "aac";

/// Default audio bitrate passed to `-b:a`.
pub const DEFAULT_AUDIO_BITRATE: &str = "128k";

/// Default prober executable.
pub const DEFAULT_FFPROBE_PATH: &str = "ffprobe";

/// Default transcoder executable.
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Log file size that triggers a rotation (5 MiB).
pub const DEFAULT_LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Number of rotated log files kept next to the active one.
pub const DEFAULT_LOG_BACKUPS: u32 = 1;

/// Encoding parameters handed to the transcoder for every job.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodingProfile {
    /// Video encoder name (`-c:v`)
    pub video_codec: String,

    /// Encoder preset (`-preset`)
    pub preset: String,

    /// Constant rate factor (`-crf`)
    pub crf: u8,

    /// Output height cap; the width is derived to keep the aspect ratio
    pub max_height: u32,

    /// Audio encoder name (`-c:a`)
    pub audio_codec: String,

    /// Audio bitrate (`-b:a`), e.g. "128k"
    pub audio_bitrate: String,
}

impl Default for EncodingProfile {
    fn default() -> Self {
        Self {
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            preset: DEFAULT_PRESET.to_string(),
            crf: DEFAULT_CRF,
            max_height: DEFAULT_MAX_HEIGHT,
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            audio_bitrate: DEFAULT_AUDIO_BITRATE.to_string(),
        }
    }
}

impl EncodingProfile {
    /// Scale filter capping the height at `max_height` without upscaling.
    ///
    /// `-2` keeps the width divisible by two, which the encoders require.
    pub fn scale_filter(&self) -> String {
        format!("scale=-2:'min({},ih)'", self.max_height)
    }

    /// Transcoder arguments placed between the input and the output path.
    pub fn to_args(&self) -> Vec<String> {
        vec![
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
            "-crf".to_string(),
            self.crf.to_string(),
            "-vf".to_string(),
            self.scale_filter(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-b:a".to_string(),
            self.audio_bitrate.clone(),
        ]
    }

    fn validate(&self) -> CoreResult<()> {
        if self.video_codec.trim().is_empty() {
            return Err(CoreError::Config("video codec must not be empty".to_string()));
        }
        if self.audio_codec.trim().is_empty() {
            return Err(CoreError::Config("audio codec must not be empty".to_string()));
        }
        if self.preset.trim().is_empty() {
            return Err(CoreError::Config("encoder preset must not be empty".to_string()));
        }
        if self.crf > MAX_CRF {
            return Err(CoreError::Config(format!(
                "crf must be between 0 and {MAX_CRF}, got {}",
                self.crf
            )));
        }
        if self.max_height == 0 {
            return Err(CoreError::Config("max height must be greater than zero".to_string()));
        }
        if self.audio_bitrate.trim().is_empty() {
            return Err(CoreError::Config("audio bitrate must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Main configuration structure for the vidnorm-core library.
///
/// All fields have sensible defaults, so only the directories usually need
/// to be set.
///
/// # Examples
///
/// ```rust,no_run
/// use vidnorm_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/path/to/input"))
///     .output_dir(PathBuf::from("/path/to/output"))
///     .log_dir(PathBuf::from("/path/to/logs"))
///     .max_concurrency(4)
///     .crf(26)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory scanned (non-recursively) for input files
    pub input_dir: PathBuf,

    /// Directory receiving the converted files
    pub output_dir: PathBuf,

    /// Directory holding the rotating run log
    pub log_dir: PathBuf,

    /// Number of transcoder invocations allowed to run at once
    pub max_concurrency: usize,

    /// Encoding parameters applied to every job
    pub profile: EncodingProfile,

    /// Prober executable (name on PATH or absolute path)
    pub ffprobe_path: PathBuf,

    /// Transcoder executable (name on PATH or absolute path)
    pub ffmpeg_path: PathBuf,

    /// Normalize output file stems to `[A-Za-z0-9._-]`
    pub sanitize_names: bool,

    /// Log size in bytes that triggers a rotation
    pub log_max_bytes: u64,

    /// Rotated log files kept
    pub log_backups: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            profile: EncodingProfile::default(),
            ffprobe_path: PathBuf::from(DEFAULT_FFPROBE_PATH),
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG_PATH),
            sanitize_names: true,
            log_max_bytes: DEFAULT_LOG_MAX_BYTES,
            log_backups: DEFAULT_LOG_BACKUPS,
        }
    }
}

impl CoreConfig {
    /// Creates a configuration with default settings for the given directories.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, log_dir: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            log_dir,
            ..Default::default()
        }
    }

    /// Checks the configuration for values the pipeline cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_concurrency == 0 {
            return Err(CoreError::Config(
                "max concurrency must be at least 1".to_string(),
            ));
        }
        if self.input_dir == self.output_dir {
            return Err(CoreError::Config(format!(
                "input and output directories must differ ({})",
                self.input_dir.display()
            )));
        }
        if self.log_max_bytes == 0 {
            return Err(CoreError::Config(
                "log rotation threshold must be greater than zero".to_string(),
            ));
        }
        if self.ffprobe_path.as_os_str().is_empty() || self.ffmpeg_path.as_os_str().is_empty() {
            return Err(CoreError::Config("tool paths must not be empty".to_string()));
        }
        self.profile.validate()
    }
}
