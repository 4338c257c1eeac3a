//! TOML configuration file support.
//!
//! Every key is optional; absent keys leave the underlying configuration
//! untouched, so a file can be layered over defaults and then under CLI flags.
//!
//! ```toml
//! input_dir = "convert"
//! output_dir = "converted"
//! log_dir = "logging"
//! max_concurrency = 2
//!
//! [tools]
//! ffprobe = "/usr/bin/ffprobe"
//! ffmpeg = "/usr/bin/ffmpeg"
//!
//! [profile]
//! video_codec = "libx265"
//! crf = 23
//! ```

use super::{CoreConfig, EncodingProfile};
use crate::error::{CoreError, CoreResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Paths to the external tools.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolPaths {
    pub ffprobe: Option<PathBuf>,
    pub ffmpeg: Option<PathBuf>,
}

/// On-disk representation of [`CoreConfig`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub max_concurrency: Option<usize>,
    pub sanitize_names: Option<bool>,
    pub log_max_bytes: Option<u64>,
    #[serde(default)]
    pub tools: ToolPaths,
    /// Missing profile keys fall back to the profile defaults
    pub profile: Option<EncodingProfile>,
}

impl FileConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str, origin: &Path) -> CoreResult<Self> {
        toml::from_str(text).map_err(|e| CoreError::ConfigFile {
            path: origin.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CoreError::ConfigFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::debug!("Loaded configuration file {}", path.display());
        Self::from_toml_str(&text, path)
    }

    /// Overlays the keys present in this file onto `config`.
    pub fn apply_to(self, mut config: CoreConfig) -> CoreConfig {
        if let Some(dir) = self.input_dir {
            config.input_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(dir) = self.log_dir {
            config.log_dir = dir;
        }
        if let Some(width) = self.max_concurrency {
            config.max_concurrency = width;
        }
        if let Some(sanitize) = self.sanitize_names {
            config.sanitize_names = sanitize;
        }
        if let Some(bytes) = self.log_max_bytes {
            config.log_max_bytes = bytes;
        }
        if let Some(path) = self.tools.ffprobe {
            config.ffprobe_path = path;
        }
        if let Some(path) = self.tools.ffmpeg {
            config.ffmpeg_path = path;
        }
        if let Some(profile) = self.profile {
            config.profile = profile;
        }
        config
    }
}
