// ============================================================================
// vidnorm-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent API over CoreConfig. Every setter has a default, so
// `CoreConfigBuilder::new().build()` yields `CoreConfig::default()`.

use std::path::PathBuf;

use super::{CoreConfig, EncodingProfile};

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use vidnorm_core::config::CoreConfigBuilder;
/// use std::path::PathBuf;
///
/// let config = CoreConfigBuilder::new()
///     .input_dir(PathBuf::from("/path/to/input"))
///     .output_dir(PathBuf::from("/path/to/output"))
///     .video_codec("libx264")
///     .max_height(1080)
///     .build();
/// assert_eq!(config.profile.max_height, 1080);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new builder holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration, e.g. one loaded from a file.
    pub fn from_config(config: CoreConfig) -> Self {
        Self { config }
    }

    pub fn input_dir(mut self, input_dir: PathBuf) -> Self {
        self.config.input_dir = input_dir;
        self
    }

    pub fn output_dir(mut self, output_dir: PathBuf) -> Self {
        self.config.output_dir = output_dir;
        self
    }

    pub fn log_dir(mut self, log_dir: PathBuf) -> Self {
        self.config.log_dir = log_dir;
        self
    }

    /// Sets the worker pool width.
    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Replaces the whole encoding profile.
    pub fn profile(mut self, profile: EncodingProfile) -> Self {
        self.config.profile = profile;
        self
    }

    pub fn video_codec(mut self, codec: impl Into<String>) -> Self {
        self.config.profile.video_codec = codec.into();
        self
    }

    pub fn preset(mut self, preset: impl Into<String>) -> Self {
        self.config.profile.preset = preset.into();
        self
    }

    pub fn crf(mut self, crf: u8) -> Self {
        self.config.profile.crf = crf;
        self
    }

    pub fn max_height(mut self, max_height: u32) -> Self {
        self.config.profile.max_height = max_height;
        self
    }

    pub fn audio_codec(mut self, codec: impl Into<String>) -> Self {
        self.config.profile.audio_codec = codec.into();
        self
    }

    pub fn audio_bitrate(mut self, bitrate: impl Into<String>) -> Self {
        self.config.profile.audio_bitrate = bitrate.into();
        self
    }

    pub fn ffprobe_path(mut self, path: PathBuf) -> Self {
        self.config.ffprobe_path = path;
        self
    }

    pub fn ffmpeg_path(mut self, path: PathBuf) -> Self {
        self.config.ffmpeg_path = path;
        self
    }

    pub fn sanitize_names(mut self, sanitize: bool) -> Self {
        self.config.sanitize_names = sanitize;
        self
    }

    /// Sets the log rotation threshold in bytes.
    pub fn log_max_bytes(mut self, bytes: u64) -> Self {
        self.config.log_max_bytes = bytes;
        self
    }

    /// Builds the configuration. Call [`CoreConfig::validate`] before use.
    pub fn build(self) -> CoreConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_config_defaults() {
        let built = CoreConfigBuilder::new().build();
        let default = CoreConfig::default();
        assert_eq!(built.input_dir, default.input_dir);
        assert_eq!(built.profile, default.profile);
        assert_eq!(built.max_concurrency, default.max_concurrency);
    }

    #[test]
    fn test_builder_overrides() {
        let config = CoreConfigBuilder::new()
            .input_dir(PathBuf::from("in"))
            .output_dir(PathBuf::from("out"))
            .max_concurrency(4)
            .crf(28)
            .preset("slow")
            .audio_bitrate("96k")
            .sanitize_names(false)
            .build();

        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert_eq!(config.max_concurrency, 4);
        assert_eq!(config.profile.crf, 28);
        assert_eq!(config.profile.preset, "slow");
        assert_eq!(config.profile.audio_bitrate, "96k");
        assert!(!config.sanitize_names);
        assert!(config.validate().is_ok());
    }
}
