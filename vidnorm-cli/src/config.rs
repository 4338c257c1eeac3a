// vidnorm-cli/src/config.rs
//
// Resolves the effective `CoreConfig` for a command.
//
// Sources, lowest to highest precedence: library defaults, the TOML file given
// with --config, then command-line flags. Environment variables are folded into
// the flags by clap, so they sit between the file and explicit flags.

use crate::cli::{ConvertArgs, DirArgs, ProfileArgs, RuntimeArgs};

use anyhow::{Context, Result};
use std::path::Path;
use vidnorm_core::{CoreConfig, CoreConfigBuilder, FileConfig};

/// Defaults overlaid with the config file, if any.
pub fn base_config(config_file: Option<&Path>) -> Result<CoreConfig> {
    let config = CoreConfig::default();
    match config_file {
        Some(path) => {
            let file = FileConfig::load(path)
                .with_context(|| format!("Could not load configuration from {}", path.display()))?;
            Ok(file.apply_to(config))
        }
        None => Ok(config),
    }
}

fn apply_dirs(mut builder: CoreConfigBuilder, dirs: &DirArgs) -> CoreConfigBuilder {
    if let Some(dir) = &dirs.input_dir {
        builder = builder.input_dir(dir.clone());
    }
    if let Some(dir) = &dirs.output_dir {
        builder = builder.output_dir(dir.clone());
    }
    builder
}

fn apply_runtime(mut builder: CoreConfigBuilder, runtime: &RuntimeArgs) -> CoreConfigBuilder {
    if let Some(dir) = &runtime.log_dir {
        builder = builder.log_dir(dir.clone());
    }
    if let Some(path) = &runtime.ffprobe {
        builder = builder.ffprobe_path(path.clone());
    }
    if let Some(path) = &runtime.ffmpeg {
        builder = builder.ffmpeg_path(path.clone());
    }
    if let Some(bytes) = runtime.log_max_bytes {
        builder = builder.log_max_bytes(bytes);
    }
    builder
}

fn apply_profile(mut builder: CoreConfigBuilder, profile: &ProfileArgs) -> CoreConfigBuilder {
    if let Some(codec) = &profile.video_codec {
        builder = builder.video_codec(codec.as_str());
    }
    if let Some(preset) = &profile.preset {
        builder = builder.preset(preset.as_str());
    }
    if let Some(crf) = profile.crf {
        builder = builder.crf(crf);
    }
    if let Some(height) = profile.max_height {
        builder = builder.max_height(height);
    }
    if let Some(codec) = &profile.audio_codec {
        builder = builder.audio_codec(codec.as_str());
    }
    if let Some(bitrate) = &profile.audio_bitrate {
        builder = builder.audio_bitrate(bitrate.as_str());
    }
    builder
}

pub fn convert_config(base: CoreConfig, args: &ConvertArgs) -> CoreConfig {
    let mut builder = CoreConfigBuilder::from_config(base);
    builder = apply_dirs(builder, &args.dirs);
    builder = apply_runtime(builder, &args.runtime);
    builder = apply_profile(builder, &args.profile);
    if let Some(jobs) = args.jobs {
        builder = builder.max_concurrency(jobs as usize);
    }
    if args.no_sanitize {
        builder = builder.sanitize_names(false);
    }
    builder.build()
}

pub fn validate_config(base: CoreConfig, dirs: &DirArgs, runtime: &RuntimeArgs) -> CoreConfig {
    let builder = apply_dirs(CoreConfigBuilder::from_config(base), dirs);
    apply_runtime(builder, runtime).build()
}

pub fn inspect_config(base: CoreConfig, runtime: &RuntimeArgs) -> CoreConfig {
    apply_runtime(CoreConfigBuilder::from_config(base), runtime).build()
}
