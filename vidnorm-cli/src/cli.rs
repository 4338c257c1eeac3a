// vidnorm-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.
//
// Every option is optional. Unset options fall back to the config file (if
// one is given), then to the library defaults. Options with an `env` name can
// also be set through `VIDNORM_*` environment variables; a flag on the command
// line still wins over the variable.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vidnorm: batch video normalization",
    long_about = "Validates the files in an input folder, converts every video to a \
                  normalized MP4 with ffmpeg, and inspects the results."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE", env = "VIDNORM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show debug messages on the console
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate, convert and inspect every video in the input directory
    Convert(ConvertArgs),
    /// Report which files in the input directory would be converted
    Validate(ValidateArgs),
    /// Describe the streams and format of the given files
    Inspect(InspectArgs),
}

/// Input and output directories.
#[derive(Args, Debug, Default, Clone)]
pub struct DirArgs {
    /// Directory scanned for input files
    #[arg(short = 'i', long = "input", value_name = "DIR", env = "VIDNORM_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving converted files
    #[arg(short = 'o', long = "output", value_name = "DIR", env = "VIDNORM_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Options shared by every command.
#[derive(Args, Debug, Default, Clone)]
pub struct RuntimeArgs {
    /// Directory for the log file
    #[arg(short = 'l', long = "log-dir", value_name = "DIR", env = "VIDNORM_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to the ffprobe executable
    #[arg(long, value_name = "PATH", env = "VIDNORM_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// Path to the ffmpeg executable
    #[arg(long, value_name = "PATH", env = "VIDNORM_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Rotate the log file once it reaches this many bytes
    #[arg(long, value_name = "BYTES", env = "VIDNORM_LOG_MAX_BYTES",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub log_max_bytes: Option<u64>,
}

/// Encoding profile overrides.
#[derive(Args, Debug, Default, Clone)]
pub struct ProfileArgs {
    /// Video encoder passed to ffmpeg's -c:v
    #[arg(long, value_name = "CODEC", env = "VIDNORM_VIDEO_CODEC")]
    pub video_codec: Option<String>,

    /// Encoder preset (e.g. ultrafast, medium, slow)
    #[arg(long, value_name = "PRESET", env = "VIDNORM_PRESET")]
    pub preset: Option<String>,

    /// Constant rate factor (0-51, lower is better quality)
    #[arg(long, value_name = "CRF", env = "VIDNORM_CRF",
          value_parser = clap::value_parser!(u8).range(0..=51))]
    pub crf: Option<u8>,

    /// Maximum output height in pixels; smaller inputs are not upscaled
    #[arg(long, value_name = "PIXELS", env = "VIDNORM_MAX_HEIGHT",
          value_parser = clap::value_parser!(u32).range(1..))]
    pub max_height: Option<u32>,

    /// Audio encoder passed to ffmpeg's -c:a
    #[arg(long, value_name = "CODEC", env = "VIDNORM_AUDIO_CODEC")]
    pub audio_codec: Option<String>,

    /// Audio bitrate passed to ffmpeg's -b:a (e.g. 128k)
    #[arg(long, value_name = "RATE", env = "VIDNORM_AUDIO_BITRATE")]
    pub audio_bitrate: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    #[command(flatten)]
    pub runtime: RuntimeArgs,

    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Maximum number of conversions running at once
    #[arg(short = 'j', long = "jobs", value_name = "N", env = "VIDNORM_MAX_CONCURRENCY",
          value_parser = clap::value_parser!(u32).range(1..))]
    pub jobs: Option<u32>,

    /// Keep input file names as-is instead of normalizing output names
    #[arg(long, default_value_t = false)]
    pub no_sanitize: bool,

    /// Exit with a non-zero status if any conversion failed
    #[arg(long, default_value_t = false)]
    pub fail_on_error: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    #[command(flatten)]
    pub runtime: RuntimeArgs,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Files to describe
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub runtime: RuntimeArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert_defaults() {
        let cli = Cli::parse_from(["vidnorm", "convert"]);
        match cli.command {
            Commands::Convert(args) => {
                assert!(args.dirs.input_dir.is_none());
                assert!(args.profile.crf.is_none());
                assert!(!args.no_sanitize);
                assert!(!args.fail_on_error);
            }
            other => panic!("Expected Convert command, got {other:?}"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_convert_overrides() {
        let cli = Cli::parse_from([
            "vidnorm", "convert", "-i", "in", "-o", "out", "-j", "4", "--crf", "28",
            "--max-height", "1080", "--fail-on-error", "--verbose",
        ]);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.dirs.input_dir, Some(PathBuf::from("in")));
                assert_eq!(args.dirs.output_dir, Some(PathBuf::from("out")));
                assert_eq!(args.jobs, Some(4));
                assert_eq!(args.profile.crf, Some(28));
                assert_eq!(args.profile.max_height, Some(1080));
                assert!(args.fail_on_error);
            }
            other => panic!("Expected Convert command, got {other:?}"),
        }
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(Cli::try_parse_from(["vidnorm", "convert", "--crf", "60"]).is_err());
        assert!(Cli::try_parse_from(["vidnorm", "convert", "--jobs", "0"]).is_err());
    }

    #[test]
    fn test_inspect_requires_files() {
        assert!(Cli::try_parse_from(["vidnorm", "inspect"]).is_err());
        let cli = Cli::parse_from(["vidnorm", "inspect", "a.mkv", "b.mp4"]);
        match cli.command {
            Commands::Inspect(args) => assert_eq!(args.files.len(), 2),
            other => panic!("Expected Inspect command, got {other:?}"),
        }
    }
}
