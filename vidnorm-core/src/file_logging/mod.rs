//! Logging setup: console plus a size-rotated log file.
//!
//! The log file is `<log_dir>/vidnorm.log`. When it grows past the configured
//! size it is rolled to `vidnorm.1.log`, keeping the configured number of
//! backups.

use anyhow::{Context, Result};
use log::LevelFilter;
use log4rs::{
    Handle,
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            RollingFileAppender,
            policy::compound::{
                CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
            },
        },
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};
use std::path::{Path, PathBuf};

/// Name of the active log file inside the log directory.
pub const LOG_FILE_NAME: &str = "vidnorm.log";

const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] {m}{n}";
const CONSOLE_PATTERN: &str = "{h({l:<5})} {m}{n}";

/// Logging destinations and levels.
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    pub log_dir: PathBuf,
    pub console_level: LevelFilter,
    pub file_level: LevelFilter,
    pub max_bytes: u64,
    pub backups: u32,
}

impl LoggingOptions {
    /// Info on the console, debug in the file.
    pub fn new(log_dir: impl Into<PathBuf>, max_bytes: u64, backups: u32) -> Self {
        Self {
            log_dir: log_dir.into(),
            console_level: LevelFilter::Info,
            file_level: LevelFilter::Debug,
            max_bytes,
            backups,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.console_level = LevelFilter::Debug;
        }
        self
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }
}

fn roll_pattern(log_dir: &Path) -> String {
    log_dir.join("vidnorm.{}.log").to_string_lossy().into_owned()
}

/// Builds the log4rs configuration, creating the log directory if needed.
pub fn build_config(options: &LoggingOptions) -> Result<Config> {
    std::fs::create_dir_all(&options.log_dir)
        .with_context(|| format!("Failed to create log directory {}", options.log_dir.display()))?;

    let roller = FixedWindowRoller::builder()
        .base(1)
        .build(&roll_pattern(&options.log_dir), options.backups.max(1))
        .context("Failed to configure log rotation")?;
    let policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(options.max_bytes)),
        Box::new(roller),
    );

    let file_appender = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(options.log_file(), Box::new(policy))
        .with_context(|| format!("Failed to open log file {}", options.log_file().display()))?;

    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();

    let root_level = options.console_level.max(options.file_level);
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(options.file_level)))
                .build("file", Box::new(file_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(options.console_level)))
                .build("console", Box::new(console_appender)),
        )
        .build(
            Root::builder()
                .appender("file")
                .appender("console")
                .build(root_level),
        )
        .context("Invalid logging configuration")?;

    Ok(config)
}

/// Installs the global logger. Can only succeed once per process.
pub fn setup_logging(options: &LoggingOptions) -> Result<Handle> {
    let config = build_config(options)?;
    let handle = log4rs::init_config(config).context("Failed to install logger")?;
    log::debug!("Logging to {}", options.log_file().display());
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_build_config_creates_log_file() {
        let dir = tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let options = LoggingOptions::new(&log_dir, 1024, 1);

        build_config(&options).unwrap();
        assert!(log_dir.join(LOG_FILE_NAME).exists());
    }

    #[test]
    fn test_verbose_lowers_console_level() {
        let options = LoggingOptions::new("logs", 1024, 1);
        assert_eq!(options.console_level, LevelFilter::Info);
        assert_eq!(options.verbose(true).console_level, LevelFilter::Debug);
    }

    #[test]
    fn test_roll_pattern() {
        assert_eq!(roll_pattern(Path::new("logs")), format!("logs{}vidnorm.{{}}.log", std::path::MAIN_SEPARATOR));
    }
}
