// ============================================================================
// vidnorm-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Pipeline
//
// Only environment and configuration errors abort a run. Probe and inspection
// errors are returned per file and isolated by the caller; conversion failures
// never surface as errors at all, they become `ConversionOutcome::Failure`.

use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by vidnorm-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required external tool not found: {0}")]
    DependencyNotFound(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("'{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Probe failed for {path}: {message}")]
    ProbeFailed { path: String, message: String },

    #[error("Could not parse prober output for {path}: {message}")]
    ProbeParse { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid configuration file {path}: {message}")]
    ConfigFile { path: String, message: String },

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Could not allocate an output name for {0}")]
    OutputNameExhausted(String),
}

/// Result alias used throughout the crate.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Whether this error must abort the whole run rather than a single file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CoreError::DependencyNotFound(_)
                | CoreError::CommandStart(..)
                | CoreError::Config(_)
                | CoreError::ConfigFile { .. }
        )
    }
}

pub(crate) fn command_start_error(command: impl Into<String>, err: std::io::Error) -> CoreError {
    if err.kind() == std::io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(command.into())
    } else {
        CoreError::CommandStart(command.into(), err)
    }
}

pub(crate) fn command_failed_error(
    command: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        command: command.into(),
        status,
        stderr: stderr.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_maps_to_dependency_not_found() {
        let err = command_start_error(
            "ffprobe",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(matches!(err, CoreError::DependencyNotFound(ref name) if name == "ffprobe"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_per_file_errors_are_not_fatal() {
        let err = CoreError::ProbeFailed {
            path: "a.mkv".to_string(),
            message: "Invalid data found when processing input".to_string(),
        };
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("Invalid data found"));
    }
}
