// ============================================================================
// vidtool-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Core Library
//
// Every fallible operation in vidtool-core returns `CoreResult<T>`. Process
// related variants are built through the helper functions at the bottom of
// this file so their messages stay uniform.

use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by the core library.
#[derive(Error, Debug)]
pub enum CoreError {
    /// An external tool could not be found on PATH or at its configured path.
    #[error("Required dependency '{0}' not found. Please ensure it is installed and in your PATH.")]
    DependencyNotFound(String),

    /// An external command exists but could not be started.
    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, #[source] io::Error),

    /// Waiting on (or reading from) a running command failed.
    #[error("Failed while waiting for command '{0}': {1}")]
    CommandWait(String, #[source] io::Error),

    /// An external command ran to completion with a non-zero status.
    #[error("Error command: {command} ({status})")]
    ProcessExecution { command: String, status: ExitStatus },

    /// The prober produced JSON that does not have the expected shape.
    #[error("Malformed ffprobe output: {0}")]
    MalformedOutput(String),

    /// The prober produced output that is not JSON at all.
    #[error("Failed to parse ffprobe output as JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The caller asked for an output format outside the allow-list.
    #[error("Unsupported {kind} format '{requested}'. Supported formats: {supported}")]
    UnsupportedFormat {
        kind: &'static str,
        requested: String,
        supported: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Free-form failure with context, mostly produced by the CLI.
    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

pub fn process_execution_error(cmd: impl Into<String>, status: ExitStatus) -> CoreError {
    CoreError::ProcessExecution {
        command: cmd.into(),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_message_lists_formats() {
        let err = CoreError::UnsupportedFormat {
            kind: "video",
            requested: "webm".to_string(),
            supported: "mp4, avi".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported video format 'webm'. Supported formats: mp4, avi"
        );
    }

    #[test]
    fn test_command_start_error_keeps_source() {
        let err = command_start_error("ffmpeg", io::Error::new(io::ErrorKind::NotFound, "nope"));
        assert!(matches!(err, CoreError::CommandStart(ref cmd, _) if cmd == "ffmpeg"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
