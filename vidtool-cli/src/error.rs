// ============================================================================
// vidtool-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and context helpers for the CLI
//
// Commands share the core error type so a failure from ffprobe, ffmpeg or
// argument validation reaches `main` unchanged and is printed in one place.

use vidtool_core::{CoreError, CoreResult};

use std::fmt;

/// Result type used by every command handler.
pub type CliResult<T> = CoreResult<T>;

/// Extension trait for prefixing errors with what the CLI was doing.
pub trait CliErrorContext<T> {
    /// Prefix the error with a fixed message.
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;

    /// Prefix the error with a lazily built message.
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| CoreError::OperationFailed(format!("{}: {}", context, e.into())))
    }

    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| CoreError::OperationFailed(format!("{}: {}", f(), e.into())))
    }
}
