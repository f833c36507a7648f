//! ffprobe integration for media analysis.
//!
//! Runs ffprobe with JSON output for both the container format and every
//! stream, and hands the parsed document back untouched. Turning it into
//! typed fields is the job of [`crate::media::MediaMetadata`].
use crate::config::{FFPROBE, Toolchain};
use crate::error::{CoreError, CoreResult};
use crate::external::{CommandLine, run_to_completion};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Arguments placed before the input path on every ffprobe call.
pub const FFPROBE_ARGS: [&str; 6] = [
    "-v",
    "quiet",
    "-print_format",
    "json",
    "-show_format",
    "-show_streams",
];

/// Source of raw ffprobe metadata for a file.
pub trait FfprobeExecutor {
    /// Probes `input_path` and returns ffprobe's JSON document.
    fn probe(&self, input_path: &Path) -> CoreResult<Value>;
}

/// Runs the ffprobe executable of a [`Toolchain`].
#[derive(Debug, Clone)]
pub struct CommandFfprobeExecutor {
    ffprobe: PathBuf,
}

impl CommandFfprobeExecutor {
    pub fn new(ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe: ffprobe.into(),
        }
    }

    pub fn from_toolchain(toolchain: &Toolchain) -> Self {
        Self::new(toolchain.ffprobe())
    }

    /// The full ffprobe invocation for `input_path`.
    pub fn command(&self, input_path: &Path) -> CommandLine {
        let mut cmd = CommandLine::new(&self.ffprobe);
        cmd.args(FFPROBE_ARGS).arg(input_path);
        cmd
    }
}

impl FfprobeExecutor for CommandFfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<Value> {
        log::debug!("Running ffprobe on: {}", input_path.display());
        let output = run_to_completion(&self.command(input_path)).map_err(|err| match err {
            CoreError::CommandStart(_, ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CoreError::DependencyNotFound(FFPROBE.to_string())
            }
            other => other,
        })?;

        // A non-zero exit is not fatal here: whatever JSON ffprobe printed
        // decides the outcome.
        if !output.status.success() {
            log::warn!(
                "ffprobe exited with {} for {}",
                output.status,
                input_path.display()
            );
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            log::error!(
                "ffprobe output for {} is not valid JSON: {}",
                input_path.display(),
                e
            );
            CoreError::JsonParse(e)
        })
    }
}
