// ============================================================================
// vidtool-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates every process vidtool launches. Commands are
// described as `CommandLine` values so they can be logged, inspected in tests
// and named in error messages before anything is spawned.
//
// KEY COMPONENTS:
// - CommandLine: program path plus argument vector
// - FfprobeExecutor: trait for obtaining raw ffprobe JSON (plus the
//   production implementation)
// - ProgressLines: lazy iterator over a running process's stderr lines
// - run_to_completion: blocking execution that captures all output
//
// DESIGN PHILOSOPHY:
// Consumers can provide their own `FfprobeExecutor` or `SpawnedProcess`
// implementations for testing; the `mocks` module ships scripted ones.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

// ============================================================================
// SUBMODULES
// ============================================================================

/// Trait and implementation for running ffprobe
pub mod ffprobe_executor;

/// Streaming and blocking process execution
pub mod process;

/// Scripted stand-ins for processes and the prober
#[cfg(any(test, feature = "test-mocks"))]
pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffprobe_executor::{CommandFfprobeExecutor, FfprobeExecutor};
pub use process::{ChildProcess, ProgressLines, SpawnedProcess, run_streaming, run_to_completion};

// ============================================================================
// COMMAND LINE
// ============================================================================

/// An external command: the program to run and its arguments.
///
/// # Examples
///
/// ```rust
/// use vidtool_core::external::CommandLine;
///
/// let mut cmd = CommandLine::new("ffmpeg");
/// cmd.arg("-i").arg("in.mp4").arg("out.avi");
/// assert_eq!(cmd.to_string(), "ffmpeg -i in.mp4 out.avi");
/// assert_eq!(cmd.args_lossy(), vec!["-i", "in.mp4", "out.avi"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: PathBuf,
    args: Vec<OsString>,
}

impl CommandLine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(&mut self, arg: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.arg(arg);
        }
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments as (lossily decoded) strings.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    /// Short name used in logs and errors: the program's file name.
    pub fn name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// Builds a `std::process::Command` with stdio left at the defaults.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", quote(&arg.to_string_lossy()))?;
        }
        Ok(())
    }
}

fn quote(part: &str) -> String {
    if part.is_empty() || part.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
        format!("{:?}", part)
    } else {
        part.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_arguments_with_spaces() {
        let mut cmd = CommandLine::new("/usr/bin/ffmpeg");
        cmd.args(["-i", "my video.mp4"]);
        assert_eq!(cmd.to_string(), "/usr/bin/ffmpeg -i \"my video.mp4\"");
    }

    #[test]
    fn test_name_is_program_file_name() {
        assert_eq!(CommandLine::new("/opt/ff/bin/ffmpeg").name(), "ffmpeg");
        assert_eq!(CommandLine::new("ffprobe").name(), "ffprobe");
    }

    #[test]
    fn test_to_command_carries_program_and_args() {
        let mut cmd = CommandLine::new("ffmpeg");
        cmd.arg("-version");
        let std_cmd = cmd.to_command();
        assert_eq!(std_cmd.get_program(), "ffmpeg");
        assert_eq!(std_cmd.get_args().collect::<Vec<_>>(), vec!["-version"]);
    }
}
