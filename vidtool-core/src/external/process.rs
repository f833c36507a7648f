// ============================================================================
// vidtool-core/src/external/process.rs
// ============================================================================
//
// PROCESS EXECUTION: Streaming and Blocking Runners
//
// `run_streaming` launches a command and hands back `ProgressLines`, a pull
// based iterator over the process's stderr (where ffmpeg writes its progress).
// Every call to `next` blocks until a full line is available or the stream
// ends. The exit status is only inspected once the stream is drained: a
// non-zero status is reported as the final `Err` item.
//
// `run_to_completion` is the blocking counterpart used by operations that do
// not stream anything back to the caller.
//
// KNOWN LIMITATION: dropping `ProgressLines` before it is exhausted does not
// stop the child. Call `ProgressLines::kill` to terminate it.

use crate::error::{
    CoreResult, command_start_error, command_wait_error, process_execution_error,
};
use crate::external::CommandLine;
use std::io::{self, BufRead, BufReader};
use std::iter::FusedIterator;
use std::process::{Child, ChildStderr, ChildStdout, ExitStatus, Output, Stdio};

// ============================================================================
// PROCESS ABSTRACTION
// ============================================================================

/// A running process whose diagnostic stream can be read line by line.
pub trait SpawnedProcess {
    /// Reads the next line from the diagnostic stream, without its line
    /// terminator. Returns `Ok(None)` once the stream is exhausted.
    fn next_line(&mut self) -> io::Result<Option<String>>;

    /// Returns the exit status if the process has already terminated.
    fn try_wait(&mut self) -> io::Result<Option<ExitStatus>>;

    /// Blocks until the process terminates.
    fn wait(&mut self) -> io::Result<ExitStatus>;

    fn kill(&mut self) -> io::Result<()>;
}

/// A real child process with piped stdout and stderr.
pub struct ChildProcess {
    child: Child,
    stderr: LineReader<BufReader<ChildStderr>>,
    // Held open so the child never sees a closed stdout.
    _stdout: Option<ChildStdout>,
}

impl ChildProcess {
    pub fn spawn(cmd: &CommandLine) -> CoreResult<Self> {
        let mut child = cmd
            .to_command()
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                log::error!("Failed to spawn {}: {}", cmd.name(), e);
                command_start_error(cmd.name(), e)
            })?;

        let stderr = match child.stderr.take() {
            Some(stderr) => stderr,
            None => {
                let _ = child.kill();
                return Err(command_start_error(
                    cmd.name(),
                    io::Error::other("stderr was not captured"),
                ));
            }
        };

        Ok(Self {
            _stdout: child.stdout.take(),
            stderr: LineReader::new(BufReader::new(stderr)),
            child,
        })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }
}

impl SpawnedProcess for ChildProcess {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        self.stderr.read_line()
    }

    fn try_wait(&mut self) -> io::Result<Option<ExitStatus>> {
        self.child.try_wait()
    }

    fn wait(&mut self) -> io::Result<ExitStatus> {
        self.child.wait()
    }

    fn kill(&mut self) -> io::Result<()> {
        self.child.kill()
    }
}

// ============================================================================
// LINE SPLITTING
// ============================================================================

/// Splits a byte stream on `\n`, `\r` and `\r\n`.
///
/// ffmpeg redraws its status line with a bare carriage return, so `\r` has to
/// count as a terminator for progress to arrive line by line. A `\n` directly
/// after a `\r` is swallowed on the next read rather than peeked for, which
/// would block until the encoder writes again.
pub(crate) struct LineReader<R> {
    inner: R,
    pending_cr: bool,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            pending_cr: false,
        }
    }

    pub(crate) fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        loop {
            let available = match self.inner.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if available.is_empty() {
                return Ok(if buf.is_empty() {
                    None
                } else {
                    Some(String::from_utf8_lossy(&buf).into_owned())
                });
            }

            if std::mem::take(&mut self.pending_cr) && available[0] == b'\n' {
                self.inner.consume(1);
                continue;
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    let terminator = available[end];
                    buf.extend_from_slice(&available[..end]);
                    self.inner.consume(end + 1);
                    self.pending_cr = terminator == b'\r';
                    return Ok(Some(String::from_utf8_lossy(&buf).into_owned()));
                }
                None => {
                    let len = available.len();
                    buf.extend_from_slice(available);
                    self.inner.consume(len);
                }
            }
        }
    }
}

// ============================================================================
// STREAMING RUNNER
// ============================================================================

/// Lazy sequence of trimmed stderr lines from a running process.
///
/// Termination rules:
/// - the stream ends (EOF): wait for the process and stop;
/// - a line that is empty after trimming while the process has already
///   exited: stop without yielding it;
/// - an empty line while the process is still running is yielded as-is.
///
/// After stopping, a non-zero exit status is yielded once as
/// `Err(CoreError::ProcessExecution)`. The iterator is fused.
pub struct ProgressLines<P: SpawnedProcess = ChildProcess> {
    process: P,
    command: String,
    finished: bool,
}

impl<P: SpawnedProcess> ProgressLines<P> {
    /// Wraps an already running process. `command` names it in errors.
    pub fn new(process: P, command: impl Into<String>) -> Self {
        Self {
            process,
            command: command.into(),
            finished: false,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Terminates the process and reaps it. Iteration yields nothing afterwards.
    pub fn kill(&mut self) -> CoreResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        log::debug!("Killing {}", self.command);
        // The process may already have exited on its own.
        if let Err(e) = self.process.kill() {
            log::debug!("kill({}) failed: {}", self.command, e);
        }
        self.process
            .wait()
            .map(|_| ())
            .map_err(|e| command_wait_error(self.command.as_str(), e))
    }

    fn finish(&mut self) -> Option<CoreResult<String>> {
        self.finished = true;
        match self.process.wait() {
            Ok(status) if status.success() => {
                log::debug!("{} finished successfully", self.command);
                None
            }
            Ok(status) => {
                log::error!("{} failed with {}", self.command, status);
                Some(Err(process_execution_error(self.command.as_str(), status)))
            }
            Err(e) => Some(Err(command_wait_error(self.command.as_str(), e))),
        }
    }

    fn fail(&mut self, err: io::Error) -> Option<CoreResult<String>> {
        self.finished = true;
        log::error!("Reading output of {} failed: {}", self.command, err);
        Some(Err(command_wait_error(self.command.as_str(), err)))
    }
}

impl<P: SpawnedProcess> Iterator for ProgressLines<P> {
    type Item = CoreResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.process.next_line() {
            Ok(Some(raw)) => {
                let line = raw.trim_end();
                if line.is_empty() {
                    match self.process.try_wait() {
                        Ok(Some(_)) => return self.finish(),
                        Ok(None) => {}
                        Err(e) => return self.fail(e),
                    }
                }
                Some(Ok(line.to_string()))
            }
            Ok(None) => self.finish(),
            Err(e) => self.fail(e),
        }
    }
}

impl<P: SpawnedProcess> FusedIterator for ProgressLines<P> {}

/// Launches `cmd` and returns an iterator over its stderr lines.
///
/// Fails immediately only if the process cannot be started; a non-zero exit
/// surfaces as the last item of the iterator.
pub fn run_streaming(cmd: &CommandLine) -> CoreResult<ProgressLines<ChildProcess>> {
    log::debug!("Running command (streaming): {}", cmd);
    let process = ChildProcess::spawn(cmd)?;
    log::debug!("Spawned {} with pid {}", cmd.name(), process.id());
    Ok(ProgressLines::new(process, cmd.name()))
}

// ============================================================================
// BLOCKING RUNNER
// ============================================================================

/// Runs `cmd` to completion, capturing stdout and stderr.
///
/// The exit status is returned, not judged: callers decide what a non-zero
/// exit means for them.
pub fn run_to_completion(cmd: &CommandLine) -> CoreResult<Output> {
    log::debug!("Running command: {}", cmd);
    let output = cmd
        .to_command()
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            log::error!("Failed to execute {}: {}", cmd.name(), e);
            command_start_error(cmd.name(), e)
        })?;
    log::debug!("{} exited with {}", cmd.name(), output.status);
    Ok(output)
}
