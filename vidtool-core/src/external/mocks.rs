// vidtool-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for unit tests and whenever the "test-mocks" feature is enabled.

use super::{FfprobeExecutor, SpawnedProcess};
use crate::error::{CoreError, CoreResult};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

/// Builds an `ExitStatus` carrying the given exit code.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    // Raw wait status: the exit code lives in the second byte.
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Scripted process: replays stderr lines, then exits with a fixed status.
///
/// By default the process counts as already exited from the start. Use
/// [`MockProcess::running_until`] to keep it "running" while lines are read.
#[derive(Clone)]
pub struct MockProcess {
    lines: Rc<RefCell<VecDeque<String>>>,
    exit_status: ExitStatus,
    lines_read: Rc<Cell<usize>>,
    running_until: usize,
    killed: Rc<Cell<bool>>,
}

impl MockProcess {
    pub fn new<S: Into<String>>(lines: Vec<S>, exit_code: i32) -> Self {
        Self {
            lines: Rc::new(RefCell::new(lines.into_iter().map(Into::into).collect())),
            exit_status: exit_status(exit_code),
            lines_read: Rc::new(Cell::new(0)),
            running_until: 0,
            killed: Rc::new(Cell::new(false)),
        }
    }

    /// Reports the process as still running until `count` lines have been read.
    pub fn running_until(mut self, count: usize) -> Self {
        self.running_until = count;
        self
    }

    pub fn was_killed(&self) -> bool {
        self.killed.get()
    }

    fn has_exited(&self) -> bool {
        self.killed.get() || self.lines_read.get() >= self.running_until
    }
}

impl SpawnedProcess for MockProcess {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let line = self.lines.borrow_mut().pop_front();
        if line.is_some() {
            self.lines_read.set(self.lines_read.get() + 1);
        }
        Ok(line)
    }

    fn try_wait(&mut self) -> io::Result<Option<ExitStatus>> {
        Ok(self.has_exited().then_some(self.exit_status))
    }

    fn wait(&mut self) -> io::Result<ExitStatus> {
        Ok(self.exit_status)
    }

    fn kill(&mut self) -> io::Result<()> {
        self.killed.set(true);
        Ok(())
    }
}

/// Mock implementation of FfprobeExecutor.
#[derive(Clone, Default)]
pub struct MockFfprobeExecutor {
    /// Map of input path -> raw JSON, or an error message to fail with.
    results: Rc<RefCell<HashMap<PathBuf, Result<Value, String>>>>,
    received_calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockFfprobeExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Add the JSON document ffprobe should "print" for `input_path`.
    pub fn expect_metadata(&self, input_path: &Path, metadata: Value) {
        self.results
            .borrow_mut()
            .insert(input_path.to_path_buf(), Ok(metadata));
    }

    /// Make probing `input_path` fail with `MalformedOutput`.
    pub fn expect_failure(&self, input_path: &Path, message: &str) {
        self.results
            .borrow_mut()
            .insert(input_path.to_path_buf(), Err(message.to_string()));
    }

    pub fn get_received_calls(&self) -> Vec<PathBuf> {
        self.received_calls.borrow().clone()
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<Value> {
        log::info!("MockFfprobeExecutor::probe called for: {}", input_path.display());
        self.received_calls.borrow_mut().push(input_path.to_path_buf());
        match self.results.borrow().get(input_path) {
            Some(Ok(metadata)) => Ok(metadata.clone()),
            Some(Err(message)) => Err(CoreError::MalformedOutput(message.clone())),
            None => {
                log::error!(
                    "MockFfprobeExecutor: No expectation set for path: {}",
                    input_path.display()
                );
                Err(CoreError::MalformedOutput(format!(
                    "MockFfprobeExecutor: No expectation set for path {}",
                    input_path.display()
                )))
            }
        }
    }
}
