// vidtool-core/tests/streaming_runner_tests.rs
#![cfg(unix)]

use vidtool_core::CoreError;
use vidtool_core::external::{CommandLine, run_streaming, run_to_completion};

fn shell(script: &str) -> CommandLine {
    let mut cmd = CommandLine::new("sh");
    cmd.arg("-c").arg(script);
    cmd
}

#[test]
fn test_streaming_yields_every_stderr_line_on_success() -> Result<(), Box<dyn std::error::Error>> {
    let lines = run_streaming(&shell("printf 'frame=1\\nframe=2\\nframe=3\\n' >&2; exit 0"))?
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(lines, vec!["frame=1", "frame=2", "frame=3"]);
    Ok(())
}

#[test]
fn test_streaming_fails_after_lines_on_non_zero_exit() -> Result<(), Box<dyn std::error::Error>> {
    let items: Vec<_> = run_streaming(&shell("printf 'a\\nb\\n' >&2; exit 1"))?.collect();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].as_deref().ok(), Some("a"));
    assert_eq!(items[1].as_deref().ok(), Some("b"));
    match &items[2] {
        Err(CoreError::ProcessExecution { command, status }) => {
            assert_eq!(command, "sh");
            assert_eq!(status.code(), Some(1));
        }
        other => panic!("Expected ProcessExecution error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_streaming_ignores_stdout() -> Result<(), Box<dyn std::error::Error>> {
    let lines = run_streaming(&shell("echo on-stdout; echo on-stderr >&2"))?
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(lines, vec!["on-stderr"]);
    Ok(())
}

#[test]
fn test_streaming_splits_carriage_return_progress() -> Result<(), Box<dyn std::error::Error>> {
    let lines = run_streaming(&shell("printf 'time=00:00:01   \\rtime=00:00:02\\r\\n' >&2"))?
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(lines, vec!["time=00:00:01", "time=00:00:02"]);
    Ok(())
}

#[test]
fn test_streaming_with_no_output_ends_cleanly() -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = run_streaming(&shell("exit 0"))?;
    assert!(lines.next().is_none());
    assert!(lines.is_finished());
    Ok(())
}

#[test]
fn test_streaming_missing_program_fails_to_start() {
    let cmd = CommandLine::new("/definitely/not/here/ffmpeg");
    assert!(matches!(run_streaming(&cmd), Err(CoreError::CommandStart(..))));
}

#[test]
fn test_kill_terminates_long_running_process() -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = run_streaming(&shell("echo started >&2; exec sleep 30"))?;
    assert_eq!(lines.next().transpose()?.as_deref(), Some("started"));
    lines.kill()?;
    assert!(lines.next().is_none());
    Ok(())
}

#[test]
fn test_run_to_completion_reports_status_without_failing() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_to_completion(&shell("echo out; echo err >&2; exit 3"))?;
    assert_eq!(output.status.code(), Some(3));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "out\n");
    assert_eq!(String::from_utf8_lossy(&output.stderr), "err\n");
    Ok(())
}
