// Helpers for writing stand-in ffmpeg/ffprobe executables.
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// File the fake ffmpeg appends its argument list to, one call per line.
pub const CALLS_LOG: &str = "ffmpeg_calls.log";

/// Writes an executable `/bin/sh` script named `name` into `dir`.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    let mut perms = fs::metadata(&path).expect("script metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod script");
    path
}

/// A fake ffmpeg that logs its arguments, prints `stderr_lines` to stderr and
/// exits with `exit_code`.
pub fn fake_ffmpeg(dir: &Path, stderr_lines: &[&str], exit_code: i32) -> PathBuf {
    let mut body = format!("echo \"$@\" >> '{}'\n", dir.join(CALLS_LOG).display());
    for line in stderr_lines {
        body.push_str(&format!("echo '{}' >&2\n", line));
    }
    body.push_str(&format!("exit {}", exit_code));
    write_script(dir, "ffmpeg", &body)
}

/// A fake ffprobe that prints `stdout` verbatim.
pub fn fake_ffprobe(dir: &Path, stdout: &str) -> PathBuf {
    let body = format!("cat <<'JSON_EOF'\n{}\nJSON_EOF", stdout);
    write_script(dir, "ffprobe", &body)
}

/// Argument lists the fake ffmpeg was called with.
pub fn recorded_calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join(CALLS_LOG))
        .map(|log| log.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

pub const SAMPLE_METADATA: &str = r#"{
    "format": {"format_name": "mov,mp4,m4a,3gp,3g2,mj2", "duration": "12.500000", "bit_rate": "850000"},
    "streams": [
        {"index": 0, "codec_type": "video", "codec_name": "h264", "width": 1280, "height": 720},
        {"index": 1, "codec_type": "audio", "codec_name": "aac"},
        {"index": 2, "codec_type": "subtitle", "codec_name": "mov_text"}
    ]
}"#;
