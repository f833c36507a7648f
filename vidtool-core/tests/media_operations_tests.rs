// vidtool-core/tests/media_operations_tests.rs
//
// Drives MediaFile against stand-in ffmpeg/ffprobe scripts.
#![cfg(unix)]

mod common;

use common::{SAMPLE_METADATA, fake_ffmpeg, fake_ffprobe, recorded_calls};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::tempdir;
use vidtool_core::{CoreError, MediaFile, Quality, Toolchain};

// Collects log records so tests can check the level an outcome is reported at.
struct RecordingLogger;

static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());
static LOGGER: RecordingLogger = RecordingLogger;

impl Log for RecordingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = RECORDS.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

fn install_logger() {
    // Only the first call in this test binary succeeds.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
}

fn records_mentioning(needle: &str) -> Vec<(Level, String)> {
    RECORDS
        .lock()
        .map(|records| {
            records
                .iter()
                .filter(|(_, message)| message.contains(needle))
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_open_parses_probe_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let toolchain = Toolchain::new(
        fake_ffmpeg(dir.path(), &[], 0),
        fake_ffprobe(dir.path(), SAMPLE_METADATA),
    );

    let video = MediaFile::open(dir.path().join("test_video.mp4"), &toolchain)?;
    let metadata = video.metadata();
    assert_eq!(metadata.format.as_deref(), Some("mov,mp4,m4a,3gp,3g2,mj2"));
    assert_eq!(metadata.duration_secs, Some(12.5));
    assert_eq!(metadata.bitrate, Some(850_000));
    assert_eq!(metadata.resolution.as_deref(), Some("1280x720"));
    assert_eq!(metadata.codec.as_deref(), Some("h264"));
    assert_eq!(metadata.audio_tracks, vec!["aac"]);
    assert_eq!(metadata.subtitles, vec!["mov_text"]);
    assert!(metadata.raw.get("streams").is_some());
    Ok(())
}

#[test]
fn test_open_rejects_non_json_probe_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let toolchain = Toolchain::new(
        fake_ffmpeg(dir.path(), &[], 0),
        fake_ffprobe(dir.path(), "this is not json"),
    );
    assert!(matches!(
        MediaFile::open(dir.path().join("test_video.mp4"), &toolchain),
        Err(CoreError::JsonParse(_))
    ));
    Ok(())
}

#[test]
fn test_open_reports_missing_ffprobe() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let toolchain = Toolchain::new(
        fake_ffmpeg(dir.path(), &[], 0),
        dir.path().join("no-such-ffprobe"),
    );
    assert!(matches!(
        MediaFile::open(dir.path().join("test_video.mp4"), &toolchain),
        Err(CoreError::DependencyNotFound(_))
    ));
    Ok(())
}

#[test]
fn test_convert_streams_progress_lines() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let toolchain = Toolchain::new(
        fake_ffmpeg(dir.path(), &["Input #0", "frame=  10 fps=0.0", "video:1kB"], 0),
        fake_ffprobe(dir.path(), SAMPLE_METADATA),
    );
    let input = dir.path().join("test_video.mp4");
    let video = MediaFile::open(&input, &toolchain)?;

    let lines = video
        .convert("avi", Quality::from_label("high"))?
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(lines, vec!["Input #0", "frame=  10 fps=0.0", "video:1kB"]);

    let expected_output = dir.path().join("test_video.avi");
    assert_eq!(
        recorded_calls(dir.path()),
        vec![format!(
            "-i {} -crf 20 {}",
            input.display(),
            expected_output.display()
        )]
    );
    Ok(())
}

#[test]
fn test_convert_failure_surfaces_after_drain() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let toolchain = Toolchain::new(
        fake_ffmpeg(dir.path(), &["Invalid data found when processing input"], 1),
        fake_ffprobe(dir.path(), SAMPLE_METADATA),
    );
    let video = MediaFile::open(dir.path().join("test_video.mp4"), &toolchain)?;

    let mut lines = video.convert("mkv", Quality::Middle)?;
    assert_eq!(
        lines.next().transpose()?.as_deref(),
        Some("Invalid data found when processing input")
    );
    match lines.next() {
        Some(Err(CoreError::ProcessExecution { command, .. })) => assert_eq!(command, "ffmpeg"),
        other => panic!("Expected ProcessExecution error, got {:?}", other),
    }
    assert!(lines.next().is_none());
    Ok(())
}

#[test]
fn test_convert_unsupported_format_never_invokes_ffmpeg() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let toolchain = Toolchain::new(
        fake_ffmpeg(dir.path(), &[], 0),
        fake_ffprobe(dir.path(), SAMPLE_METADATA),
    );
    let video = MediaFile::open(dir.path().join("test_video.mp4"), &toolchain)?;

    assert!(matches!(
        video.convert("webm", Quality::Middle),
        Err(CoreError::UnsupportedFormat { .. })
    ));
    assert!(recorded_calls(dir.path()).is_empty());
    Ok(())
}

#[test]
fn test_repair_returns_path_even_when_ffmpeg_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let toolchain = Toolchain::new(
        fake_ffmpeg(dir.path(), &["moov atom not found"], 1),
        fake_ffprobe(dir.path(), SAMPLE_METADATA),
    );
    let input = dir.path().join("test_video.mp4");
    let video = MediaFile::open(&input, &toolchain)?;

    let repaired = video.repair()?;
    assert_eq!(repaired, dir.path().join("test_video_repaired.mp4"));

    let calls = recorded_calls(dir.path());
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("-err_detect ignore_err -i "));
    assert!(calls[0].contains(" -c copy "));
    Ok(())
}

#[test]
fn test_extract_audio_returns_path_on_success() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let toolchain = Toolchain::new(
        fake_ffmpeg(dir.path(), &[], 0),
        fake_ffprobe(dir.path(), SAMPLE_METADATA),
    );
    let video = MediaFile::open(dir.path().join("test_video.mp4"), &toolchain)?;

    let extracted = video.extract_audio("mp3")?;
    assert_eq!(extracted, Some(dir.path().join("test_video.mp3")));
    assert!(recorded_calls(dir.path())[0].contains("-vn -acodec mp3"));
    Ok(())
}

#[test]
fn test_extract_audio_returns_none_on_failure() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let toolchain = Toolchain::new(
        fake_ffmpeg(dir.path(), &["Unknown encoder"], 1),
        fake_ffprobe(dir.path(), SAMPLE_METADATA),
    );
    let video = MediaFile::open(dir.path().join("test_video.mp4"), &toolchain)?;

    let extracted: Option<PathBuf> = video.extract_audio("ogg")?;
    assert!(extracted.is_none());
    Ok(())
}

#[test]
fn test_extract_audio_failure_is_logged_as_warning() -> Result<(), Box<dyn std::error::Error>> {
    install_logger();
    let dir = tempdir()?;
    let toolchain = Toolchain::new(
        fake_ffmpeg(dir.path(), &["Stream map matches no streams"], 1),
        fake_ffprobe(dir.path(), SAMPLE_METADATA),
    );
    let input = dir.path().join("silent_clip.mp4");
    let video = MediaFile::open(&input, &toolchain)?;

    assert!(video.extract_audio("flac")?.is_none());

    let records = records_mentioning(&format!("Audio extraction from {}", input.display()));
    assert_eq!(records.len(), 1, "records: {:?}", records);
    assert_eq!(records[0].0, Level::Warn);
    assert!(records[0].1.contains("Stream map matches no streams"));
    Ok(())
}

#[test]
fn test_refresh_metadata_reprobes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let toolchain = Toolchain::new(
        fake_ffmpeg(dir.path(), &[], 0),
        fake_ffprobe(dir.path(), SAMPLE_METADATA),
    );
    let mut video = MediaFile::open(dir.path().join("test_video.mp4"), &toolchain)?;

    fake_ffprobe(dir.path(), r#"{"streams": [{"codec_type": "audio", "codec_name": "flac"}]}"#);
    video.refresh_metadata()?;
    assert_eq!(video.metadata().audio_tracks, vec!["flac"]);
    assert!(video.metadata().resolution.is_none());
    Ok(())
}
