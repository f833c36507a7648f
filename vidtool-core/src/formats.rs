// ============================================================================
// vidtool-core/src/formats.rs
// ============================================================================
//
// FORMATS: Output Format Allow-Lists and the Quality Table
//
// The allow-lists are checked before anything is probed or spawned, so an
// unsupported request never reaches ffmpeg.

use crate::error::{CoreError, CoreResult};
use std::fmt;

/// Container formats accepted by `convert`.
pub const SUPPORTED_VIDEO_FORMATS: [&str; 6] = ["mp4", "avi", "mkv", "mov", "flv", "wmv"];

/// Formats accepted by `extract_audio`. The name doubles as the ffmpeg audio codec.
pub const SUPPORTED_AUDIO_FORMATS: [&str; 5] = ["mp3", "aac", "wav", "ogg", "flac"];

/// Returns `Ok(())` if `format` is one of [`SUPPORTED_VIDEO_FORMATS`].
pub fn ensure_video_format(format: &str) -> CoreResult<()> {
    ensure_supported("video", format, &SUPPORTED_VIDEO_FORMATS)
}

/// Returns `Ok(())` if `format` is one of [`SUPPORTED_AUDIO_FORMATS`].
pub fn ensure_audio_format(format: &str) -> CoreResult<()> {
    ensure_supported("audio", format, &SUPPORTED_AUDIO_FORMATS)
}

fn ensure_supported(kind: &'static str, format: &str, supported: &[&str]) -> CoreResult<()> {
    if supported.contains(&format) {
        Ok(())
    } else {
        log::debug!("Rejecting {} format '{}'", kind, format);
        Err(CoreError::UnsupportedFormat {
            kind,
            requested: format.to_string(),
            supported: supported.join(", "),
        })
    }
}

/// Conversion quality preset, mapped onto ffmpeg's `-crf` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    Low,
    #[default]
    Middle,
    High,
}

impl Quality {
    /// Maps a user supplied label onto a preset. Unknown labels fall back to
    /// [`Quality::Middle`] instead of failing.
    pub fn from_label(label: &str) -> Self {
        match label {
            "low" => Quality::Low,
            "middle" => Quality::Middle,
            "high" => Quality::High,
            other => {
                log::debug!("Unknown quality '{}', using middle", other);
                Quality::Middle
            }
        }
    }

    /// The `-crf` argument for this preset. Lower means better quality.
    pub fn crf(self) -> &'static str {
        match self {
            Quality::Low => "35",
            Quality::Middle => "28",
            Quality::High => "20",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quality::Low => "low",
            Quality::Middle => "middle",
            Quality::High => "high",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
