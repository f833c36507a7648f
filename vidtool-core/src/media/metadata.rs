//! Typed view over ffprobe's JSON output.
//!
//! [`MediaMetadata`] keeps the raw document next to the handful of fields
//! vidtool cares about. Parsing is lenient about missing keys (they fall back
//! to defaults) and strict about present-but-malformed values.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CoreError, CoreResult};

/// Placeholder used when ffprobe leaves out a stream attribute we display.
pub const UNKNOWN: &str = "unknown";

/// Stream kinds vidtool distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
    Other,
}

impl From<&str> for StreamKind {
    fn from(s: &str) -> Self {
        match s {
            "video" => StreamKind::Video,
            "audio" => StreamKind::Audio,
            "subtitle" => StreamKind::Subtitle,
            _ => StreamKind::Other,
        }
    }
}

/// Media attributes parsed from ffprobe output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaMetadata {
    /// Container format name (`format.format_name`)
    pub format: Option<String>,

    /// Duration in seconds, 0.0 when ffprobe reports a format without one
    pub duration_secs: Option<f64>,

    /// Overall bitrate in bits/s, 0 when ffprobe reports a format without one
    pub bitrate: Option<u64>,

    /// `"<width>x<height>"` of the last video stream
    pub resolution: Option<String>,

    /// Codec of the last video stream
    pub codec: Option<String>,

    /// Codec names of the audio streams, in stream order
    pub audio_tracks: Vec<String>,

    /// Codec names of the subtitle streams, in stream order
    pub subtitles: Vec<String>,

    /// The document exactly as ffprobe printed it
    #[serde(skip)]
    pub raw: Value,
}

impl MediaMetadata {
    /// Parses a freshly probed document and keeps it as `raw`.
    pub fn from_json(raw: Value) -> CoreResult<Self> {
        let mut metadata = Self::default();
        metadata.parse_metadata(&raw)?;
        metadata.raw = raw;
        Ok(metadata)
    }

    /// Applies a probed document to this record.
    ///
    /// Fields the document does not mention keep their current values. On
    /// error the record is left untouched.
    pub fn parse_metadata(&mut self, raw: &Value) -> CoreResult<()> {
        let root = raw
            .as_object()
            .ok_or_else(|| malformed("top-level value is not an object"))?;

        let mut next = self.clone();

        match root.get("format") {
            None => {}
            Some(Value::Object(format)) => {
                next.format = format
                    .get("format_name")
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                next.duration_secs = Some(parse_duration(format)?);
                next.bitrate = Some(parse_bitrate(format)?);
            }
            Some(other) => return Err(malformed(format!("'format' is not an object: {other}"))),
        }

        for stream in streams(root)? {
            let stream = stream
                .as_object()
                .ok_or_else(|| malformed(format!("stream entry is not an object: {stream}")))?;
            let kind = stream
                .get("codec_type")
                .and_then(Value::as_str)
                .map(StreamKind::from)
                .unwrap_or(StreamKind::Other);

            match kind {
                // Later video streams overwrite earlier ones.
                StreamKind::Video => {
                    next.resolution = Some(format!(
                        "{}x{}",
                        verbatim(stream.get("width")),
                        verbatim(stream.get("height"))
                    ));
                    next.codec = stream
                        .get("codec_name")
                        .and_then(Value::as_str)
                        .map(str::to_owned);
                }
                StreamKind::Audio => next.audio_tracks.push(codec_name(stream)),
                StreamKind::Subtitle => next.subtitles.push(codec_name(stream)),
                StreamKind::Other => {}
            }
        }

        *self = next;
        Ok(())
    }

    /// True if at least one video stream was seen.
    pub fn has_video(&self) -> bool {
        self.resolution.is_some()
    }
}

fn malformed(message: impl Into<String>) -> CoreError {
    CoreError::MalformedOutput(message.into())
}

fn streams(root: &Map<String, Value>) -> CoreResult<&[Value]> {
    match root.get("streams") {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(streams)) => Ok(streams),
        Some(other) => Err(malformed(format!("'streams' is not a list: {other}"))),
    }
}

fn parse_duration(format: &Map<String, Value>) -> CoreResult<f64> {
    match format.get("duration") {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| malformed(format!("duration '{n}' is not a number"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed(format!("duration '{s}' is not a number"))),
        Some(other) => Err(malformed(format!("duration '{other}' is not a number"))),
    }
}

fn parse_bitrate(format: &Map<String, Value>) -> CoreResult<u64> {
    match format.get("bit_rate") {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .ok_or_else(|| malformed(format!("bit_rate '{n}' is not a non-negative integer"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| malformed(format!("bit_rate '{s}' is not a non-negative integer"))),
        Some(other) => Err(malformed(format!("bit_rate '{other}' is not a non-negative integer"))),
    }
}

fn codec_name(stream: &Map<String, Value>) -> String {
    stream
        .get("codec_name")
        .and_then(Value::as_str)
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Renders a JSON scalar without quotes; no validation.
fn verbatim(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNKNOWN.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
