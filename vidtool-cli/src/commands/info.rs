// ============================================================================
// vidtool-cli/src/commands/info.rs
// ============================================================================
//
// INFO COMMAND: Show what ffprobe reports for a video
//
// The summary mirrors the fields vidtool extracts from ffprobe's JSON.
// `--json` prints the unprocessed document instead, and nothing else goes
// to stdout in that mode.

use std::io::{self, Write};
use std::process::ExitCode;

use vidtool_core::{MediaFile, MediaMetadata, Toolchain};

use crate::cli::InfoArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::output;

pub fn run_info(toolchain: &Toolchain, args: InfoArgs) -> CliResult<ExitCode> {
    let video = MediaFile::open(&args.input, toolchain)
        .cli_with_context(|| format!("Could not read metadata of {}", args.input.display()))?;

    if args.json {
        write_json(&video, &mut io::stdout().lock())?;
        return Ok(ExitCode::SUCCESS);
    }

    output::print_heading(&video.path().display().to_string());
    for (label, value) in summary_rows(video.metadata()) {
        output::print_info(label, value);
    }
    Ok(ExitCode::SUCCESS)
}

/// Writes ffprobe's raw document, pretty-printed, followed by a newline.
pub fn write_json<W: Write>(video: &MediaFile, out: &mut W) -> CliResult<()> {
    let text = serde_json::to_string_pretty(&video.metadata().raw)
        .cli_context("Failed to render ffprobe output")?;
    writeln!(out, "{text}")?;
    Ok(())
}

/// Label/value rows of the human-readable summary, in display order.
pub fn summary_rows(metadata: &MediaMetadata) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Format", or_unknown(metadata.format.as_deref()))];
    rows.push((
        "Duration",
        metadata
            .duration_secs
            .map_or_else(|| "unknown".to_string(), format_duration),
    ));
    rows.push((
        "Bitrate",
        metadata
            .bitrate
            .map_or_else(|| "unknown".to_string(), |bps| format!("{} kb/s", bps / 1000)),
    ));
    if metadata.has_video() {
        rows.push(("Resolution", or_unknown(metadata.resolution.as_deref())));
        rows.push(("Video codec", or_unknown(metadata.codec.as_deref())));
    } else {
        rows.push(("Video", "none".to_string()));
    }
    rows.push(("Audio tracks", join_or_none(&metadata.audio_tracks)));
    rows.push(("Subtitles", join_or_none(&metadata.subtitles)));
    rows
}

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or("unknown").to_string()
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

/// Formats seconds as `HH:MM:SS.mmm`.
fn format_duration(secs: f64) -> String {
    let total_ms = (secs.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}
