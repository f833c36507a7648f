// ============================================================================
// vidtool-cli/src/commands/convert.rs
// ============================================================================
//
// CONVERT COMMAND: Re-encode a video into another container format
//
// ffmpeg's stderr is echoed line by line as it arrives. The target format is
// checked before ffprobe runs so a typo never starts a process.

use std::io::{self, Write};
use std::process::ExitCode;

use vidtool_core::external::SpawnedProcess;
use vidtool_core::{MediaFile, ProgressLines, Quality, Toolchain, ensure_video_format};

use crate::cli::ConvertArgs;
use crate::error::{CliErrorContext, CliResult};

const FAILURE_CONTEXT: &str = "An error occurred during conversion";

pub fn run_convert(toolchain: &Toolchain, args: ConvertArgs) -> CliResult<ExitCode> {
    ensure_video_format(&args.output)?;
    let quality = Quality::from_label(&args.quality);

    let video = MediaFile::open(&args.input, toolchain).cli_context(FAILURE_CONTEXT)?;
    log::debug!(
        "Input {} reports format {:?}, resolution {:?}",
        args.input.display(),
        video.metadata().format,
        video.metadata().resolution
    );

    let mut progress = video
        .convert(&args.output, quality)
        .cli_context(FAILURE_CONTEXT)?;
    echo_progress(&mut progress, &mut io::stdout().lock())?;

    Ok(ExitCode::SUCCESS)
}

/// Writes each progress line to `out` until ffmpeg finishes.
///
/// If `out` is a closed pipe, ffmpeg is killed and the conversion counts as
/// abandoned rather than failed. Any other write error also kills ffmpeg.
pub fn echo_progress<P, W>(progress: &mut ProgressLines<P>, out: &mut W) -> CliResult<()>
where
    P: SpawnedProcess,
    W: Write,
{
    while let Some(line) = progress.next() {
        let line = line.cli_context(FAILURE_CONTEXT)?;
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            log::debug!("Output closed ({e}), stopping {}", progress.command());
            progress.kill().cli_context(FAILURE_CONTEXT)?;
            if e.kind() == io::ErrorKind::BrokenPipe {
                return Ok(());
            }
            return Err(e.into());
        }
    }
    Ok(())
}
