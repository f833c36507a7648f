// vidtool-cli/src/commands/extract_audio.rs
//
// Writes the audio track of a video to `<name>.<format>`.

use std::process::ExitCode;

use vidtool_core::{MediaFile, Toolchain, ensure_audio_format};

use crate::cli::ExtractAudioArgs;
use crate::error::CliResult;
use crate::output;

pub fn run_extract_audio(toolchain: &Toolchain, args: ExtractAudioArgs) -> CliResult<ExitCode> {
    ensure_audio_format(&args.output)?;

    let video = MediaFile::open(&args.input, toolchain)?;
    match video.extract_audio(&args.output)? {
        Some(path) => {
            output::print_success(&format!("Extracted audio saved as: {}", path.display()));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            output::print_failure("Audio extraction failed.");
            Ok(ExitCode::FAILURE)
        }
    }
}
