// ============================================================================
// vidtool-cli/src/commands/mod.rs
// ============================================================================
//
// COMMAND HANDLERS: One module per subcommand plus the startup tool check
//
// Every handler receives the resolved toolchain and its parsed arguments and
// returns the process exit code, or an error for `main` to print.

pub mod convert;
pub mod extract_audio;
pub mod info;
pub mod repair;

use std::path::Path;

use vidtool_core::Toolchain;

use crate::output;

pub use convert::{echo_progress, run_convert};
pub use extract_audio::run_extract_audio;
pub use info::run_info;
pub use repair::run_repair;

const INSTALLED_MESSAGE: &str = "ffmpeg and ffprobe are correctly installed.";

/// Looks up ffmpeg and ffprobe and prints whether both were found.
///
/// The success line goes to stderr when `quiet_stdout` is set, so commands
/// that print data keep stdout parseable. Returns `None` when either tool is
/// missing; the caller exits with status 1.
pub fn check_dependencies(
    ffmpeg: Option<&Path>,
    ffprobe: Option<&Path>,
    quiet_stdout: bool,
) -> Option<Toolchain> {
    let report = Toolchain::check(ffmpeg, ffprobe);
    if !report.all_found() {
        log::debug!("Missing tools: {:?}", report.missing());
        output::print_failure("ffmpeg or ffprobe are not installed.");
        return None;
    }

    match report.into_toolchain() {
        Ok(toolchain) => {
            log::debug!(
                "Using ffmpeg at {} and ffprobe at {}",
                toolchain.ffmpeg().display(),
                toolchain.ffprobe().display()
            );
            if quiet_stdout {
                output::print_success_stderr(INSTALLED_MESSAGE);
            } else {
                output::print_success(INSTALLED_MESSAGE);
            }
            Some(toolchain)
        }
        Err(e) => {
            log::debug!("Toolchain unusable: {e}");
            output::print_failure("ffmpeg or ffprobe are not installed.");
            None
        }
    }
}
