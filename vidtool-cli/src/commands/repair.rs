// vidtool-cli/src/commands/repair.rs
//
// Remuxes a damaged video into `<name>_repaired.mp4`.

use std::process::ExitCode;

use vidtool_core::{MediaFile, Toolchain};

use crate::cli::RepairArgs;
use crate::error::CliResult;
use crate::output;

pub fn run_repair(toolchain: &Toolchain, args: RepairArgs) -> CliResult<ExitCode> {
    let video = MediaFile::open(&args.input, toolchain)?;
    let repaired = video.repair()?;
    output::print_success(&format!("Repaired video saved as: {}", repaired.display()));
    Ok(ExitCode::SUCCESS)
}
