// vidtool-cli/src/main.rs
//
// Entry point for the `vidtool` binary.
//
// Parses arguments, installs the logger, confirms ffmpeg and ffprobe can be
// found, then hands off to the selected command. Any error that reaches this
// point is printed in red and the process exits with status 1.

use std::process::ExitCode;

use clap::Parser;

use vidtool_cli::{
    Cli, Commands, check_dependencies, logging, output, run_convert, run_extract_audio, run_info,
    run_repair,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let Some(toolchain) = check_dependencies(
        cli.ffmpeg.as_deref(),
        cli.ffprobe.as_deref(),
        cli.command.writes_data_to_stdout(),
    ) else {
        return ExitCode::FAILURE;
    };

    let result = match cli.command {
        Commands::Convert(args) => run_convert(&toolchain, args),
        Commands::Repair(args) => run_repair(&toolchain, args),
        Commands::ExtractAudio(args) => run_extract_audio(&toolchain, args),
        Commands::Info(args) => run_info(&toolchain, args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            log::debug!("Command failed: {e:?}");
            output::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
