// vidtool-cli/src/lib.rs
//
// Library portion of the vidtool CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, ConvertArgs, ExtractAudioArgs, InfoArgs, RepairArgs};
pub use commands::{check_dependencies, run_convert, run_extract_audio, run_info, run_repair};
pub use error::{CliErrorContext, CliResult};
