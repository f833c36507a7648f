// vidtool-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vidtool: convert, repair and extract audio from video files",
    long_about = "Wraps ffmpeg and ffprobe to convert videos between container formats, \
                  repair damaged files by stream copy, and extract audio tracks."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the ffmpeg executable (defaults to the one on PATH)
    #[arg(long, global = true, value_name = "PATH", env = config::FFMPEG_ENV)]
    pub ffmpeg: Option<PathBuf>,

    /// Path to the ffprobe executable (defaults to the one on PATH)
    #[arg(long, global = true, value_name = "PATH", env = config::FFPROBE_ENV)]
    pub ffprobe: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG overrides this)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts a video to another container format, printing ffmpeg's progress
    Convert(ConvertArgs),
    /// Remuxes a damaged video into <name>_repaired.mp4 without re-encoding
    Repair(RepairArgs),
    /// Extracts the audio of a video into an audio file next to it
    #[command(name = "extractaudio", visible_alias = "extract-audio", alias = "extract_audio")]
    ExtractAudio(ExtractAudioArgs),
    /// Shows the metadata ffprobe reports for a video
    Info(InfoArgs),
}

impl Commands {
    /// True when stdout carries machine-readable data that status lines must not mix into.
    pub fn writes_data_to_stdout(&self) -> bool {
        matches!(self, Commands::Info(args) if args.json)
    }
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the video file
    #[arg(short = 'i', long = "input", value_name = "INPUT_PATH")]
    pub input: PathBuf,

    /// Output format: mp4, avi, mkv, mov, flv or wmv
    #[arg(short = 'o', long = "output", value_name = "FORMAT")]
    pub output: String,

    /// Conversion quality: low, middle or high (anything else means middle)
    #[arg(short = 'q', long, value_name = "QUALITY", default_value = config::DEFAULT_QUALITY)]
    pub quality: String,
}

#[derive(Args, Debug)]
pub struct RepairArgs {
    /// Path to the video file
    #[arg(short = 'i', long = "input", value_name = "INPUT_PATH")]
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct ExtractAudioArgs {
    /// Path to the video file
    #[arg(short = 'i', long = "input", value_name = "INPUT_PATH")]
    pub input: PathBuf,

    /// Audio format: mp3, aac, wav, ogg or flac
    #[arg(short = 'o', long = "output", value_name = "FORMAT")]
    pub output: String,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the video file
    #[arg(short = 'i', long = "input", value_name = "INPUT_PATH")]
    pub input: PathBuf,

    /// Print ffprobe's raw JSON instead of the summary
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
