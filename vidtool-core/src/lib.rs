//! Core library for converting, repairing and extracting audio from video
//! files with ffmpeg and ffprobe.
//!
//! The crate does not touch media data itself. It probes files with ffprobe,
//! parses the JSON into [`MediaMetadata`], and drives ffmpeg, streaming its
//! progress output back line by line.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidtool_core::{MediaFile, Quality, Toolchain};
//!
//! let toolchain = Toolchain::from_path().unwrap();
//! let video = MediaFile::open("holiday.mp4", &toolchain).unwrap();
//! println!("resolution: {:?}", video.metadata().resolution);
//!
//! for line in video.convert("mkv", Quality::High).unwrap() {
//!     println!("{}", line.unwrap());
//! }
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod formats;
pub mod media;

// Re-exports for public API
pub use config::{Toolchain, ToolchainReport, ToolStatus};
pub use error::{CoreError, CoreResult};
pub use external::{CommandLine, ProgressLines};
pub use formats::{
    Quality, SUPPORTED_AUDIO_FORMATS, SUPPORTED_VIDEO_FORMATS, ensure_audio_format,
    ensure_video_format,
};
pub use media::{MediaFile, MediaMetadata};
