//! Media files and their metadata
//!
//! `MediaFile` is the handle callers work with: opening one probes the file
//! and its operations (convert, repair, extract audio) shell out to ffmpeg.

pub mod file;
pub mod metadata;

// Re-export commonly used types
pub use file::{MediaFile, convert_output_path, repair_output_path};
pub use metadata::{MediaMetadata, StreamKind};
