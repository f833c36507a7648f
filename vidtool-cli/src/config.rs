// vidtool-cli/src/config.rs
//
// Defaults and environment variable names for the `vidtool-cli` application.

/// Quality label used when `--quality` is not given.
pub const DEFAULT_QUALITY: &str = "middle";

/// Environment variable naming the ffmpeg executable.
pub const FFMPEG_ENV: &str = "VIDTOOL_FFMPEG";

/// Environment variable naming the ffprobe executable.
pub const FFPROBE_ENV: &str = "VIDTOOL_FFPROBE";

/// Log level when neither `--verbose` nor RUST_LOG is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
