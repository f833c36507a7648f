// ============================================================================
// vidtool-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console logger for the CLI
//
// Diagnostics from vidtool-core go through the `log` facade. The CLI installs
// an env_logger backend writing to stderr so that stdout only carries the
// ffmpeg progress lines and final status messages.

use std::io::Write;

use log::Level;
use owo_colors::OwoColorize;

use crate::config::DEFAULT_LOG_LEVEL;

/// Returns the filter used when RUST_LOG is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { DEFAULT_LOG_LEVEL }
}

/// Installs the stderr logger. RUST_LOG takes precedence over `verbose`.
///
/// Calling this twice is harmless; the second call leaves the first logger in place.
pub fn init(verbose: bool) {
    let colors = supports_color::on_cached(supports_color::Stream::Stderr).is_some();

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter(verbose)),
    );
    builder.format(move |buf, record| {
        let tag = level_tag(record.level());
        if colors {
            let tag = match record.level() {
                Level::Error => tag.bright_red().to_string(),
                Level::Warn => tag.yellow().to_string(),
                Level::Info => tag.green().to_string(),
                Level::Debug => tag.blue().to_string(),
                Level::Trace => tag.magenta().to_string(),
            };
            writeln!(buf, "{} {} {}", buf.timestamp(), tag, record.args())
        } else {
            writeln!(buf, "{} {} {}", buf.timestamp(), tag, record.args())
        }
    });

    if builder.try_init().is_ok() {
        log::debug!("Logger initialized (max level {})", log::max_level());
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN ",
        Level::Info => "INFO ",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
