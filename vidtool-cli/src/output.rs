// ============================================================================
// vidtool-cli/src/output.rs
// ============================================================================
//
// TERMINAL OUTPUT: Status lines, headings and key/value rows
//
// Colors are applied only when the target stream supports them, so piping
// vidtool into a file yields plain text.

use std::fmt::Display;

use owo_colors::OwoColorize;
use supports_color::Stream;

fn colors_on(stream: Stream) -> bool {
    supports_color::on_cached(stream).is_some()
}

/// Print a green status line to stdout.
pub fn print_success(message: &str) {
    if colors_on(Stream::Stdout) {
        println!("{}", message.green());
    } else {
        println!("{message}");
    }
}

/// Print a green status line to stderr, keeping stdout free for data.
pub fn print_success_stderr(message: &str) {
    if colors_on(Stream::Stderr) {
        eprintln!("{}", message.green());
    } else {
        eprintln!("{message}");
    }
}

/// Print a red status line to stdout.
pub fn print_failure(message: &str) {
    if colors_on(Stream::Stdout) {
        println!("{}", message.red());
    } else {
        println!("{message}");
    }
}

/// Print an error to stderr with a bold red prefix.
pub fn print_error(message: &str) {
    if colors_on(Stream::Stderr) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    } else {
        eprintln!("Error: {message}");
    }
}

/// Print a heading followed by a rule.
pub fn print_heading(text: &str) {
    let rule = "-".repeat(text.chars().count().max(20));
    if colors_on(Stream::Stdout) {
        println!("{}", text.bold());
        println!("{}", rule.bright_blue());
    } else {
        println!("{text}");
        println!("{rule}");
    }
}

/// Print a `label: value` row with the label highlighted.
pub fn print_info<T: Display>(label: &str, value: T) {
    if colors_on(Stream::Stdout) {
        println!("{}: {}", label.bright_cyan(), value);
    } else {
        println!("{label}: {value}");
    }
}
