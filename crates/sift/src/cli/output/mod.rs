//! Terminal styling and JSON output for CLI commands.

mod highlight;

use std::process::ExitCode;

pub use highlight::Highlighter;
use serde::Serialize;

/// ANSI styling, applied only when stdout is a terminal and `NO_COLOR` is unset.
pub mod colors {
    use std::{
        env,
        io::{self, IsTerminal},
        sync::LazyLock,
    };

    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text (for headers).
    pub const CYAN: &str = "\x1b[36m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";

    /// Whether styling is on for this process.
    static ENABLED: LazyLock<bool> =
        LazyLock::new(|| io::stdout().is_terminal() && env::var_os("NO_COLOR").is_none());

    /// Returns true when output should be styled.
    pub fn enabled() -> bool {
        *ENABLED
    }

    /// Wraps `text` in the given codes when styling is on.
    pub fn paint(codes: &str, text: &str) -> String {
        if enabled() {
            format!("{codes}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Formats a header with bold cyan styling.
pub fn header(text: &str) -> String {
    colors::paint(&format!("{}{}", colors::BOLD, colors::CYAN), text)
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    colors::paint(colors::BOLD, text)
}

/// Formats text as dimmed.
pub fn dim(text: &str) -> String {
    colors::paint(colors::DIM, text)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    colors::paint(colors::YELLOW, text)
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints an error to stderr with the `error:` prefix used across commands.
pub fn print_error(err: &impl ToString) {
    let text = err.to_string();
    eprintln!("error: {}", text.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_wrap_text_only_when_enabled() {
        for styled in [header("x"), subheader("x"), dim("x"), warning("x")] {
            if colors::enabled() {
                assert!(styled.contains('x') && styled.ends_with(colors::RESET));
            } else {
                assert_eq!(styled, "x");
            }
        }
    }
}
