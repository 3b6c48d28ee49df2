//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Human-facing progress goes to stdout, warnings and errors to stderr.
//! Everything except errors respects the quiet flag. Developer-level
//! detail goes through `tracing` instead (see [`super::logging`]).

use std::fmt::Display;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    #[default]
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a progress step (respects quiet mode).
pub fn step(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("==> {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a boxed notice to stderr (respects quiet mode).
pub fn notice(lines: &[&str], verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("{}", format_notice(lines));
    }
}

/// Frame lines in a box of `*`.
pub fn format_notice(lines: &[&str]) -> String {
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let border = "*".repeat(width + 4);
    let mut out = vec![border.clone()];
    for line in lines {
        let pad = width - line.chars().count();
        out.push(format!("* {}{} *", line, " ".repeat(pad)));
    }
    out.push(border);
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn notice_is_boxed() {
        assert_eq!(
            format_notice(&["ab", "abcd"]),
            "********\n* ab   *\n* abcd *\n********"
        );
    }
}
