//! User interface module - console output for operators.
//!
//! - `formatter` - Pure formatting of verdicts and verification results
//! - This module - Printing to stdout / stderr

use crate::cli::orchestration::Outcome;

pub mod formatter;

pub use formatter::{format_outcome, format_verdict, format_verification};

/// Print an error message in red to stderr.
pub fn display_error(message: &str) {
    eprintln!("{} {}", console::style("ERROR:").red().bold(), message);
}

/// Print a status message with a yellow arrow to stderr.
pub fn display_status(message: &str) {
    eprintln!("{} {}", console::style("→").yellow(), message);
}

/// Print the final outcome of a gate run to stdout.
pub fn display_outcome(outcome: &Outcome) {
    println!("{}", format_outcome(outcome));
}
