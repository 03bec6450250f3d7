//! Output formatting for CLI results

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod screen;
pub mod table;

/// Format a single record: a one-row table, or a bare JSON object.
pub fn format_record<T: Tabled + Serialize>(record: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(json::format_json(record)?),
        OutputFormat::Table | OutputFormat::Pretty => {
            Ok(table::format_table(std::slice::from_ref(record)))
        }
    }
}

/// Print a success banner (pretty/table) or nothing (json).
pub fn success(message: &str, format: OutputFormat) {
    if format != OutputFormat::Json {
        println!("{} {}", "✓".green(), message);
    }
}

/// Print an error banner to stderr.
pub fn error_banner(message: &str) {
    eprintln!("{} {}", "✗".red(), message.red());
}

/// Spinner shown while `message` runs; hidden outside pretty mode.
pub fn spinner(message: impl Into<String>, format: OutputFormat) -> ProgressBar {
    if format != OutputFormat::Pretty {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
