//! Output formatting utilities

use colored::*;
use serde::Serialize;
use tensorgate_types::{GateError, Result};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
}

/// Print data as pretty JSON
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(data)
        .map_err(|e| GateError::serialization(format!("JSON serialization failed: {}", e)))?;
    println!("{}", output);
    Ok(())
}

pub fn print_error(error: &GateError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message.green());
}

/// Create a table header
pub fn table_header(columns: &[(&str, usize)]) -> String {
    let header = columns
        .iter()
        .map(|(name, width)| format!("{:<width$}", name, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    let separator = "─".repeat(header.trim_end().chars().count());
    format!("{}\n{}", header.trim_end().bold(), separator)
}

/// Create a table row with the same column widths as [`table_header`]
pub fn table_row(values: &[(&str, usize)]) -> String {
    values
        .iter()
        .map(|(value, width)| format!("{:<width$}", value, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_align_with_header() {
        colored::control::set_override(false);
        let header = table_header(&[("NAME", 8), ("VERSION", 7)]);
        let row = table_row(&[("resnet", 8), ("1", 7)]);
        assert_eq!(header.lines().next().unwrap(), "NAME      VERSION");
        assert_eq!(row, "resnet    1");
    }
}
