//! Output formatting helpers.

use anyhow::Result;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use lastaccess_core::ReportStatus;

/// Placeholder for values the upstream left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a dimmed note to stderr.
pub fn note(msg: &str) {
    eprintln!("{}", msg.dimmed());
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Paint `text` in the colour of a report status: green once the report
/// is ready, yellow before.
pub fn status(status: &ReportStatus, text: &str) -> ColoredString {
    if status.is_done() {
        text.green()
    } else {
        text.yellow()
    }
}

/// The value, or [`NOT_AVAILABLE`] when it is missing or blank.
pub fn or_na(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_AVAILABLE)
}

/// Print a header row followed by aligned rows.
///
/// Widths are measured on the plain text. `paint` receives the row index,
/// column index and padded cell, and may colour the cell.
pub fn table<const N: usize>(
    headers: [&str; N],
    rows: &[[String; N]],
    paint: impl Fn(usize, usize, String) -> String,
) {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<w$}", h, w = *w))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header.trim_end().bold());

    for (r, row) in rows.iter().enumerate() {
        let line = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(c, (cell, w))| paint(r, c, format!("{:<w$}", cell, w = *w)))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    }
}
