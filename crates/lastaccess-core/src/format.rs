//! Display formatting for report and asset fields.

use chrono::{DateTime, Utc};

const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count with binary units and one decimal place.
///
/// ```
/// use lastaccess_core::format::format_bytes;
///
/// assert_eq!(format_bytes(1536), "1.5 KB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", size, BYTE_UNITS[unit])
}

/// Format a timestamp as `Jan 5, 2024, 03:04 PM` (UTC).
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Format pixel dimensions as `W × H`.
pub fn format_dimensions(width: u32, height: u32) -> String {
    format!("{} × {}", width, height)
}
