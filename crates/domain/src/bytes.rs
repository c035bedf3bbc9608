//! Human-readable byte counts.

const UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format `bytes` with base-1024 units and at most two decimals.
///
/// ```
/// use pvedash_domain::bytes::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 B");
/// assert_eq!(format_bytes(1024), "1 KB");
/// ```
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    format_bytes_with(bytes, 2)
}

/// Format `bytes` with base-1024 units, rounded to `decimals` places.
///
/// Trailing zeros of the rounded value are dropped, so `1024` renders as
/// `"1 KB"` rather than `"1.00 KB"`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes_with(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut scaled = bytes as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{scaled:.decimals$}");
    let trimmed = if rounded.contains('.') {
        rounded.trim_end_matches('0').trim_end_matches('.')
    } else {
        rounded.as_str()
    };
    format!("{trimmed} {}", UNITS[unit])
}
