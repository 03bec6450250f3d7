//! Common display utilities and helpers

use std::collections::HashMap;

use chrono::{DateTime, Local, NaiveDate};

/// Placeholder for absent values
pub const EMPTY: &str = "--";

/// Truncate string to `max_len` characters with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Value or the placeholder when absent or blank
pub fn or_empty(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY.to_string(),
    }
}

/// Format an API timestamp for tables.
///
/// RFC 3339 timestamps are shown in local time as `YYYY-MM-DD HH:MM`; bare
/// dates are kept; anything else is shown as-is.
pub fn format_timestamp(timestamp: Option<&str>) -> String {
    let Some(ts) = timestamp.map(str::trim).filter(|t| !t.is_empty()) else {
        return EMPTY.to_string();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(ts, "%Y-%m-%d") {
        return date.to_string();
    }
    // Some endpoints send `YYYY-MM-DDT00:00:00.000Z`-style dates without offset
    ts.split('T').next().unwrap_or(ts).to_string()
}

/// `#id - name` when the name is known, `#id` otherwise
pub fn id_label(id: i64, names: &HashMap<i64, String>) -> String {
    match names.get(&id) {
        Some(name) => format!("#{} - {}", id, name),
        None => format!("#{}", id),
    }
}
