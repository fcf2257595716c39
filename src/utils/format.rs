use chrono::NaiveDateTime;

use crate::error::Result;

/// Timestamp format used by the API for `created_at` / `updated_at`.
pub const API_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse an API timestamp.
pub fn parse_api_timestamp(raw: &str) -> Result<NaiveDateTime> {
    Ok(NaiveDateTime::parse_from_str(raw, API_TIMESTAMP_FORMAT)?)
}

/// Reformat an API timestamp, e.g. with `"%Y-%m-%d"` or `"%B %d, %Y"`.
pub fn format_api_date(raw: &str, format: &str) -> Result<String> {
    Ok(parse_api_timestamp(raw)?.format(format).to_string())
}

/// Use K/M suffixes for large numbers.
pub fn format_count(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

/// First `max_chars` characters of `text`, with `...` appended when cut.
pub fn preview(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => (format!("{}...", &text[..idx]), true),
        None => (text.to_string(), false),
    }
}
