// Display helpers shared by the console views

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Render a millisecond round-trip as seconds with one decimal.
pub fn format_response_time(ms: i64) -> String {
    format!("{:.1}s", ms as f64 / 1000.0)
}

/// Render a timestamp the way the log table shows it.
pub fn format_date_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Truncate display text to `max` characters, appending an ellipsis.
/// Empty input renders as a dash.
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.is_empty() {
        return "-".to_string();
    }
    if text.chars().count() <= max {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max).collect();
    format!("{}...", truncated)
}

/// Parse a user-entered timestamp, accepting RFC 3339, a plain
/// `YYYY-MM-DD HH:MM:SS`, or a bare date (midnight).
pub fn parse_time_flexible(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}
