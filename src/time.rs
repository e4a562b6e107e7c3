use chrono::{NaiveTime, Timelike};

/// Format a journey duration in minutes as a compact label
///
/// Durations under an hour render as minutes only (`45m`); longer ones render
/// hours and unpadded minutes (`1h15`, `1h0`).
#[must_use]
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours == 0 {
        format!("{mins}m")
    } else {
        format!("{hours}h{mins}")
    }
}

/// Format a time-of-day in the journey service's `HHMM` wire format
#[must_use]
pub fn to_hhmm(time: NaiveTime) -> String {
    format!("{:02}{:02}", time.hour(), time.minute())
}

/// Parse a time-of-day in `HHMM` wire format
///
/// # Errors
///
/// Returns an error if the string is not exactly four digits forming a valid
/// 24-hour time.
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(s, "%H%M")
}

/// Render an `HHMM` wire time as `HH:MM` for display, passing through
/// anything that doesn't parse
#[must_use]
pub fn display_hhmm(s: &str) -> String {
    parse_hhmm(s).map_or_else(|_| s.to_string(), |t| t.format("%H:%M").to_string())
}
