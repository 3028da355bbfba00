use crate::pace::ResultBounds;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

// Compiled regexes for time parsing
static TIME_COLON_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d{1,2}(?:\.\d+)?)$").unwrap());
static TIME_MIN_SEC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)m\s*(\d{1,2}(?:\.\d+)?)s$").unwrap());
static TIME_SEC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)s?$").unwrap());

/// Round to the nearest tenth and split into sign, whole minutes and seconds.
fn clock_parts(seconds: f64) -> (&'static str, u32, f64) {
    let tenths = (seconds.abs() * 10.0).round() / 10.0;
    let sign = if seconds < 0.0 && tenths > 0.0 { "-" } else { "" };
    let mins = (tenths / 60.0).floor();
    (sign, mins as u32, tenths % 60.0)
}

/// Format seconds as `M:SS.s`, rounding to the nearest tenth first.
pub fn format_clock(seconds: f64) -> String {
    let (sign, mins, secs) = clock_parts(seconds);
    format!("{}{}:{:04.1}", sign, mins, secs)
}

/// Format a cumulative split time as `MM:SS.s`.
pub fn format_split_time(total_seconds: f64) -> String {
    let (sign, mins, secs) = clock_parts(total_seconds);
    format!("{}{:02}:{:04.1}", sign, mins, secs)
}

/// Right-align a distance to five characters and append `m`.
pub fn format_distance(meters: u32) -> String {
    format!("{:>5}m", meters)
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeParseError {
    #[error("Time cannot be empty")]
    EmptyInput,
    #[error("Invalid time format. {0}")]
    InvalidFormat(String),
    #[error("Invalid seconds: {0} (must be below 60)")]
    InvalidSeconds(f64),
}

/// Parse a typed time into seconds.
///
/// Supported formats:
/// - Minutes:seconds: "6:25.3" or "6:25"
/// - Minutes and seconds: "6m 25.3s" or "6m25s"
/// - Seconds only: "385.3" or "385.3s"
pub fn parse_time_to_sec(input: &str) -> Result<f64, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::EmptyInput);
    }

    let captures = TIME_COLON_REGEX
        .captures(trimmed)
        .or_else(|| TIME_MIN_SEC_REGEX.captures(trimmed));
    if let Some(captures) = captures {
        let minutes: f64 = captures[1].parse().map_err(|_| invalid_format())?;
        let seconds: f64 = captures[2].parse().map_err(|_| invalid_format())?;
        if seconds >= 60.0 {
            return Err(TimeParseError::InvalidSeconds(seconds));
        }
        return Ok(minutes * 60.0 + seconds);
    }

    if let Some(captures) = TIME_SEC_REGEX.captures(trimmed) {
        return captures[1].parse().map_err(|_| invalid_format());
    }

    Err(invalid_format())
}

fn invalid_format() -> TimeParseError {
    TimeParseError::InvalidFormat("Use: 6:25.3, 6m25s, or 385.3".to_string())
}

/// Validate a typed result and pair it with its canonical `M:SS.s` text.
pub fn commit_result_input(input: &str, bounds: ResultBounds) -> Result<(f64, String), String> {
    let seconds = validate_result_input(input, bounds)?;
    Ok((seconds, format_clock(seconds)))
}

/// Parse a typed result time and check it against the current bounds.
pub fn validate_result_input(input: &str, bounds: ResultBounds) -> Result<f64, String> {
    let seconds = parse_time_to_sec(input).map_err(|e| e.to_string())?;
    if seconds < bounds.min {
        return Err(format!("Result must be at least {}", format_clock(bounds.min)));
    }
    if seconds > bounds.max {
        return Err(format!("Result cannot exceed {}", format_clock(bounds.max)));
    }
    Ok(seconds)
}
