//! Clock Time Parsing
//!
//! `HH:MM` ↔ minutes since midnight.
//!
//! Two flavours:
//! - [`parse_clock_time`]: lenient, used by the encoder. Hours and minutes are
//!   not range checked, so `"25:99"` is 1599 minutes.
//! - [`validate_clock_time`]: strict wall-clock check for shells that want to
//!   reject input before it reaches the core.

use chrono::{NaiveTime, Timelike};

use crate::logic::error::ValidationError;

/// Parse `HH:MM` into minutes since midnight.
///
/// Segments after the second `:` are ignored.
pub fn parse_clock_time(input: &str) -> Result<i32, ValidationError> {
    if !input.contains(':') {
        return Err(ValidationError::MissingSeparator(input.to_string()));
    }

    let mut parts = input.split(':');
    let (hours, minutes) = match (parts.next(), parts.next()) {
        (Some(h), Some(m)) => (h.trim(), m.trim()),
        _ => return Err(ValidationError::Malformed(input.to_string())),
    };

    let hours: i32 = hours
        .parse()
        .map_err(|_| ValidationError::Malformed(input.to_string()))?;
    let minutes: i32 = minutes
        .parse()
        .map_err(|_| ValidationError::Malformed(input.to_string()))?;

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(|| ValidationError::Malformed(input.to_string()))
}

/// Strict `HH:MM` check (00:00 - 23:59). Returns minutes since midnight.
pub fn validate_clock_time(input: &str) -> Result<i32, ValidationError> {
    let time = NaiveTime::parse_from_str(input, "%H:%M")
        .map_err(|_| ValidationError::Malformed(input.to_string()))?;
    Ok((time.hour() * 60 + time.minute()) as i32)
}

/// Minutes since midnight → zero padded `HH:MM`
pub fn format_clock_time(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}
