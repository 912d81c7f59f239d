//! `HH:MM` parsing and the conversions between clock times, minute offsets and
//! fractional grid hours.

use thiserror::Error;

use crate::models::settings::GridSettings;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("Invalid time {0:?}, expected HH:MM")]
    InvalidFormat(String),
}

/// Parse `HH:MM` into minutes since midnight.
///
/// Both parts must be plain non-negative integers and minutes must be below 60.
/// Hours are not capped at 23.
pub fn time_to_minutes(time: &str) -> Result<i32, TimeError> {
    let invalid = || TimeError::InvalidFormat(time.to_string());

    let (hours, minutes) = time.split_once(':').ok_or_else(invalid)?;
    let hours = parse_component(hours).ok_or_else(invalid)?;
    let minutes = parse_component(minutes).ok_or_else(invalid)?;
    if minutes >= 60 {
        return Err(invalid());
    }

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(invalid)
}

fn parse_component(part: &str) -> Option<i32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Format minutes since midnight as zero-padded `HH:MM`.
///
/// Negative input clamps to `00:00`. There is no wraparound past midnight, so
/// 1500 formats as `25:00`.
pub fn minutes_to_time(minutes: i32) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Fractional hours between the canvas start and `time`
pub fn hour_position(time: &str, grid: &GridSettings) -> Result<f32, TimeError> {
    Ok((time_to_minutes(time)? - grid.start_minutes()) as f32 / 60.0)
}

/// Fractional hours from `start` to `end`. Negative when the two are swapped.
pub fn duration_hours(start: &str, end: &str) -> Result<f32, TimeError> {
    Ok(duration_minutes(start, end)? as f32 / 60.0)
}

pub fn duration_minutes(start: &str, end: &str) -> Result<i32, TimeError> {
    Ok(time_to_minutes(end)? - time_to_minutes(start)?)
}
