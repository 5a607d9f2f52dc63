//! Run-window timestamp parsing.
//!
//! `--start-time` / `--end-time` accept a date (`YYYY-MM-DD`) or a date and
//! time (`YYYY-MM-DD HH:MM:SS`) in local time. The format is chosen by length.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Unsupported time format '{0}': expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS")]
    UnsupportedFormat(String),

    #[error("Invalid time '{input}': {reason}")]
    Invalid { input: String, reason: String },

    #[error("Time '{0}' does not exist in the local time zone")]
    NonexistentLocalTime(String),
}

/// Parse a local time string into an epoch timestamp.
///
/// `None` or an empty string yields 0. With `millis` the result is in
/// milliseconds, otherwise in seconds.
pub fn parse_timestamp(input: Option<&str>, millis: bool) -> Result<i64, TimestampError> {
    let Some(input) = input.filter(|s| !s.is_empty()) else {
        return Ok(0);
    };

    let naive = match input.len() {
        10 => NaiveDate::parse_from_str(input, DATE_FORMAT)
            .map(|d| d.and_time(chrono::NaiveTime::MIN)),
        19 => NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT),
        _ => return Err(TimestampError::UnsupportedFormat(input.to_string())),
    }
    .map_err(|e| TimestampError::Invalid {
        input: input.to_string(),
        reason: e.to_string(),
    })?;

    let local = Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| TimestampError::NonexistentLocalTime(input.to_string()))?;

    let seconds = local.timestamp();
    Ok(if millis { seconds * 1000 } else { seconds })
}

/// clap value parser for millisecond timestamps.
pub fn parse_millis(input: &str) -> Result<i64, String> {
    parse_timestamp(Some(input), true).map_err(|e| e.to_string())
}
