//! Value parsers shared by rule fields, rule-set lines and window bounds.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::rfc::rrule::core::{Weekday, WeekdayNum};

/// Why a string is not a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimestampError {
    #[error("expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS")]
    Malformed,
    #[error("no such calendar date")]
    InvalidDate,
    #[error("time of day out of range")]
    InvalidTime,
}

/// Parses a timestamp in the one accepted form.
///
/// Format: `YYYY-MM-DD` (midnight) or `YYYY-MM-DDTHH:MM:SS` (e.g. "2024-01-09T09:30:00")
///
/// ## Errors
/// Returns an error if the string does not match either form or names a
/// date or time that does not exist.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TimestampError> {
    if !s.is_ascii() {
        return Err(TimestampError::Malformed);
    }

    let (date_str, time_str) = match s.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (s, None),
    };

    let date = parse_date(date_str)?;
    let time = match time_str {
        Some(time) => parse_time(time)?,
        None => NaiveTime::MIN,
    };

    Ok(date.and_time(time))
}

/// Parses `YYYY-MM-DD`.
fn parse_date(s: &str) -> Result<NaiveDate, TimestampError> {
    let bytes = s.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(TimestampError::Malformed);
    }

    let year = parse_digits(&s[0..4])?;
    let month = parse_digits(&s[5..7])?;
    let day = parse_digits(&s[8..10])?;

    let year = i32::try_from(year).map_err(|_e| TimestampError::InvalidDate)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(TimestampError::InvalidDate)
}

/// Parses `HH:MM:SS`.
fn parse_time(s: &str) -> Result<NaiveTime, TimestampError> {
    let bytes = s.as_bytes();
    if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
        return Err(TimestampError::Malformed);
    }

    let hour = parse_digits(&s[0..2])?;
    let minute = parse_digits(&s[3..5])?;
    let second = parse_digits(&s[6..8])?;

    // chrono would accept 60 only as a leap second via nanoseconds; reject it outright
    if hour > 23 || minute > 59 || second > 59 {
        return Err(TimestampError::InvalidTime);
    }

    NaiveTime::from_hms_opt(hour, minute, second).ok_or(TimestampError::InvalidTime)
}

/// Parses a fixed-width run of ASCII digits; signs are not accepted.
fn parse_digits(s: &str) -> Result<u32, TimestampError> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimestampError::Malformed);
    }
    s.parse().map_err(|_e| TimestampError::Malformed)
}

/// Parses a comma-separated list of timestamps.
///
/// ## Errors
/// Returns the first element's error, prefixed with the offending element.
pub fn parse_timestamp_list(s: &str) -> Result<Vec<NaiveDateTime>, String> {
    s.split(',')
        .map(|v| {
            let v = v.trim();
            parse_timestamp(v).map_err(|e| format!("{v:?}: {e}"))
        })
        .collect()
}

/// Parses a comma-separated list of integers.
///
/// Range checks happen during rule validation, not here.
///
/// ## Errors
/// Returns a reason naming the first element that is not an integer of type `T`.
pub fn parse_int_list<T: FromStr>(s: &str) -> Result<Vec<T>, String> {
    s.split(',')
        .map(|v| {
            let v = v.trim();
            v.parse()
                .map_err(|_e| format!("{v:?} is not an integer in the accepted range"))
        })
        .collect()
}

/// Parses a BYDAY value (weekdays with optional ordinals).
///
/// ## Errors
/// Returns a reason naming the first malformed element.
pub fn parse_byday(s: &str) -> Result<Vec<WeekdayNum>, String> {
    s.split(',').map(|v| parse_weekday_num(v.trim())).collect()
}

/// Parses a single weekday with optional ordinal (e.g., "MO", "1MO", "-1FR").
fn parse_weekday_num(s: &str) -> Result<WeekdayNum, String> {
    // Weekday code is always the last two characters
    if s.len() < 2 || !s.is_ascii() {
        return Err(format!("{s:?} is not a weekday"));
    }

    let weekday_str = &s[s.len() - 2..];
    let ordinal_str = &s[..s.len() - 2];

    let weekday =
        Weekday::parse(weekday_str).ok_or_else(|| format!("{weekday_str:?} is not a weekday code"))?;

    if ordinal_str.is_empty() {
        return Ok(WeekdayNum::every(weekday));
    }

    let ordinal: i8 = ordinal_str
        .parse()
        .map_err(|_e| format!("{ordinal_str:?} is not a weekday ordinal"))?;

    WeekdayNum::nth(ordinal, weekday)
        .ok_or_else(|| format!("ordinal {ordinal} must be within ±1..±53"))
}
