//! Window bound parsing.

use chrono::NaiveDateTime;

use super::error::BoundError;
use super::values::parse_timestamp;
use crate::rfc::rrule::build::format_timestamp;
use crate::rfc::rrule::core::{Bound, Window};

/// Parses one window bound.
///
/// ## Errors
/// Returns `BoundError::Parse` naming `which` when the string is not a timestamp.
pub fn parse_bound(which: Bound, s: &str) -> Result<NaiveDateTime, BoundError> {
    parse_timestamp(s.trim()).map_err(|e| BoundError::Parse {
        which,
        value: s.to_string(),
        reason: e.to_string(),
    })
}

/// Parses both bounds into a half-open window `[after, before)`.
///
/// `after` is parsed (and reported) first.
///
/// ## Errors
/// Returns `BoundError::Parse` for a malformed bound and `BoundError::Order`
/// when `after` is not strictly earlier than `before`.
pub fn parse_window(after: &str, before: &str) -> Result<Window, BoundError> {
    let after = parse_bound(Bound::After, after)?;
    let before = parse_bound(Bound::Before, before)?;

    Window::new(after, before).ok_or_else(|| BoundError::Order {
        after: format_timestamp(after),
        before: format_timestamp(before),
    })
}
