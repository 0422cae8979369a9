//! Canonical timestamp rendering.
//!
//! Each timestamp is rendered on its own, so the text of one occurrence never
//! depends on the others in a result. Output is always accepted by
//! [`crate::rfc::rrule::parse::parse_timestamp`] and parses back to the same
//! instant.

use chrono::{NaiveDateTime, NaiveTime, Timelike};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Textual form of a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampForm {
    /// `YYYY-MM-DD`; only valid for midnight.
    Date,
    /// `YYYY-MM-DDTHH:MM:SS`.
    DateTime,
}

impl TimestampForm {
    /// The shortest form that represents `t` exactly.
    #[must_use]
    pub fn of(t: NaiveDateTime) -> Self {
        if is_midnight(t) {
            Self::Date
        } else {
            Self::DateTime
        }
    }

    /// Renders `t` in this form, falling back to date-time for a non-midnight
    /// instant so no information is dropped.
    #[must_use]
    pub fn format(self, t: NaiveDateTime) -> String {
        match self {
            Self::Date if is_midnight(t) => t.format(DATE_FORMAT).to_string(),
            Self::Date | Self::DateTime => t.format(DATE_TIME_FORMAT).to_string(),
        }
    }
}

/// Renders a single timestamp in its shortest exact form.
#[must_use]
pub fn format_timestamp(t: NaiveDateTime) -> String {
    TimestampForm::of(t).format(t)
}

/// Renders a sequence, each timestamp in its own shortest exact form.
#[must_use]
pub fn format_all(timestamps: &[NaiveDateTime]) -> Vec<String> {
    timestamps.iter().copied().map(format_timestamp).collect()
}

fn is_midnight(t: NaiveDateTime) -> bool {
    t.time() == NaiveTime::MIN && t.nanosecond() == 0
}
