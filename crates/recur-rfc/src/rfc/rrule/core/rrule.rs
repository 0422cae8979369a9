//! Recurrence rule value type (RFC 5545 §3.3.10).

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;

use crate::rfc::rrule::build::format_timestamp;

/// Recurrence frequency (RFC 5545 §3.3.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses a frequency from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Self::Secondly,
            "MINUTELY" => Self::Minutely,
            "HOURLY" => Self::Hourly,
            "DAILY" => Self::Daily,
            "WEEKLY" => Self::Weekly,
            "MONTHLY" => Self::Monthly,
            "YEARLY" => Self::Yearly,
            _ => return None,
        })
    }

    /// Whether periods of this frequency are shorter than a day.
    #[must_use]
    pub const fn is_sub_daily(self) -> bool {
        matches!(self, Self::Secondly | Self::Minutely | Self::Hourly)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Day of the week, ordered Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Returns the two-letter abbreviation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
            Self::Sunday => "SU",
        }
    }

    /// Parses a weekday from a two-letter abbreviation (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_uppercase().as_str() {
            "MO" => Self::Monday,
            "TU" => Self::Tuesday,
            "WE" => Self::Wednesday,
            "TH" => Self::Thursday,
            "FR" => Self::Friday,
            "SA" => Self::Saturday,
            "SU" => Self::Sunday,
            _ => return None,
        })
    }

    /// Days since Monday (Monday = 0).
    #[must_use]
    pub const fn num_days_from_monday(self) -> u32 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weekday with optional occurrence number.
///
/// Used in BYDAY rule part. Examples:
/// - `MO` - every Monday
/// - `1MO` - first Monday of the month/year
/// - `-1FR` - last Friday of the month/year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekdayNum {
    /// Optional occurrence number (-53 to 53, excluding 0).
    pub ordinal: Option<i8>,
    /// The day of the week.
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// Creates a weekday occurrence without an ordinal.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }

    /// Creates a weekday occurrence with an ordinal.
    ///
    /// Returns `None` if ordinal is 0 or outside the range -53..=53.
    #[must_use]
    pub fn nth(ordinal: i8, weekday: Weekday) -> Option<Self> {
        (ordinal != 0 && (-53..=53).contains(&ordinal)).then_some(Self {
            ordinal: Some(ordinal),
            weekday,
        })
    }
}

impl fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(n) = self.ordinal {
            write!(f, "{n}")?;
        }
        write!(f, "{}", self.weekday)
    }
}

/// Validated recurrence rule (RFC 5545 §3.3.10).
///
/// Every by-rule part is an ordered set, so two rules written with their
/// fields or list values in a different order compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    /// Recurrence frequency.
    pub frequency: Frequency,

    /// Number of periods between successive expansions (at least 1).
    pub interval: u32,

    /// Number of occurrences, counted from the anchor (mutually exclusive with until).
    pub count: Option<u32>,

    /// Inclusive ceiling on occurrences (mutually exclusive with count).
    pub until: Option<NaiveDateTime>,

    /// Week start day, used to delimit weeks for `FREQ=WEEKLY`.
    pub week_start: Weekday,

    /// By-day list with optional occurrence numbers.
    pub by_day: BTreeSet<WeekdayNum>,

    /// By-monthday list (-31 to 31, excluding 0).
    pub by_month_day: BTreeSet<i8>,

    /// By-month list (1-12).
    pub by_month: BTreeSet<u8>,

    /// By-yearday list (-366 to 366, excluding 0).
    pub by_year_day: BTreeSet<i16>,

    /// By-hour list (0-23).
    pub by_hour: BTreeSet<u8>,

    /// By-minute list (0-59).
    pub by_minute: BTreeSet<u8>,

    /// By-second list (0-59).
    pub by_second: BTreeSet<u8>,

    /// By-setpos list (-366 to 366, excluding 0).
    /// Filters on position within the frequency period.
    pub by_set_pos: BTreeSet<i16>,

    /// First candidate occurrence; the window's lower bound when absent.
    pub anchor: Option<NaiveDateTime>,
}

impl RecurrenceRule {
    /// Creates a rule with the given frequency and every other part defaulted.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            count: None,
            until: None,
            week_start: Weekday::Monday,
            by_day: BTreeSet::new(),
            by_month_day: BTreeSet::new(),
            by_month: BTreeSet::new(),
            by_year_day: BTreeSet::new(),
            by_hour: BTreeSet::new(),
            by_minute: BTreeSet::new(),
            by_second: BTreeSet::new(),
            by_set_pos: BTreeSet::new(),
            anchor: None,
        }
    }

    /// Whether any date-level filter (month, year day, month day, weekday) is present.
    #[must_use]
    pub fn has_date_filter(&self) -> bool {
        !self.by_month.is_empty()
            || !self.by_year_day.is_empty()
            || !self.by_month_day.is_empty()
            || !self.by_day.is_empty()
    }

    /// Whether any by-rule part other than BYSETPOS is present.
    #[must_use]
    pub fn has_by_part(&self) -> bool {
        self.has_date_filter()
            || !self.by_hour.is_empty()
            || !self.by_minute.is_empty()
            || !self.by_second.is_empty()
    }
}

fn join<T: fmt::Display>(values: &BTreeSet<T>) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![format!("FREQ={}", self.frequency)];

        if self.interval != 1 {
            parts.push(format!("INTERVAL={}", self.interval));
        }

        if let Some(until) = self.until {
            parts.push(format!("UNTIL={}", format_timestamp(until)));
        }

        if let Some(count) = self.count {
            parts.push(format!("COUNT={count}"));
        }

        if self.week_start != Weekday::Monday {
            parts.push(format!("WKST={}", self.week_start));
        }

        let lists = [
            ("BYSECOND", join(&self.by_second)),
            ("BYMINUTE", join(&self.by_minute)),
            ("BYHOUR", join(&self.by_hour)),
            ("BYDAY", join(&self.by_day)),
            ("BYMONTHDAY", join(&self.by_month_day)),
            ("BYYEARDAY", join(&self.by_year_day)),
            ("BYMONTH", join(&self.by_month)),
            ("BYSETPOS", join(&self.by_set_pos)),
        ];
        for (key, value) in lists {
            if !value.is_empty() {
                parts.push(format!("{key}={value}"));
            }
        }

        write!(f, "{}", parts.join(";"))
    }
}
