//! Gregorian calendar arithmetic used by period expansion.

use chrono::{Datelike, NaiveDate};

use crate::rfc::rrule::core::Weekday;

#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[must_use]
pub const fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Months since year 0, so month arithmetic becomes integer arithmetic.
#[must_use]
pub fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// First day of the month at `index` (see [`month_index`]).
#[must_use]
pub fn month_start(index: i64) -> Option<NaiveDate> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Start of the week containing `date`, with weeks beginning on `week_start`.
#[must_use]
pub fn week_start(date: NaiveDate, week_start: Weekday) -> Option<NaiveDate> {
    let today = Weekday::from(date.weekday()).num_days_from_monday();
    let back = (7 + today - week_start.num_days_from_monday()) % 7;
    date.checked_sub_days(chrono::Days::new(u64::from(back)))
}

/// Resolves a signed 1-based position against a run of `len` items.
///
/// Positive values count from the start, negative from the end; returns
/// `None` for 0 or a position beyond the run.
#[must_use]
pub fn resolve_position(value: i32, len: u32) -> Option<u32> {
    let len = i64::from(len);
    let value = i64::from(value);
    let pos = if value > 0 { value } else { len + 1 + value };
    if (1..=len).contains(&pos) && value != 0 {
        u32::try_from(pos).ok()
    } else {
        None
    }
}

/// Whether the day at 1-based `pos` of a `len`-day scope is the `n`-th
/// occurrence of its weekday (from the end when `n` is negative).
#[must_use]
pub fn is_nth_weekday(n: i8, pos: u32, len: u32) -> bool {
    if pos == 0 || pos > len {
        return false;
    }
    let from_start = (pos - 1) / 7 + 1;
    let from_end = (len - pos) / 7 + 1;
    match n {
        n if n > 0 => u32::from(n.unsigned_abs()) == from_start,
        n if n < 0 => u32::from(n.unsigned_abs()) == from_end,
        _ => false,
    }
}
