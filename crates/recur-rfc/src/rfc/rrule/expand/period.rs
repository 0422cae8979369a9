//! Period cursor and per-period candidate expansion.
//!
//! A period is one unit of the rule's frequency: a calendar year or month,
//! a week beginning on WKST, a day, or an anchor-aligned hour, minute or
//! second. Periods are addressed by index from the anchor's period, stepping
//! by INTERVAL.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use super::calendar::{
    days_in_month, days_in_year, is_nth_weekday, month_index, month_start, resolve_position,
    week_start,
};
use crate::rfc::rrule::core::{Frequency, RecurrenceRule, Weekday, WeekdayNum};

/// How period starts advance.
#[derive(Debug, Clone, Copy)]
enum Stride {
    /// Calendar months per period index, from a month index origin.
    Months { origin: i64, step: i64 },
    /// Seconds per period index, from a datetime origin.
    Fixed { origin: NaiveDateTime, step: i64 },
}

/// Outcome of expanding one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum PeriodCandidates {
    /// Sorted, deduplicated instants produced by the period (possibly none).
    Instants(Vec<NaiveDateTime>),
    /// Sorted matching days, each crossed with every time of day of the rule.
    Days(Vec<NaiveDate>),
    /// Nothing matches until the given instant; periods before it can be skipped.
    SkipTo(NaiveDateTime),
    /// The calendar cannot represent the next candidate.
    Exhausted,
}

/// Expands periods of one rule with its defaults resolved against the anchor.
#[derive(Debug, Clone)]
pub(super) struct Expander<'a> {
    rule: &'a RecurrenceRule,
    stride: Stride,
    by_month: BTreeSet<u8>,
    by_month_day: BTreeSet<i8>,
    by_day: BTreeSet<WeekdayNum>,
    /// Ordinal weekdays count within the month rather than the year.
    month_scoped_ordinals: bool,
    hours: Vec<u32>,
    minutes: Vec<u32>,
    seconds: Vec<u32>,
}

impl<'a> Expander<'a> {
    /// Resolves the rule's implicit parts from `anchor`.
    ///
    /// With no day-level filter, a yearly rule repeats the anchor's month and
    /// day, a monthly rule the anchor's day of month and a weekly rule the
    /// anchor's weekday. Time-of-day parts default to the anchor's.
    #[must_use]
    pub(super) fn new(rule: &'a RecurrenceRule, anchor: NaiveDateTime) -> Option<Self> {
        let mut by_month = rule.by_month.clone();
        let mut by_month_day = rule.by_month_day.clone();
        let mut by_day = rule.by_day.clone();

        let no_day_filter =
            rule.by_year_day.is_empty() && rule.by_month_day.is_empty() && rule.by_day.is_empty();
        let anchor_day = i8::try_from(anchor.day()).ok()?;
        let anchor_month = u8::try_from(anchor.month()).ok()?;

        if no_day_filter {
            match rule.frequency {
                Frequency::Yearly => {
                    if by_month.is_empty() {
                        by_month.insert(anchor_month);
                    }
                    by_month_day.insert(anchor_day);
                }
                Frequency::Monthly => {
                    by_month_day.insert(anchor_day);
                }
                Frequency::Weekly => {
                    by_day.insert(WeekdayNum::every(Weekday::from(anchor.weekday())));
                }
                Frequency::Daily
                | Frequency::Hourly
                | Frequency::Minutely
                | Frequency::Secondly => {}
            }
        }

        let interval = i64::from(rule.interval);
        let date = anchor.date();
        let fixed = |origin: NaiveDateTime, unit: i64| Stride::Fixed {
            origin,
            step: unit * interval,
        };
        let stride = match rule.frequency {
            Frequency::Yearly => Stride::Months {
                origin: i64::from(anchor.year()) * 12,
                step: 12 * interval,
            },
            Frequency::Monthly => Stride::Months {
                origin: month_index(date),
                step: interval,
            },
            Frequency::Weekly => fixed(
                week_start(date, rule.week_start)?.and_time(NaiveTime::MIN),
                7 * 86_400,
            ),
            Frequency::Daily => fixed(date.and_time(NaiveTime::MIN), 86_400),
            Frequency::Hourly => fixed(date.and_hms_opt(anchor.hour(), 0, 0)?, 3_600),
            Frequency::Minutely => fixed(date.and_hms_opt(anchor.hour(), anchor.minute(), 0)?, 60),
            Frequency::Secondly => fixed(anchor.with_nanosecond(0)?, 1),
        };

        Some(Self {
            rule,
            stride,
            by_month,
            by_month_day,
            by_day,
            month_scoped_ordinals: rule.frequency == Frequency::Monthly
                || (rule.frequency == Frequency::Yearly && !rule.by_month.is_empty()),
            hours: effective(&rule.by_hour, anchor.hour()),
            minutes: effective(&rule.by_minute, anchor.minute()),
            seconds: effective(&rule.by_second, anchor.second()),
        })
    }

    /// Start of the period at `index`, or `None` past the calendar's range.
    ///
    /// Every candidate of the period is at or after its start.
    #[must_use]
    pub(super) fn period_start(&self, index: u64) -> Option<NaiveDateTime> {
        let index = i64::try_from(index).ok()?;
        match self.stride {
            Stride::Months { origin, step } => {
                let month = origin.checked_add(index.checked_mul(step)?)?;
                Some(month_start(month)?.and_time(NaiveTime::MIN))
            }
            Stride::Fixed { origin, step } => {
                origin.checked_add_signed(TimeDelta::try_seconds(index.checked_mul(step)?)?)
            }
        }
    }

    /// Number of leading periods that end at or before `t`.
    ///
    /// Those periods cannot produce an instant at or after `t`.
    #[must_use]
    pub(super) fn periods_before(&self, t: NaiveDateTime) -> u64 {
        let skipped = match self.stride {
            Stride::Months { origin, step } => (month_index(t.date()) - origin).div_euclid(step),
            Stride::Fixed { origin, step } => (t - origin).num_seconds().div_euclid(step),
        };
        u64::try_from(skipped).unwrap_or(0)
    }

    /// Index of the first period starting at or after `t`.
    #[must_use]
    pub(super) fn first_period_from(&self, t: NaiveDateTime) -> u64 {
        let index = match self.stride {
            Stride::Months { origin, step } => {
                let gap = month_index(t.date()) - origin;
                let starts_late = t.day() > 1 || t.time() != NaiveTime::MIN;
                gap.div_euclid(step) + i64::from(gap.rem_euclid(step) != 0 || starts_late)
            }
            Stride::Fixed { origin, step } => {
                let gap = (t - origin).num_seconds();
                gap.div_euclid(step) + i64::from(gap.rem_euclid(step) != 0)
            }
        };
        u64::try_from(index).unwrap_or(0)
    }

    /// Expands the period starting at `start` into its candidates, BYSETPOS applied.
    ///
    /// Daily and coarser periods without BYSETPOS yield their matching days;
    /// the times of day on each are produced on demand by [`Self::times`].
    #[must_use]
    pub(super) fn candidates(&self, start: NaiveDateTime) -> PeriodCandidates {
        if self.rule.frequency.is_sub_daily() {
            return self.sub_daily_candidates(start);
        }

        let days = self.days(start.date());
        if self.rule.by_set_pos.is_empty() {
            PeriodCandidates::Days(days)
        } else {
            PeriodCandidates::Instants(self.select_positions(&days))
        }
    }

    /// Number of times of day each matching day expands to.
    #[must_use]
    pub(super) fn times_per_day(&self) -> usize {
        self.hours.len() * self.minutes.len() * self.seconds.len()
    }

    /// The rule's times of day in increasing order.
    pub(super) fn times(&self) -> impl Iterator<Item = NaiveTime> + '_ {
        (0..self.times_per_day()).filter_map(|index| self.time_at(index))
    }

    /// The `index`-th time of day, counting from 0.
    fn time_at(&self, index: usize) -> Option<NaiveTime> {
        let per_hour = self.minutes.len() * self.seconds.len();
        let hour = self.hours.get(index.checked_div(per_hour)?)?;
        let rest = index % per_hour;
        let minute = self.minutes.get(rest / self.seconds.len())?;
        let second = self.seconds.get(rest % self.seconds.len())?;
        NaiveTime::from_hms_opt(*hour, *minute, *second)
    }

    /// BYSETPOS over `days` crossed with the times of day, resolved by position
    /// without building the full candidate list.
    fn select_positions(&self, days: &[NaiveDate]) -> Vec<NaiveDateTime> {
        let per_day = self.times_per_day();
        let total = u32::try_from(days.len().saturating_mul(per_day)).unwrap_or(u32::MAX);
        let mut selected: Vec<NaiveDateTime> = self
            .rule
            .by_set_pos
            .iter()
            .filter_map(|&p| resolve_position(i32::from(p), total))
            .filter_map(|pos| {
                let index = usize::try_from(pos).ok()?.checked_sub(1)?;
                let day = days.get(index.checked_div(per_day)?)?;
                Some(day.and_time(self.time_at(index % per_day)?))
            })
            .collect();
        selected.sort_unstable();
        selected.dedup();
        selected
    }

    /// Matching days of a year, month, week or day period, in order.
    fn days(&self, first: NaiveDate) -> Vec<NaiveDate> {
        match self.rule.frequency {
            Frequency::Yearly => {
                let year = first.year();
                let months: Vec<u32> = if self.by_month.is_empty() {
                    (1..=12).collect()
                } else {
                    self.by_month.iter().copied().map(u32::from).collect()
                };
                months
                    .into_iter()
                    .flat_map(|month| {
                        (1..=days_in_month(year, month))
                            .filter_map(move |day| NaiveDate::from_ymd_opt(year, month, day))
                    })
                    .filter(|day| self.day_matches(*day))
                    .collect()
            }
            Frequency::Monthly => (1..=days_in_month(first.year(), first.month()))
                .filter_map(|day| first.with_day(day))
                .filter(|day| self.day_matches(*day))
                .collect(),
            Frequency::Weekly => first
                .iter_days()
                .take(7)
                .filter(|day| self.day_matches(*day))
                .collect(),
            Frequency::Daily | Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
                if self.day_matches(first) {
                    vec![first]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Applies every date-level filter to one day (AND across parts, OR within).
    fn day_matches(&self, date: NaiveDate) -> bool {
        let year = date.year();
        let month = date.month();

        if !self.by_month.is_empty()
            && !u8::try_from(month).is_ok_and(|month| self.by_month.contains(&month))
        {
            return false;
        }

        if !self.rule.by_year_day.is_empty() {
            let len = days_in_year(year);
            let ordinal = date.ordinal();
            if !self
                .rule
                .by_year_day
                .iter()
                .any(|&v| resolve_position(i32::from(v), len) == Some(ordinal))
            {
                return false;
            }
        }

        if !self.by_month_day.is_empty() {
            let len = days_in_month(year, month);
            if !self
                .by_month_day
                .iter()
                .any(|&v| resolve_position(i32::from(v), len) == Some(date.day()))
            {
                return false;
            }
        }

        if !self.by_day.is_empty() {
            let weekday = Weekday::from(date.weekday());
            let (pos, len) = if self.month_scoped_ordinals {
                (date.day(), days_in_month(year, month))
            } else {
                (date.ordinal(), days_in_year(year))
            };
            if !self.by_day.iter().any(|day| {
                day.weekday == weekday && day.ordinal.is_none_or(|n| is_nth_weekday(n, pos, len))
            }) {
                return false;
            }
        }

        true
    }

    /// Hourly, minutely and secondly periods: finer time parts expand, coarser ones limit.
    fn sub_daily_candidates(&self, start: NaiveDateTime) -> PeriodCandidates {
        let date = start.date();
        let (hour, minute) = (start.hour(), start.minute());

        if !self.day_matches(date) {
            return skip_to(date.succ_opt().map(|next| next.and_time(NaiveTime::MIN)));
        }
        if !contains_or_empty(&self.rule.by_hour, hour) {
            return skip_to(next_boundary(date, hour, 0, 3_600));
        }

        let instants: Vec<NaiveDateTime> = match self.rule.frequency {
            Frequency::Hourly => self
                .minutes
                .iter()
                .flat_map(|&m| self.seconds.iter().map(move |&s| (m, s)))
                .filter_map(|(m, s)| date.and_hms_opt(hour, m, s))
                .collect(),
            Frequency::Minutely => {
                if !contains_or_empty(&self.rule.by_minute, minute) {
                    return skip_to(next_boundary(date, hour, minute, 60));
                }
                self.seconds
                    .iter()
                    .filter_map(|&s| date.and_hms_opt(hour, minute, s))
                    .collect()
            }
            Frequency::Secondly => {
                if !contains_or_empty(&self.rule.by_minute, minute) {
                    return skip_to(next_boundary(date, hour, minute, 60));
                }
                if contains_or_empty(&self.rule.by_second, start.second()) {
                    vec![start]
                } else {
                    Vec::new()
                }
            }
            Frequency::Daily | Frequency::Weekly | Frequency::Monthly | Frequency::Yearly => {
                Vec::new()
            }
        };

        PeriodCandidates::Instants(apply_set_pos(instants, &self.rule.by_set_pos))
    }
}

/// A by-time part as a sorted list, or the anchor's component when absent.
fn effective(values: &BTreeSet<u8>, anchor: u32) -> Vec<u32> {
    if values.is_empty() {
        vec![anchor]
    } else {
        values.iter().copied().map(u32::from).collect()
    }
}

fn contains_or_empty(values: &BTreeSet<u8>, value: u32) -> bool {
    values.is_empty() || u8::try_from(value).is_ok_and(|value| values.contains(&value))
}

fn skip_to(boundary: Option<NaiveDateTime>) -> PeriodCandidates {
    boundary.map_or(PeriodCandidates::Exhausted, PeriodCandidates::SkipTo)
}

/// Start of the next hour (`unit` = 3600) or minute (`unit` = 60) after `hour:minute`.
fn next_boundary(date: NaiveDate, hour: u32, minute: u32, unit: i64) -> Option<NaiveDateTime> {
    date.and_hms_opt(hour, minute, 0)?
        .checked_add_signed(TimeDelta::try_seconds(unit)?)
}

/// Keeps the BYSETPOS-selected positions of a sorted candidate list.
fn apply_set_pos(candidates: Vec<NaiveDateTime>, positions: &BTreeSet<i16>) -> Vec<NaiveDateTime> {
    if positions.is_empty() {
        return candidates;
    }

    let len = u32::try_from(candidates.len()).unwrap_or(u32::MAX);
    let mut selected: Vec<NaiveDateTime> = positions
        .iter()
        .filter_map(|&p| resolve_position(i32::from(p), len))
        .filter_map(|pos| {
            let index = usize::try_from(pos).ok()?.checked_sub(1)?;
            candidates.get(index).copied()
        })
        .collect();
    selected.sort_unstable();
    selected.dedup();
    selected
}
