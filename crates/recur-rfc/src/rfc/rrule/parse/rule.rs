//! RRULE field parser (RFC 5545 §3.3.10).
//!
//! Fields are first collected into a key → raw value map in a single pass,
//! then converted and validated together. Validation therefore never sees a
//! half-built rule, and field order has no influence on the result.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::error::{RuleError, RuleErrorKind, RuleResult};
use super::values::{parse_byday, parse_int_list, parse_timestamp};
use crate::rfc::rrule::core::{Frequency, RecurrenceRule, Weekday};

/// Rule parts understood by the parser, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Field {
    Freq,
    Interval,
    Count,
    Until,
    Wkst,
    ByDay,
    ByMonthDay,
    ByMonth,
    ByYearDay,
    ByHour,
    ByMinute,
    BySecond,
    BySetPos,
}

impl Field {
    fn parse(key: &str) -> Option<Self> {
        Some(match key.to_ascii_uppercase().as_str() {
            "FREQ" => Self::Freq,
            "INTERVAL" => Self::Interval,
            "COUNT" => Self::Count,
            "UNTIL" => Self::Until,
            "WKST" => Self::Wkst,
            "BYDAY" => Self::ByDay,
            "BYMONTHDAY" => Self::ByMonthDay,
            "BYMONTH" => Self::ByMonth,
            "BYYEARDAY" => Self::ByYearDay,
            "BYHOUR" => Self::ByHour,
            "BYMINUTE" => Self::ByMinute,
            "BYSECOND" => Self::BySecond,
            "BYSETPOS" => Self::BySetPos,
            _ => return None,
        })
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Freq => "FREQ",
            Self::Interval => "INTERVAL",
            Self::Count => "COUNT",
            Self::Until => "UNTIL",
            Self::Wkst => "WKST",
            Self::ByDay => "BYDAY",
            Self::ByMonthDay => "BYMONTHDAY",
            Self::ByMonth => "BYMONTH",
            Self::ByYearDay => "BYYEARDAY",
            Self::ByHour => "BYHOUR",
            Self::ByMinute => "BYMINUTE",
            Self::BySecond => "BYSECOND",
            Self::BySetPos => "BYSETPOS",
        }
    }

    fn invalid(self, reason: impl Into<String>) -> RuleError {
        RuleError::invalid_value(self.as_str(), reason)
    }
}

/// Parses a RECUR value such as `FREQ=MONTHLY;INTERVAL=2;BYDAY=2TU`.
///
/// The returned rule has no anchor; see [`super::parse_recurrence`] for the
/// `DTSTART` line form.
///
/// ## Errors
/// Returns `UnknownField`, `DuplicateField` or `InvalidValue` for malformed
/// fields, `MissingFrequency` when FREQ is absent and `LimitConflict` when
/// both COUNT and UNTIL are given.
pub fn parse_rule(s: &str) -> RuleResult<RecurrenceRule> {
    let fields = collect_fields(s)?;

    let Some(freq) = fields.get(&Field::Freq) else {
        return Err(RuleError::new(RuleErrorKind::MissingFrequency, "FREQ"));
    };
    let frequency = Frequency::parse(freq)
        .ok_or_else(|| Field::Freq.invalid(format!("{freq:?} is not a frequency")))?;

    let mut rule = RecurrenceRule::new(frequency);
    for (&field, &value) in &fields {
        apply_field(&mut rule, field, value)?;
    }

    validate(&rule)?;

    tracing::trace!(rule = %rule, "Parsed recurrence rule");
    Ok(rule)
}

/// Splits the rule into fields, rejecting unknown and repeated keys.
fn collect_fields(s: &str) -> RuleResult<BTreeMap<Field, &str>> {
    let mut fields = BTreeMap::new();

    for part in s.split(';').map(str::trim).filter(|part| !part.is_empty()) {
        let Some((key, value)) = part.split_once('=') else {
            return Err(RuleError::invalid_value(part, "expected KEY=VALUE"));
        };
        let key = key.trim();

        let field = Field::parse(key).ok_or_else(|| {
            RuleError::new(RuleErrorKind::UnknownField, key.to_ascii_uppercase())
        })?;

        match fields.entry(field) {
            Entry::Vacant(entry) => {
                entry.insert(value.trim());
            }
            Entry::Occupied(_) => {
                return Err(RuleError::new(
                    RuleErrorKind::DuplicateField,
                    field.as_str(),
                ));
            }
        }
    }

    Ok(fields)
}

/// Converts one raw field value into its typed rule part.
fn apply_field(rule: &mut RecurrenceRule, field: Field, value: &str) -> RuleResult<()> {
    if value.is_empty() {
        return Err(field.invalid("value is empty"));
    }

    match field {
        // Already handled before the rule was constructed
        Field::Freq => {}
        Field::Interval => {
            rule.interval = value
                .parse()
                .map_err(|_e| field.invalid("must be a positive integer"))?;
        }
        Field::Count => {
            rule.count = Some(
                value
                    .parse()
                    .map_err(|_e| field.invalid("must be a positive integer"))?,
            );
        }
        Field::Until => {
            rule.until =
                Some(parse_timestamp(value).map_err(|e| field.invalid(e.to_string()))?);
        }
        Field::Wkst => {
            rule.week_start = Weekday::parse(value)
                .ok_or_else(|| field.invalid(format!("{value:?} is not a weekday code")))?;
        }
        Field::ByDay => {
            rule.by_day = parse_byday(value)
                .map_err(|e| field.invalid(e))?
                .into_iter()
                .collect();
        }
        Field::ByMonthDay => rule.by_month_day = int_set(field, value)?,
        Field::ByMonth => rule.by_month = int_set(field, value)?,
        Field::ByYearDay => rule.by_year_day = int_set(field, value)?,
        Field::ByHour => rule.by_hour = int_set(field, value)?,
        Field::ByMinute => rule.by_minute = int_set(field, value)?,
        Field::BySecond => rule.by_second = int_set(field, value)?,
        Field::BySetPos => rule.by_set_pos = int_set(field, value)?,
    }
    Ok(())
}

/// Parses an integer list field into an ordered set.
fn int_set<T: FromStr + Ord>(field: Field, value: &str) -> RuleResult<BTreeSet<T>> {
    Ok(parse_int_list(value)
        .map_err(|e| field.invalid(e))?
        .into_iter()
        .collect())
}

/// Cross-field validation, run once every field has been converted.
fn validate(rule: &RecurrenceRule) -> RuleResult<()> {
    if rule.interval == 0 {
        return Err(Field::Interval.invalid("must be a positive integer"));
    }

    if rule.count == Some(0) {
        return Err(Field::Count.invalid("must be a positive integer"));
    }

    if rule.count.is_some() && rule.until.is_some() {
        return Err(RuleError::new(RuleErrorKind::LimitConflict, "COUNT")
            .with_reason("COUNT and UNTIL are mutually exclusive"));
    }

    check_range(Field::ByMonth, &rule.by_month, 1..=12, false)?;
    check_range(Field::ByMonthDay, &rule.by_month_day, -31..=31, true)?;
    check_range(Field::ByYearDay, &rule.by_year_day, -366..=366, true)?;
    check_range(Field::ByHour, &rule.by_hour, 0..=23, false)?;
    check_range(Field::ByMinute, &rule.by_minute, 0..=59, false)?;
    check_range(Field::BySecond, &rule.by_second, 0..=59, false)?;
    check_range(Field::BySetPos, &rule.by_set_pos, -366..=366, true)?;

    let has_ordinal = rule.by_day.iter().any(|day| day.ordinal.is_some());
    if has_ordinal && !matches!(rule.frequency, Frequency::Monthly | Frequency::Yearly) {
        return Err(Field::ByDay.invalid(format!(
            "weekday ordinals require FREQ=MONTHLY or FREQ=YEARLY, not {}",
            rule.frequency
        )));
    }

    if !rule.by_year_day.is_empty()
        && matches!(
            rule.frequency,
            Frequency::Daily | Frequency::Weekly | Frequency::Monthly
        )
    {
        return Err(Field::ByYearDay.invalid(format!(
            "not allowed with FREQ={}",
            rule.frequency
        )));
    }

    if !rule.by_month_day.is_empty() && rule.frequency == Frequency::Weekly {
        return Err(Field::ByMonthDay.invalid("not allowed with FREQ=WEEKLY"));
    }

    if !rule.by_set_pos.is_empty() && !rule.has_by_part() {
        return Err(Field::BySetPos.invalid("requires another BY* rule part"));
    }

    Ok(())
}

/// Checks that every value lies in `range` and, when `nonzero`, is not 0.
fn check_range<'a, T>(
    field: Field,
    values: impl IntoIterator<Item = &'a T>,
    range: RangeInclusive<T>,
    nonzero: bool,
) -> RuleResult<()>
where
    T: PartialOrd + Default + Display + 'a,
{
    for value in values {
        if !range.contains(value) || (nonzero && *value == T::default()) {
            let zero = if nonzero { ", excluding 0" } else { "" };
            return Err(field.invalid(format!(
                "{value} is outside {}..={}{zero}",
                range.start(),
                range.end()
            )));
        }
    }
    Ok(())
}
