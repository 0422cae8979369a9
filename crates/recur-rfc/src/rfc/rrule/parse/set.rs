//! Rule-set content lines: `DTSTART`, `RRULE`, `RDATE`, `EXDATE` and `EXRULE`.

use std::collections::BTreeSet;

use super::error::{RuleError, RuleErrorKind, RuleResult};
use super::rule::parse_rule;
use super::values::{parse_timestamp, parse_timestamp_list};
use crate::rfc::rrule::core::RecurrenceSet;

/// Parses rule text into a recurrence set.
///
/// The text is either a bare rule (`FREQ=DAILY;COUNT=3`) or newline-separated
/// content lines:
///
/// ```text
/// DTSTART:2024-01-01T09:00:00
/// RRULE:FREQ=DAILY;COUNT=3
/// EXDATE:2024-01-02T09:00:00
/// EXRULE:FREQ=WEEKLY;BYDAY=SA,SU
/// ```
///
/// A line with no property name (its text before the first `:` contains `=`)
/// is read as the RRULE body. `RDATE`, `EXDATE` and `EXRULE` may repeat, and
/// every `EXRULE` takes the `DTSTART` anchor.
///
/// ## Errors
/// Returns `UnknownField` for an unsupported line name, `DuplicateField` for a
/// repeated `DTSTART` or `RRULE`, `InvalidValue` for a malformed timestamp and
/// any error of [`parse_rule`].
pub fn parse_recurrence(s: &str) -> RuleResult<RecurrenceSet> {
    let mut anchor = None;
    let mut body: Option<&str> = None;
    let mut rdates = BTreeSet::new();
    let mut exdates = BTreeSet::new();
    let mut exrules = Vec::new();

    for line in s.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let (name, value) = match line.split_once(':') {
            Some((name, value)) if !name.contains('=') => (name.trim(), value.trim()),
            _ => ("RRULE", line),
        };

        match name.to_ascii_uppercase().as_str() {
            "DTSTART" => {
                if anchor.is_some() {
                    return Err(RuleError::new(RuleErrorKind::DuplicateField, "DTSTART"));
                }
                anchor = Some(
                    parse_timestamp(value)
                        .map_err(|e| RuleError::invalid_value("DTSTART", e.to_string()))?,
                );
            }
            "RRULE" => {
                if body.is_some() {
                    return Err(RuleError::new(RuleErrorKind::DuplicateField, "RRULE"));
                }
                body = Some(value);
            }
            "RDATE" => rdates.extend(
                parse_timestamp_list(value).map_err(|e| RuleError::invalid_value("RDATE", e))?,
            ),
            "EXDATE" => exdates.extend(
                parse_timestamp_list(value).map_err(|e| RuleError::invalid_value("EXDATE", e))?,
            ),
            "EXRULE" => exrules.push(parse_rule(value)?),
            other => return Err(RuleError::new(RuleErrorKind::UnknownField, other)),
        }
    }

    let Some(body) = body else {
        return Err(RuleError::new(RuleErrorKind::MissingFrequency, "FREQ")
            .with_reason("no RRULE line"));
    };

    let mut rule = parse_rule(body)?;
    rule.anchor = anchor;
    for exrule in &mut exrules {
        exrule.anchor = anchor;
    }

    Ok(RecurrenceSet {
        rule,
        rdates,
        exdates,
        exrules,
    })
}
