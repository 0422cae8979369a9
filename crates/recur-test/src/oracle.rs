//! Reference expansion through the `rrule` crate.
//!
//! Rules are evaluated in UTC so the crate's instants map one to one onto
//! naive timestamps.

use chrono::NaiveDateTime;
use rrule::RRuleSet;

const RRULE_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Renders `t` as an iCalendar UTC date-time (`19970902T090000Z`).
#[must_use]
pub fn ical_timestamp(t: NaiveDateTime) -> String {
    t.format(RRULE_TIMESTAMP_FORMAT).to_string()
}

/// ## Summary
/// Expands `body` anchored at `dtstart` with the `rrule` crate, returning at
/// most `limit` instants.
///
/// ## Errors
/// Returns the `rrule` crate's message when it rejects the rule.
pub fn reference_occurrences(
    dtstart: NaiveDateTime,
    body: &str,
    limit: u16,
) -> Result<Vec<NaiveDateTime>, String> {
    let text = format!("DTSTART:{}\nRRULE:{body}", ical_timestamp(dtstart));
    let set = text.parse::<RRuleSet>().map_err(|e| e.to_string())?;
    let result = set.all(limit);

    tracing::debug!(
        rule = %text,
        occurrences = result.dates.len(),
        limited = result.limited,
        "Reference expansion"
    );

    Ok(result.dates.iter().map(chrono::DateTime::naive_utc).collect())
}
