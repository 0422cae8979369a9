//! Occurrence queries over a half-open window.

mod response;

pub use response::{OccurrenceList, OccurrenceResponse};

use recur_rfc::error::RfcError;
use recur_rfc::rfc::rrule::build::format_all;
use recur_rfc::rfc::rrule::expand::{ExpansionLimits, expand};
use recur_rfc::rfc::rrule::parse::{parse_recurrence, parse_window};

use crate::error::ServiceResult;

/// ## Summary
/// Computes the occurrences of `rule` inside `[after, before)`, rendered as
/// canonical timestamp strings in increasing order.
///
/// `rule` is either a bare rule body (`FREQ=...;...`) or newline-separated
/// `DTSTART`/`RRULE`/`RDATE`/`EXDATE`/`EXRULE` lines. Without `DTSTART` the rule is
/// anchored at `after`. An empty list is a successful result.
///
/// ## Errors
/// The rule is parsed before the bounds and both before expansion, so the
/// first failure reported is:
/// - a rule error (unknown, duplicate or invalid field, missing FREQ, COUNT with UNTIL)
/// - a bound error (`after` malformed, `before` malformed, then `after >= before`)
/// - an expansion error (empty period ceiling exceeded)
#[tracing::instrument(skip(limits), err)]
pub fn occurrences_between(
    rule: &str,
    after: &str,
    before: &str,
    limits: &ExpansionLimits,
) -> ServiceResult<OccurrenceList> {
    let set = parse_recurrence(rule).map_err(RfcError::from)?;
    let window = parse_window(after, before).map_err(RfcError::from)?;
    let expansion = expand(&set, &window, limits).map_err(RfcError::from)?;

    let instants: Vec<_> = expansion.occurrences.iter().map(|o| o.at).collect();
    let list = OccurrenceList::new(format_all(&instants), expansion.limited);

    tracing::debug!(
        occurrences = list.len(),
        limited = list.is_limited(),
        "Computed occurrences"
    );

    Ok(list)
}
