use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use super::generator::{ExpansionError, ExpansionLimits, expand_rule};
use crate::rfc::rrule::core::{Occurrence, RecurrenceSet, Window};

/// Occurrences of a recurrence set inside one window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expansion {
    /// Strictly increasing occurrences.
    pub occurrences: Vec<Occurrence>,
    /// Whether `max_occurrences` cut the result short.
    pub limited: bool,
}

/// ## Summary
/// Expands a recurrence set: rule occurrences plus in-window RDATEs, minus
/// EXDATEs and EXRULE occurrences, sorted and deduplicated, then capped at
/// `max_occurrences`.
///
/// ## Errors
/// Returns an error if the expansion of the rule or of an EXRULE exceeds the
/// empty period ceiling.
pub fn expand(
    set: &RecurrenceSet,
    window: &Window,
    limits: &ExpansionLimits,
) -> Result<Expansion, ExpansionError> {
    let mut excluded: BTreeSet<NaiveDateTime> = set.exdates.clone();
    for exrule in &set.exrules {
        excluded.extend(
            expand_rule(exrule, window, limits.max_empty_periods, None)?
                .into_iter()
                .map(|o| o.at),
        );
    }

    // One extra occurrence tells a full result from a truncated one, and
    // excluded instants must not use up the cap.
    let emit_limit = limits
        .max_occurrences
        .map(|max| max.saturating_add(excluded.len()).saturating_add(1));

    let mut occurrences = expand_rule(&set.rule, window, limits.max_empty_periods, emit_limit)?;

    occurrences.extend(
        set.rdates
            .iter()
            .copied()
            .filter(|at| window.contains(*at))
            .map(|at| Occurrence { at, ordinal: None }),
    );
    occurrences.retain(|o| !excluded.contains(&o.at));
    occurrences.sort();
    occurrences.dedup_by_key(|o| o.at);

    let mut limited = false;
    if let Some(max) = limits.max_occurrences
        && occurrences.len() > max
    {
        tracing::warn!(max, "Occurrence list truncated");
        occurrences.truncate(max);
        limited = true;
    }

    Ok(Expansion {
        occurrences,
        limited,
    })
}
