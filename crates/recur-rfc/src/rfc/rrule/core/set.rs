use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use super::RecurrenceRule;

/// A recurrence rule together with its inclusions and exclusions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceSet {
    pub rule: RecurrenceRule,
    /// Extra occurrences (RDATE); not subject to COUNT or UNTIL.
    pub rdates: BTreeSet<NaiveDateTime>,
    /// Excluded instants (EXDATE); still consume a COUNT position.
    pub exdates: BTreeSet<NaiveDateTime>,
    /// Exclusion rules (EXRULE) sharing the set's anchor.
    pub exrules: Vec<RecurrenceRule>,
}

impl From<RecurrenceRule> for RecurrenceSet {
    fn from(rule: RecurrenceRule) -> Self {
        Self {
            rule,
            rdates: BTreeSet::new(),
            exdates: BTreeSet::new(),
            exrules: Vec::new(),
        }
    }
}
