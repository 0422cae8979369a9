//! Rule expansion over a query window.

use std::ops::ControlFlow;

use chrono::{NaiveDate, NaiveDateTime};
use recur_core::config::LimitsConfig;
use recur_core::constants::DEFAULT_MAX_EMPTY_PERIODS;

use super::period::{Expander, PeriodCandidates};
use crate::rfc::rrule::core::{Occurrence, RecurrenceRule, Window};

/// Error during rule expansion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpansionError {
    /// Too many consecutive periods produced nothing before reaching `before`,
    /// UNTIL or COUNT.
    #[error("expansion gave up after {limit} consecutive periods without an occurrence")]
    GenerationOverflow { limit: u32 },
}

/// Bounds on the work and output of one expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionLimits {
    /// Consecutive empty periods tolerated before [`ExpansionError::GenerationOverflow`].
    pub max_empty_periods: u32,
    /// Cap on returned occurrences; `None` returns every occurrence in the window.
    pub max_occurrences: Option<usize>,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            max_empty_periods: DEFAULT_MAX_EMPTY_PERIODS,
            max_occurrences: None,
        }
    }
}

impl From<&LimitsConfig> for ExpansionLimits {
    fn from(config: &LimitsConfig) -> Self {
        Self {
            max_empty_periods: config.max_empty_periods,
            max_occurrences: Some(config.max_occurrences),
        }
    }
}

/// ## Summary
/// Expands `rule` into its occurrences inside `window`, in increasing order.
///
/// The rule starts at its anchor, or at the window's start when it has none.
/// COUNT is checked against the position in the full sequence from the
/// anchor, so a window past the COUNT-th occurrence is empty. At most
/// `emit_limit` occurrences are returned when set.
///
/// ## Errors
/// Returns [`ExpansionError::GenerationOverflow`] if more than
/// `max_empty_periods` consecutive periods produce no candidate.
pub(super) fn expand_rule(
    rule: &RecurrenceRule,
    window: &Window,
    max_empty_periods: u32,
    emit_limit: Option<usize>,
) -> Result<Vec<Occurrence>, ExpansionError> {
    let anchor = rule.anchor.unwrap_or_else(|| window.after());
    let Some(expander) = Expander::new(rule, anchor) else {
        return Ok(Vec::new());
    };

    // Without COUNT, positions are not needed and periods wholly before the
    // window can be stepped over.
    let mut index = if rule.count.is_none() {
        expander.periods_before(window.after())
    } else {
        0
    };

    let mut walk = Walk {
        rule,
        window,
        anchor,
        position: (index == 0).then_some(0),
        emit_limit,
        occurrences: Vec::new(),
    };
    let mut empty_run: u32 = 0;
    let mut periods: u64 = 0;

    loop {
        let Some(start) = expander.period_start(index) else {
            break;
        };
        if start >= window.before() || rule.until.is_some_and(|until| start > until) {
            break;
        }
        periods += 1;

        let flow = match expander.candidates(start) {
            PeriodCandidates::Instants(instants) => walk.visit_all(&instants),
            PeriodCandidates::Days(days) => walk.visit_days(&expander, &days),
            PeriodCandidates::SkipTo(next) => {
                index = expander.first_period_from(next).max(index + 1);
                check_empty_run(&mut empty_run, max_empty_periods)?;
                continue;
            }
            PeriodCandidates::Exhausted => break,
        };

        match flow {
            ControlFlow::Break(()) => break,
            ControlFlow::Continue(true) => empty_run = 0,
            ControlFlow::Continue(false) => check_empty_run(&mut empty_run, max_empty_periods)?,
        }
        index += 1;
    }

    let occurrences = walk.occurrences;
    tracing::debug!(
        frequency = %rule.frequency,
        periods,
        occurrences = occurrences.len(),
        "Expanded recurrence rule"
    );

    Ok(occurrences)
}

/// Candidate bookkeeping across periods: COUNT position, stop conditions and output.
///
/// Every visit returns `Break` once expansion must stop, otherwise whether
/// any candidate at or after the anchor was seen.
struct Walk<'r> {
    rule: &'r RecurrenceRule,
    window: &'r Window,
    anchor: NaiveDateTime,
    position: Option<u32>,
    emit_limit: Option<usize>,
    occurrences: Vec<Occurrence>,
}

impl Walk<'_> {
    fn visit_all(&mut self, instants: &[NaiveDateTime]) -> ControlFlow<(), bool> {
        let mut produced = false;
        for &at in instants {
            produced |= self.visit(at)?;
        }
        ControlFlow::Continue(produced)
    }

    fn visit_days(
        &mut self,
        expander: &Expander<'_>,
        days: &[NaiveDate],
    ) -> ControlFlow<(), bool> {
        let mut produced = false;
        for &day in days {
            produced |= self.visit_day(expander, day)?;
        }
        ControlFlow::Continue(produced)
    }

    /// Visits one matching day crossed with the rule's times of day, one at a time.
    fn visit_day(&mut self, expander: &Expander<'_>, day: NaiveDate) -> ControlFlow<(), bool> {
        if day < self.anchor.date() {
            return ControlFlow::Continue(false);
        }

        // Whole days between the anchor and the window only move the position.
        let ahead_of_window = day > self.anchor.date()
            && day < self.window.after().date()
            && self.rule.until.is_none_or(|until| day < until.date());
        if ahead_of_window {
            let len = u32::try_from(expander.times_per_day()).unwrap_or(u32::MAX);
            self.position = self.position.map(|p| p.saturating_add(len));
            if self.count_exceeded() {
                return ControlFlow::Break(());
            }
            return ControlFlow::Continue(true);
        }

        let mut produced = false;
        for time in expander.times() {
            produced |= self.visit(day.and_time(time))?;
        }
        ControlFlow::Continue(produced)
    }

    fn visit(&mut self, at: NaiveDateTime) -> ControlFlow<(), bool> {
        if at < self.anchor {
            return ControlFlow::Continue(false);
        }
        if self.rule.until.is_some_and(|until| at > until) {
            return ControlFlow::Break(());
        }

        self.position = self.position.map(|p| p.saturating_add(1));
        if self.count_exceeded() || at >= self.window.before() {
            return ControlFlow::Break(());
        }
        if at >= self.window.after() {
            self.occurrences.push(Occurrence {
                at,
                ordinal: self.position,
            });
            if self
                .emit_limit
                .is_some_and(|limit| self.occurrences.len() >= limit)
            {
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(true)
    }

    fn count_exceeded(&self) -> bool {
        self.rule
            .count
            .zip(self.position)
            .is_some_and(|(count, p)| p > count)
    }
}

fn check_empty_run(empty_run: &mut u32, limit: u32) -> Result<(), ExpansionError> {
    *empty_run = empty_run.saturating_add(1);
    if *empty_run > limit {
        tracing::warn!(limit, "Recurrence expansion hit the empty period ceiling");
        return Err(ExpansionError::GenerationOverflow { limit });
    }
    Ok(())
}
