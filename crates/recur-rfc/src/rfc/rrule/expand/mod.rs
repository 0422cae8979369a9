//! Recurrence expansion.
//!
//! Walks the rule's periods from its anchor and materializes the occurrences
//! that fall inside a query window.

mod calendar;
mod generator;
mod period;
mod set;

pub use generator::{ExpansionError, ExpansionLimits};
pub use set::{Expansion, expand};
