//! Recurrence rule and window bound parsing.

mod bound;
mod error;
mod rule;
mod set;
mod values;

pub use bound::{parse_bound, parse_window};
pub use error::{BoundError, RuleError, RuleErrorKind, RuleResult};
pub use rule::parse_rule;
pub use set::parse_recurrence;
pub use values::{TimestampError, parse_timestamp};
