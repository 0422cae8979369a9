//! Recurrence core models.
//!
//! Every value here is immutable once parsed and local to a single request.

mod occurrence;
mod rrule;
mod set;
mod window;

pub use occurrence::Occurrence;
pub use rrule::{Frequency, RecurrenceRule, Weekday, WeekdayNum};
pub use set::RecurrenceSet;
pub use window::{Bound, Window};
