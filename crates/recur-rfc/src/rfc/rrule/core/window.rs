use std::fmt;

use chrono::NaiveDateTime;

/// Which end of the window a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    After,
    Before,
}

impl Bound {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::After => "after",
            Self::Before => "before",
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open query range `[after, before)`.
///
/// Constructed only through the bound parser, which guarantees `after < before`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    after: NaiveDateTime,
    before: NaiveDateTime,
}

impl Window {
    /// Creates a window, or `None` when the bounds are equal or inverted.
    #[must_use]
    pub fn new(after: NaiveDateTime, before: NaiveDateTime) -> Option<Self> {
        (after < before).then_some(Self { after, before })
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn after(&self) -> NaiveDateTime {
        self.after
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn before(&self) -> NaiveDateTime {
        self.before
    }

    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.after <= at && at < self.before
    }
}
