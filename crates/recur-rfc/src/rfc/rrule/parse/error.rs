//! Rule and bound parsing error types.

use std::fmt;

use crate::rfc::rrule::core::Bound;

/// Result type for rule parsing operations.
pub type RuleResult<T> = Result<T, RuleError>;

/// Error type for rule parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleError {
    /// Kind of error.
    pub kind: RuleErrorKind,
    /// Rule field (or rule-set line name) the error refers to.
    pub field: String,
    /// Additional context about the error.
    pub reason: Option<String>,
}

impl RuleError {
    /// Creates a new rule error.
    #[must_use]
    pub fn new(kind: RuleErrorKind, field: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            reason: None,
        }
    }

    /// Creates an invalid value error with a reason.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(RuleErrorKind::InvalidValue, field).with_reason(reason)
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.field)?;
        if let Some(ref reason) = self.reason {
            write!(f, ": {reason}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RuleError {}

/// Kinds of rule errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleErrorKind {
    /// Field name not part of the grammar.
    UnknownField,
    /// Field given more than once.
    DuplicateField,
    /// Field value does not match its grammar or range.
    InvalidValue,
    /// FREQ is absent.
    MissingFrequency,
    /// COUNT and UNTIL are both present.
    LimitConflict,
}

impl fmt::Display for RuleErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField => write!(f, "unknown field"),
            Self::DuplicateField => write!(f, "duplicate field"),
            Self::InvalidValue => write!(f, "invalid value for field"),
            Self::MissingFrequency => write!(f, "missing required field"),
            Self::LimitConflict => write!(f, "conflicting limit"),
        }
    }
}

/// Error type for window bound parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundError {
    /// A bound string does not match the timestamp grammar.
    #[error("invalid `{which}` bound {value:?}: {reason}")]
    Parse {
        which: Bound,
        value: String,
        reason: String,
    },

    /// The lower bound is not strictly earlier than the upper bound.
    #[error("window bound `after` ({after}) must be earlier than `before` ({before})")]
    Order { after: String, before: String },
}
