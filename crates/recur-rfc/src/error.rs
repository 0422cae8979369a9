use thiserror::Error;

use crate::rfc::rrule::expand::ExpansionError;
use crate::rfc::rrule::parse::{BoundError, RuleError};

/// Recurrence parsing and expansion errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RfcError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Bound(#[from] BoundError),

    #[error(transparent)]
    Expansion(#[from] ExpansionError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
