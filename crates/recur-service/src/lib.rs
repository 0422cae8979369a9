//! Request orchestration: raw rule and bound strings in, rendered occurrences out.

pub mod error;
pub mod occurrence;
