//! Recurrence rule parsing and occurrence expansion (RFC 5545 §3.3.10).
//!
//! The crate turns a textual recurrence rule plus a half-open window into the
//! finite, ordered list of occurrences the rule produces inside that window.

pub mod error;
pub mod rfc;
