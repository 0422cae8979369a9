//! Integration test support.
//!
//! Re-exports the workspace crates under short names and provides a reference
//! expansion backed by the `rrule` crate for differential tests.

pub mod oracle;

pub use recur_core as config;
pub use recur_rfc as rfc;
pub use recur_service as service;
