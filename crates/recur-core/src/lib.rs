//! Shared configuration, constants and error types for the recur workspace.

pub mod config;
pub mod constants;
pub mod error;
