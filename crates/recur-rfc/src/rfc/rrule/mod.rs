//! RFC 5545 recurrence rules: parsing, expansion and rendering.

pub mod build;
pub mod core;
pub mod expand;
pub mod parse;
