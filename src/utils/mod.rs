//! Utility modules used across the crate.
//!
//! - logging: tracing setup and the shared error context
//! - macros: serde helpers
//! - parsing: command-line value parsers
//! - tests: test builders and a scripted HTTP transport

pub mod logging;
pub mod macros;
pub mod parsing;
pub mod tests;

pub use parsing::*;
