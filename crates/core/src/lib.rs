//! unannotated-core
//!
//! Core library that finds public methods on test classes which carry none of
//! the annotations the test framework recognizes (methods that would be
//! silently skipped).
//!
//! This crate defines the metadata model, the rule sets, the method
//! classifier, and the listener adapter that routes findings to a reporter.
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! multiple frontends (CLI, test-runner integrations, etc.).

pub mod analysis;
pub mod config;
pub mod model;
pub mod rules;
pub mod services;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
