//! extcp test suite
//!
//! End-to-end scenarios live in `tests/`; this crate only provides the
//! shared fixtures they use.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Unified test utilities
///
/// Folder fixtures, a scripted conflict prompt and a recording progress view.
pub mod test_utils;
