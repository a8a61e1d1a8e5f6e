//! Core type system and error handling for extcp
//!
//! This crate provides the types shared by every extcp crate:
//!
//! - **Error handling**: one error enum with kinds and severity levels
//! - **Validated values**: the normalized [`Extension`] and the [`PollInterval`]
//! - **Run types**: conflict choices, progress updates and the run summary
//!
//! # Features
//!
//! - `serde`: Enable serialization support
//!
//! # Examples
//!
//! ```rust
//! use extcp_types::{ConflictChoice, Extension, ProgressUpdate};
//!
//! let ext = Extension::parse("jpg").unwrap();
//! assert_eq!(ext.as_str(), ".jpg");
//! assert!(ext.matches("IMG_0001.JPG"));
//!
//! assert!(ConflictChoice::SkipAll.applies_to_all());
//! assert_eq!(ProgressUpdate::new(1, 2).percent, 50.0);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{Extension, PollInterval};
pub use error::{Error, ErrorKind, ErrorSeverity, Result};
pub use types::*;
