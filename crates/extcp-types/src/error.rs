//! Error types and handling for extcp
//!
//! Run-level errors (bad configuration, nothing to copy) stop a run before the
//! worker starts. File-level errors are captured per file and never abort a run.

use std::path::{Path, PathBuf};

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// A single file is affected, the run continues
    Low,
    /// The session needs another folder or extension before a run can start
    Medium,
    /// The configuration itself is invalid
    High,
    /// The run lost contact with its worker
    Critical,
}

/// Main error type for extcp operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        /// Error message from the I/O operation
        message: String,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found
        path: PathBuf,
    },

    /// Permission denied
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// Path to the file with permission issues
        path: PathBuf,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message describing the configuration issue
        message: String,
    },

    /// No source folder is configured
    #[error("Please select at least one source folder")]
    NoSourceFolders,

    /// No destination folder is configured
    #[error("Please select a destination folder")]
    NoDestination,

    /// The extension matched nothing in any source folder
    #[error("No files with extension {extension} were found")]
    NoMatchingFiles {
        /// Normalized extension that was searched for
        extension: String,
    },

    /// The worker and the interactive side lost contact
    #[error("Channel error: {message}")]
    Channel {
        /// Error message describing which side went away
        message: String,
    },
}

/// Result type alias for extcp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error kind for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// I/O related errors
    Io,
    /// Configuration errors, including missing folders
    Config,
    /// Nothing matched the extension
    NoMatch,
    /// Worker handoff errors
    Channel,
}

impl Error {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } | Self::FileNotFound { .. } | Self::PermissionDenied { .. } => {
                ErrorKind::Io
            }
            Self::Config { .. } | Self::NoSourceFolders | Self::NoDestination => ErrorKind::Config,
            Self::NoMatchingFiles { .. } => ErrorKind::NoMatch,
            Self::Channel { .. } => ErrorKind::Channel,
        }
    }

    /// Get the error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io { .. } | Self::FileNotFound { .. } | Self::PermissionDenied { .. } => {
                ErrorSeverity::Low
            }
            Self::NoSourceFolders | Self::NoDestination | Self::NoMatchingFiles { .. } => {
                ErrorSeverity::Medium
            }
            Self::Config { .. } => ErrorSeverity::High,
            Self::Channel { .. } => ErrorSeverity::Critical,
        }
    }

    /// Map an I/O error on `path` to the most specific variant
    pub fn from_io(error: &std::io::Error, path: &Path) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Io {
                message: format!("{}: {}", path.display(), error),
            },
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new channel error
    pub fn channel<S: Into<String>>(message: S) -> Self {
        Self::Channel {
            message: message.into(),
        }
    }
}
