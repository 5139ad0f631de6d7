//! Error types for duwalk
//!
//! This module defines the error hierarchy covering:
//! - Configuration and CLI errors
//! - Traversal errors (directory reads, metadata queries, report output)
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors should be actionable - include the path that failed
//! - Preserve error chains for debugging

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the duwalk application
#[derive(Error, Debug)]
pub enum DuError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Traversal errors
    #[error("Walk error: {0}")]
    Walk(#[from] WalkError),

    /// I/O errors (output flushing, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The top-level path does not exist
    #[error("path does not exist: '{}'", path.display())]
    PathNotFound { path: PathBuf },
}

/// Errors encountered while walking the tree
#[derive(Error, Debug)]
pub enum WalkError {
    /// Directory could not be opened or enumeration failed mid-listing
    #[error("failed to read directory '{}': {source}", path.display())]
    ReadDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Metadata query failed for an entry
    #[error("failed to stat '{}': {source}", path.display())]
    StatFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing a report line failed
    #[error("failed to write report line: {0}")]
    WriteFailed(#[from] std::io::Error),
}

impl WalkError {
    /// Check if this error is recoverable (log and skip the entry)
    ///
    /// Read and stat failures affect one entry or one directory listing;
    /// the rest of the tree can still be summed. A failed report write
    /// means stdout is gone and nothing further can be delivered.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WalkError::ReadDirFailed { .. } | WalkError::StatFailed { .. }
        )
    }
}

/// Result type alias for DuError
pub type Result<T> = std::result::Result<T, DuError>;

/// Result type alias for WalkError
pub type WalkResult<T> = std::result::Result<T, WalkError>;
