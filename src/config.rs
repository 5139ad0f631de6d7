//! Configuration types for duwalk
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Validated runtime configuration
//! - Top-level path normalization

use crate::error::ConfigError;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Summarize disk usage of a directory tree
#[derive(Parser, Debug, Clone)]
#[command(
    name = "duwalk",
    version,
    about = "Summarize disk usage of a directory tree",
    long_about = "Recursively sums allocated block counts for a directory tree,\n\
                  reporting sizes in 1024-byte units. Hard-linked files are\n\
                  counted once; symbolic links are never followed.",
    after_help = "EXAMPLES:\n    \
        duwalk /var/log\n    \
        duwalk -a /var/log\n    \
        duwalk /var/log --all"
)]
pub struct CliArgs {
    /// Path to summarize (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Write counts for all files, not just directories
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Verbose output (per-directory diagnostics)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct DuConfig {
    /// Path traversal starts from, trailing separators trimmed
    pub root: PathBuf,

    /// Path as shown on the final report line; re-appends one separator
    /// if any were trimmed from the argument
    pub display_path: String,

    /// Report every file, not just directories
    pub all_files: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl DuConfig {
    /// Create and validate configuration from CLI arguments.
    ///
    /// The existence probe follows links (a plain stat), so a path that is
    /// a live symlink is accepted while a missing target is rejected before
    /// any traversal begins.
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let raw = args.path.unwrap_or_else(|| ".".to_string());
        let (trimmed, had_separator) = trim_trailing_separators(&raw);

        let display_path = if had_separator {
            format!("{trimmed}/")
        } else {
            trimmed.to_string()
        };

        let root = PathBuf::from(trimmed);
        if fs::metadata(&root).is_err() {
            return Err(ConfigError::PathNotFound { path: root });
        }

        Ok(Self {
            root,
            display_path,
            all_files: args.all,
            verbose: args.verbose,
        })
    }
}

/// Trim excess trailing separators from a path argument.
///
/// Returns the trimmed slice and whether anything was trimmed. The first
/// byte is never trimmed, so "/" survives as the filesystem root.
pub fn trim_trailing_separators(path: &str) -> (&str, bool) {
    let bytes = path.as_bytes();
    let mut end = bytes.len();
    while end > 1 && bytes[end - 1] == b'/' {
        end -= 1;
    }
    (&path[..end], end < bytes.len())
}
