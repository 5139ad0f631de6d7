//! duwalk - Recursive Disk-Usage Reporter
//!
//! Mirrors the core behavior of the classic `du` utility: walk a directory
//! tree depth-first, sum allocated block counts, and report one
//! `<size>\t<path>` line per directory (per file too, with `-a`).
//!
//! # Features
//!
//! - **Hard-link deduplication**: multiply-linked files are counted once
//!   per inode, tracked in a ledger that spans the whole traversal.
//!
//! - **Symlink safe**: metadata is taken without following links, so a
//!   symlink never masquerades as a directory or file and link targets
//!   are never double counted.
//!
//! - **Partial results over silent truncation**: unreadable directories
//!   and failed stats are diagnosed on stderr and skipped; the rest of
//!   the tree is still summed.
//!
//! # Example
//!
//! ```bash
//! # Per-directory totals
//! duwalk /var/log
//!
//! # Every file too, flag and path in either order
//! duwalk -a /var/log
//! duwalk /var/log --all
//! ```

pub mod config;
pub mod error;
pub mod walker;

pub use config::{CliArgs, DuConfig};
pub use error::{ConfigError, DuError, Result, WalkError};
pub use walker::{InodeLedger, WalkStats, Walker};
