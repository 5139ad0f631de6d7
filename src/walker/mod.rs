//! Recursive disk-usage walker
//!
//! This module implements a single-threaded depth-first traversal that sums
//! allocated block counts for a subtree, deduplicating hard-linked files by
//! inode so shared data is counted once.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                     Walker                        │
//! │  - walk_dir(): recursive descent, one dir at a   │
//! │    time, children summed bottom-up               │
//! │  - report lines written to an injected sink      │
//! └───────────────┬──────────────────────────────────┘
//!                 │ nlink > 1?
//!                 ▼
//! ┌──────────────────────────────────────────────────┐
//! │                  InodeLedger                      │
//! │  - one instance per top-level traversal          │
//! │  - threaded by &mut through the recursion        │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Directories are always reported; regular files only in all-files mode.
//! Symlinks, devices, fifos and sockets contribute nothing and are never
//! reported or descended into.

pub mod entry;
pub mod ledger;

pub use entry::{EntryKind, EntrySnapshot};
pub use ledger::InodeLedger;

use crate::error::{WalkError, WalkResult};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Counters accumulated over one traversal, for the end-of-run summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkStats {
    /// Directories descended into
    pub dirs: u64,
    /// Regular files counted
    pub files: u64,
    /// Hard links whose inode was already counted
    pub deduped: u64,
    /// Recoverable errors (unreadable directories, failed stats)
    pub errors: u64,
}

/// Depth-first disk-usage walker.
///
/// Owns the inode ledger for the duration of one top-level traversal and
/// writes `<size>\t<path>` report lines to the sink as entries are visited.
pub struct Walker<'a, W: Write> {
    all_files: bool,
    out: &'a mut W,
    ledger: InodeLedger,
    stats: WalkStats,
}

impl<'a, W: Write> Walker<'a, W> {
    /// Create a walker. `all_files` enables per-file report lines.
    pub fn new(all_files: bool, out: &'a mut W) -> Self {
        Self {
            all_files,
            out,
            ledger: InodeLedger::new(),
            stats: WalkStats::default(),
        }
    }

    /// Walk one top-level path and write its final report line.
    ///
    /// `display_path` is what the final line shows; it may differ from
    /// `path` by a re-appended trailing separator (see
    /// `config::trim_trailing_separators`). Returns the grand total in
    /// 1024-byte units.
    pub fn run(&mut self, path: &Path, display_path: &str) -> WalkResult<u64> {
        let meta = fs::symlink_metadata(path).map_err(|source| WalkError::StatFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let snap = EntrySnapshot::from_metadata(path.to_path_buf(), &meta);
        let total = match snap.kind {
            EntryKind::Directory => {
                self.stats.dirs += 1;
                self.walk_dir(path, snap.size())?
            }
            // A top-level regular file is sized directly; the dedup rule
            // still applies so `duwalk link-a` then `duwalk link-b` inside
            // one process would not double count.
            EntryKind::File => {
                self.stats.files += 1;
                self.deduped_size(&snap)
            }
            _ => 0,
        };

        writeln!(self.out, "{}\t{}", total, display_path)?;
        Ok(total)
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    /// Recursively sum one directory.
    ///
    /// `self_size` is the directory's own entry overhead, already taken
    /// from the parent's enumeration (or from the top-level stat), so the
    /// directory is never stat'ed twice.
    fn walk_dir(&mut self, path: &Path, self_size: u64) -> WalkResult<u64> {
        debug!(path = %path.display(), "descending");

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(source) => {
                // Unreadable directory: diagnose, contribute nothing to the
                // parent, keep walking the rest of the tree.
                let err = WalkError::ReadDirFailed {
                    path: path.to_path_buf(),
                    source,
                };
                warn!("{err}");
                self.stats.errors += 1;
                return Ok(0);
            }
        };

        // The directory's own entry is always summed, matching du's
        // handling of "." - an empty directory still has a size.
        let mut total = self_size;

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    // Enumeration failure mid-listing: diagnose and keep
                    // going with the remaining entries rather than
                    // truncating silently.
                    let err = WalkError::ReadDirFailed {
                        path: path.to_path_buf(),
                        source,
                    };
                    warn!("{err}");
                    self.stats.errors += 1;
                    continue;
                }
            };

            // read_dir never yields "." or "..", so upward cycles cannot
            // occur and the self entry is handled above.
            let child_path = entry.path();

            let meta = match fs::symlink_metadata(&child_path) {
                Ok(meta) => meta,
                Err(source) => {
                    let err = WalkError::StatFailed {
                        path: child_path,
                        source,
                    };
                    warn!("{err}");
                    self.stats.errors += 1;
                    continue;
                }
            };

            let snap = EntrySnapshot::from_metadata(child_path, &meta);
            match snap.kind {
                EntryKind::Directory => {
                    self.stats.dirs += 1;
                    let size = self.walk_dir(&snap.path, snap.size())?;
                    self.report(size, &snap.path)?;
                    total += size;
                }
                EntryKind::File => {
                    self.stats.files += 1;
                    let size = self.deduped_size(&snap);
                    if self.all_files {
                        self.report(size, &snap.path)?;
                    }
                    total += size;
                }
                // Symlinks are never followed or sized, even when they
                // point at directories. Devices, fifos and sockets are
                // skipped the same way.
                _ => {}
            }
        }

        Ok(total)
    }

    /// Size of a regular file with the hard-link rule applied.
    ///
    /// Files with a single link are counted in full without touching the
    /// ledger. Multiply-linked files count once per inode: first sighting
    /// records the inode and yields the full size, later sightings yield
    /// zero.
    fn deduped_size(&mut self, snap: &EntrySnapshot) -> u64 {
        if snap.nlink > 1 {
            if self.ledger.contains(snap.inode) {
                debug!(path = %snap.path.display(), inode = snap.inode, "inode already counted");
                self.stats.deduped += 1;
                return 0;
            }
            self.ledger.insert(snap.inode);
        }
        snap.size()
    }

    fn report(&mut self, size: u64, path: &Path) -> WalkResult<()> {
        writeln!(self.out, "{}\t{}", size, path.display())?;
        Ok(())
    }
}
