//! Directory entry snapshots
//!
//! These types capture everything the walker needs to know about one
//! directory entry: its kind, allocated blocks, hard-link count and inode.
//! Metadata is always taken with `symlink_metadata` (lstat), so a symlink
//! is classified as a symlink even when it points at a directory or file.

use std::fs::{FileType, Metadata};
use std::os::unix::fs::{FileTypeExt, MetadataExt};
use std::path::PathBuf;

/// Kind of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Symbolic link
    Symlink,
    /// Block device
    BlockDevice,
    /// Character device
    CharDevice,
    /// Named pipe (FIFO)
    Fifo,
    /// Unix socket
    Socket,
    /// Unknown type
    Unknown,
}

impl EntryKind {
    /// Classify a `std::fs::FileType` taken without following symlinks
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_block_device() {
            EntryKind::BlockDevice
        } else if file_type.is_char_device() {
            EntryKind::CharDevice
        } else if file_type.is_fifo() {
            EntryKind::Fifo
        } else if file_type.is_socket() {
            EntryKind::Socket
        } else {
            EntryKind::Unknown
        }
    }

    /// Check if this is a regular file
    pub fn is_file(&self) -> bool {
        *self == EntryKind::File
    }

    /// Check if this is a directory
    pub fn is_dir(&self) -> bool {
        *self == EntryKind::Directory
    }

    /// Check if this is a symbolic link
    pub fn is_symlink(&self) -> bool {
        *self == EntryKind::Symlink
    }
}

/// Snapshot of one entry encountered during directory enumeration.
///
/// Constructed per iteration and consumed immediately; nothing here is
/// retained once the walker moves to the next sibling.
#[derive(Debug)]
pub struct EntrySnapshot {
    /// Full path (parent joined with the entry name)
    pub path: PathBuf,

    /// Entry kind, from lstat metadata
    pub kind: EntryKind,

    /// Allocated 512-byte blocks
    pub blocks: u64,

    /// Number of hard links
    pub nlink: u64,

    /// Inode number
    pub inode: u64,
}

impl EntrySnapshot {
    /// Build a snapshot from metadata taken with `symlink_metadata`
    pub fn from_metadata(path: PathBuf, meta: &Metadata) -> Self {
        Self {
            path,
            kind: EntryKind::from_file_type(meta.file_type()),
            blocks: meta.blocks(),
            nlink: meta.nlink(),
            inode: meta.ino(),
        }
    }

    /// Allocated size in 1024-byte units (512-byte blocks halved),
    /// the conventional du reporting unit.
    pub fn size(&self) -> u64 {
        self.blocks / 2
    }
}
