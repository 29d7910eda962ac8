//! Core VFS trait and types.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Kind of directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A directory listing entry, derived transiently per `ls` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name of the entry (not full path).
    pub name: String,
    /// Kind of entry.
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }
}

/// Metadata for a file or directory.
#[derive(Debug, Clone, Copy)]
pub struct Metadata {
    pub is_dir: bool,
    pub is_file: bool,
    /// Size in bytes (0 for directories).
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Abstract filesystem interface over a mounted archive.
///
/// All operations use paths relative to the backend root. For example, if an
/// `ExtractedFs` is rooted at `/tmp/tarsh-mount-x`, then `read("etc/motd")`
/// reads `/tmp/tarsh-mount-x/etc/motd`.
///
/// Write operations exist only so the mounter can populate a backend; once
/// mounted the shell sees a read-only tree (`read_only()` returns true for
/// `ExtractedFs` after extraction).
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Read the entire contents of a file.
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write data to a file, creating parent directories as needed.
    ///
    /// Returns `Err` if the backend is read-only.
    async fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    /// List entries in a directory, sorted by name.
    async fn list(&self, path: &Path) -> io::Result<Vec<DirEntry>>;

    /// Get metadata for a file or directory.
    async fn stat(&self, path: &Path) -> io::Result<Metadata>;

    /// Create a directory (and parent directories if needed).
    ///
    /// Returns `Err` if the backend is read-only.
    async fn mkdir(&self, path: &Path) -> io::Result<()>;

    /// Returns true if this backend rejects writes.
    fn read_only(&self) -> bool;

    /// Check if a path exists.
    async fn exists(&self, path: &Path) -> bool {
        self.stat(path).await.is_ok()
    }
}
