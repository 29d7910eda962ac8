//! Disk-backed filesystem rooted at an extraction directory.

use super::traits::{DirEntry, EntryKind, Filesystem, Metadata};
use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Filesystem over a real directory holding the extracted archive.
///
/// Created writable by the mounter, then sealed with [`seal`] before the
/// session sees it; from then on every write returns `PermissionDenied`.
///
/// [`seal`]: ExtractedFs::seal
#[derive(Debug, Clone)]
pub struct ExtractedFs {
    root: PathBuf,
    read_only: bool,
}

impl ExtractedFs {
    /// Create a writable filesystem rooted at the given directory.
    ///
    /// The directory must already exist.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            read_only: false,
        }
    }

    /// Mark the tree read-only. Done once, at the end of extraction.
    pub fn seal(&mut self) {
        self.read_only = true;
    }

    /// The extraction directory on the host filesystem.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a backend-relative path to a host path within the root.
    ///
    /// Purely lexical: `.` is dropped and `..` pops, erroring if a pop would
    /// climb above the root. The session resolver clamps `..` before paths
    /// get here, so hitting that error means a caller bypassed the resolver.
    fn host_path(&self, path: &Path) -> io::Result<PathBuf> {
        let path = path.strip_prefix("/").unwrap_or(path);

        let mut resolved = self.root.clone();
        for component in path.components() {
            match component {
                std::path::Component::ParentDir => {
                    if resolved == self.root {
                        return Err(io::Error::new(
                            io::ErrorKind::PermissionDenied,
                            "path escapes mount root",
                        ));
                    }
                    resolved.pop();
                }
                std::path::Component::Normal(c) => resolved.push(c),
                std::path::Component::CurDir => {}
                _ => {}
            }
        }
        Ok(resolved)
    }

    fn check_writable(&self) -> io::Result<()> {
        if self.read_only {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "filesystem is read-only",
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Filesystem for ExtractedFs {
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let host = self.host_path(path)?;
        fs::read(&host).await
    }

    async fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        self.check_writable()?;
        let host = self.host_path(path)?;
        if let Some(parent) = host.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&host, data).await
    }

    async fn list(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let host = self.host_path(path)?;
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&host).await?;

        while let Some(entry) = dir.next_entry().await? {
            let metadata = entry.metadata().await?;
            let kind = if metadata.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn stat(&self, path: &Path) -> io::Result<Metadata> {
        let host = self.host_path(path)?;
        let meta = fs::metadata(&host).await?;
        Ok(Metadata {
            is_dir: meta.is_dir(),
            is_file: meta.is_file(),
            size: meta.len(),
            modified: meta.modified().ok(),
        })
    }

    async fn mkdir(&self, path: &Path) -> io::Result<()> {
        self.check_writable()?;
        let host = self.host_path(path)?;
        fs::create_dir_all(&host).await
    }

    fn read_only(&self) -> bool {
        self.read_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_dir() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        env::temp_dir().join(format!("tarsh-test-{}-{}", std::process::id(), id))
    }

    async fn setup() -> (ExtractedFs, PathBuf) {
        let dir = temp_dir();
        let _ = fs::remove_dir_all(&dir).await;
        fs::create_dir_all(&dir).await.unwrap();
        (ExtractedFs::new(&dir), dir)
    }

    async fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir).await;
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let (fs, dir) = setup().await;

        fs.write(Path::new("test.txt"), b"hello").await.unwrap();
        let data = fs.read(Path::new("test.txt")).await.unwrap();
        assert_eq!(data, b"hello");

        cleanup(&dir).await;
    }

    #[tokio::test]
    async fn test_nested_write() {
        let (fs, dir) = setup().await;

        fs.write(Path::new("a/b/c.txt"), b"nested").await.unwrap();
        let data = fs.read(Path::new("/a/b/c.txt")).await.unwrap();
        assert_eq!(data, b"nested");

        cleanup(&dir).await;
    }

    #[tokio::test]
    async fn test_sealed_rejects_writes() {
        let (mut fs, dir) = setup().await;
        fs.write(Path::new("before.txt"), b"ok").await.unwrap();
        fs.seal();

        let result = fs.write(Path::new("after.txt"), b"no").await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);
        assert!(fs.read_only());

        cleanup(&dir).await;
    }

    #[tokio::test]
    async fn test_list_sorted() {
        let (fs, dir) = setup().await;

        fs.write(Path::new("b.txt"), b"b").await.unwrap();
        fs.write(Path::new("a.txt"), b"a").await.unwrap();
        fs.mkdir(Path::new("subdir")).await.unwrap();

        let entries = fs.list(Path::new("")).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "subdir"]);
        assert_eq!(entries[2].kind, EntryKind::Directory);

        cleanup(&dir).await;
    }

    #[tokio::test]
    async fn test_stat() {
        let (fs, dir) = setup().await;

        fs.write(Path::new("file.txt"), b"content").await.unwrap();
        fs.mkdir(Path::new("d")).await.unwrap();

        let meta = fs.stat(Path::new("file.txt")).await.unwrap();
        assert!(meta.is_file);
        assert_eq!(meta.size, 7);

        let meta = fs.stat(Path::new("d")).await.unwrap();
        assert!(meta.is_dir);

        cleanup(&dir).await;
    }

    #[tokio::test]
    async fn test_path_escape_blocked() {
        let (fs, dir) = setup().await;

        let result = fs.read(Path::new("../../../etc/passwd")).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::PermissionDenied);

        cleanup(&dir).await;
    }
}
