//! Archive mounting: turn a tar file into a [`Filesystem`] root.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use tracing::debug;

use crate::error::MountError;
use crate::vfs::{ExtractedFs, Filesystem, MemoryFs};

/// A mounted archive: the filesystem root the session operates on.
///
/// For disk-backed mounts the extraction directory is owned here, so the
/// tree lives exactly as long as the mount (a fresh directory per mount, as
/// re-mounting must never see stale state).
pub struct Mount {
    fs: Arc<dyn Filesystem>,
    _workdir: Option<TempDir>,
}

impl Mount {
    /// Unpack the archive into an in-memory tree. No on-disk side effects.
    pub async fn in_memory(archive: &Path) -> Result<Self, MountError> {
        let fs = MemoryFs::new();
        extract_into(archive, &fs).await?;
        debug!(archive = %archive.display(), "mounted archive in memory");
        Ok(Self {
            fs: Arc::new(fs),
            _workdir: None,
        })
    }

    /// Extract the archive into a fresh temporary directory.
    ///
    /// The directory is removed when the `Mount` is dropped.
    pub async fn extracted(archive: &Path) -> Result<Self, MountError> {
        let workdir = tempfile::Builder::new()
            .prefix("tarsh-mount-")
            .tempdir()
            .map_err(MountError::ExtractionFailed)?;

        let mut fs = ExtractedFs::new(workdir.path());
        extract_into(archive, &fs).await?;
        fs.seal();
        debug!(
            archive = %archive.display(),
            root = %workdir.path().display(),
            "mounted archive on disk"
        );
        Ok(Self {
            fs: Arc::new(fs),
            _workdir: Some(workdir),
        })
    }

    /// Extract the archive into `dir`, wiping any previous contents first.
    ///
    /// This makes re-mounting over the same target safe; the caller owns the
    /// directory's lifetime.
    pub async fn extracted_at(archive: &Path, dir: &Path) -> Result<Self, MountError> {
        if tokio::fs::metadata(dir).await.is_ok() {
            tokio::fs::remove_dir_all(dir)
                .await
                .map_err(MountError::ExtractionFailed)?;
        }
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(MountError::ExtractionFailed)?;

        let mut fs = ExtractedFs::new(dir);
        extract_into(archive, &fs).await?;
        fs.seal();
        debug!(
            archive = %archive.display(),
            root = %dir.display(),
            "mounted archive on disk"
        );
        Ok(Self {
            fs: Arc::new(fs),
            _workdir: None,
        })
    }

    /// The filesystem rooted at the mounted archive.
    pub fn filesystem(&self) -> Arc<dyn Filesystem> {
        Arc::clone(&self.fs)
    }
}

/// Unpack every archive entry into the given backend.
///
/// Errors while walking the archive itself classify as `ArchiveInvalid`;
/// errors while writing extracted data classify as `ExtractionFailed`.
async fn extract_into(archive: &Path, fs: &dyn Filesystem) -> Result<(), MountError> {
    if !archive.exists() {
        return Err(MountError::ArchiveNotFound(archive.to_path_buf()));
    }

    let file = std::fs::File::open(archive).map_err(MountError::ExtractionFailed)?;
    let mut tar = tar::Archive::new(file);

    let entries = tar
        .entries()
        .map_err(|e| MountError::ArchiveInvalid(e.to_string()))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| MountError::ArchiveInvalid(e.to_string()))?;
        let path = entry
            .path()
            .map_err(|e| MountError::ArchiveInvalid(e.to_string()))?
            .into_owned();

        if entry.header().entry_type().is_dir() {
            fs.mkdir(&path).await.map_err(MountError::ExtractionFailed)?;
        } else if entry.header().entry_type().is_file() {
            let mut data = Vec::new();
            entry
                .read_to_end(&mut data)
                .map_err(|e| MountError::ArchiveInvalid(e.to_string()))?;
            fs.write(&path, &data)
                .await
                .map_err(MountError::ExtractionFailed)?;
        }
        // Other entry types (links, devices) are skipped; the shell has no
        // way to observe them.
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// Build a small tar archive on disk and return its path.
    fn fixture_archive(dir: &Path) -> std::path::PathBuf {
        let archive_path = dir.join("fixture.tar");
        let file = std::fs::File::create(&archive_path).unwrap();
        let mut builder = tar::Builder::new(file);

        let mut header = tar::Header::new_gnu();
        header.set_size(15);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, "file1.txt", &b"This is file1.\n"[..])
            .unwrap();

        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Directory);
        header.set_cksum();
        builder.append_data(&mut header, "dir1", &b""[..]).unwrap();

        let mut header = tar::Header::new_gnu();
        header.set_size(5);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, "dir1/inner.txt", &b"deep\n"[..])
            .unwrap();

        builder.into_inner().unwrap().flush().unwrap();
        archive_path
    }

    #[tokio::test]
    async fn test_in_memory_mount() {
        let dir = tempfile::tempdir().unwrap();
        let archive = fixture_archive(dir.path());

        let mount = Mount::in_memory(&archive).await.unwrap();
        let fs = mount.filesystem();

        let data = fs.read(Path::new("file1.txt")).await.unwrap();
        assert_eq!(data, b"This is file1.\n");
        assert!(fs.stat(Path::new("dir1")).await.unwrap().is_dir);
        let data = fs.read(Path::new("dir1/inner.txt")).await.unwrap();
        assert_eq!(data, b"deep\n");
    }

    #[tokio::test]
    async fn test_extracted_mount_is_sealed() {
        let dir = tempfile::tempdir().unwrap();
        let archive = fixture_archive(dir.path());

        let mount = Mount::extracted(&archive).await.unwrap();
        let fs = mount.filesystem();

        assert!(fs.read_only());
        let data = fs.read(Path::new("file1.txt")).await.unwrap();
        assert_eq!(data, b"This is file1.\n");
        assert!(fs.write(Path::new("new.txt"), b"no").await.is_err());
    }

    #[tokio::test]
    async fn test_extracted_at_remount_wipes_stale_state() {
        let dir = tempfile::tempdir().unwrap();
        let archive = fixture_archive(dir.path());
        let target = dir.path().join("vfs");

        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("stale.txt"), b"old").unwrap();

        let mount = Mount::extracted_at(&archive, &target).await.unwrap();
        let fs = mount.filesystem();

        assert!(!fs.exists(Path::new("stale.txt")).await);
        assert!(fs.exists(Path::new("file1.txt")).await);
    }

    #[tokio::test]
    async fn test_archive_not_found() {
        let result = Mount::in_memory(Path::new("/nonexistent/archive.tar")).await;
        assert!(matches!(result, Err(MountError::ArchiveNotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_archive() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.tar");
        std::fs::write(&bogus, b"this is not a tar archive, not even close").unwrap();

        let result = Mount::in_memory(&bogus).await;
        assert!(matches!(result, Err(MountError::ArchiveInvalid(_))));
    }
}
