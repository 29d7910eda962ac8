//! In-memory filesystem backend.
//!
//! The side-effect-free mount target: the archive is unpacked into a
//! path-keyed map and nothing touches the host disk. Also used as the test
//! double throughout the kernel.

use super::traits::{DirEntry, EntryKind, Filesystem, Metadata};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
enum Node {
    File { data: Vec<u8>, modified: SystemTime },
    Directory { modified: SystemTime },
}

/// In-memory filesystem. All data is lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: RwLock<HashMap<PathBuf, Node>>,
}

impl MemoryFs {
    /// Create a new empty in-memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a path: strip the leading `/`, resolve `.` and `..`.
    ///
    /// The empty path is the root, which always exists.
    fn normalize(path: &Path) -> PathBuf {
        let mut result = PathBuf::new();
        for component in path.components() {
            match component {
                std::path::Component::ParentDir => {
                    result.pop();
                }
                std::path::Component::Normal(s) => result.push(s),
                _ => {}
            }
        }
        result
    }

    /// Ensure all parent directories of `path` exist.
    async fn ensure_parents(&self, path: &Path) {
        let mut nodes = self.nodes.write().await;
        let mut current = PathBuf::new();
        for component in path.parent().into_iter().flat_map(|p| p.components()) {
            if let std::path::Component::Normal(s) = component {
                current.push(s);
                nodes.entry(current.clone()).or_insert(Node::Directory {
                    modified: SystemTime::now(),
                });
            }
        }
    }
}

#[async_trait]
impl Filesystem for MemoryFs {
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let normalized = Self::normalize(path);
        let nodes = self.nodes.read().await;

        match nodes.get(&normalized) {
            Some(Node::File { data, .. }) => Ok(data.clone()),
            Some(Node::Directory { .. }) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {}", path.display()),
            )),
            None if normalized.as_os_str().is_empty() => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                "is a directory: /",
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not found: {}", path.display()),
            )),
        }
    }

    async fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let normalized = Self::normalize(path);
        self.ensure_parents(&normalized).await;

        let mut nodes = self.nodes.write().await;
        if let Some(Node::Directory { .. }) = nodes.get(&normalized) {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {}", path.display()),
            ));
        }

        nodes.insert(
            normalized,
            Node::File {
                data: data.to_vec(),
                modified: SystemTime::now(),
            },
        );
        Ok(())
    }

    async fn list(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let normalized = Self::normalize(path);
        let nodes = self.nodes.read().await;

        match nodes.get(&normalized) {
            Some(Node::Directory { .. }) => {}
            Some(Node::File { .. }) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {}", path.display()),
                ));
            }
            None if normalized.as_os_str().is_empty() => {
                // Root directory always exists.
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("not found: {}", path.display()),
                ));
            }
        }

        let mut result = Vec::new();
        for (node_path, node) in nodes.iter() {
            if node_path.parent() == Some(normalized.as_path())
                && node_path != &normalized
                && let Some(name) = node_path.file_name()
            {
                let kind = match node {
                    Node::File { .. } => EntryKind::File,
                    Node::Directory { .. } => EntryKind::Directory,
                };
                result.push(DirEntry {
                    name: name.to_string_lossy().into_owned(),
                    kind,
                });
            }
        }

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn stat(&self, path: &Path) -> io::Result<Metadata> {
        let normalized = Self::normalize(path);
        let nodes = self.nodes.read().await;

        if normalized.as_os_str().is_empty() {
            return Ok(Metadata {
                is_dir: true,
                is_file: false,
                size: 0,
                modified: None,
            });
        }

        match nodes.get(&normalized) {
            Some(Node::File { data, modified }) => Ok(Metadata {
                is_dir: false,
                is_file: true,
                size: data.len() as u64,
                modified: Some(*modified),
            }),
            Some(Node::Directory { modified }) => Ok(Metadata {
                is_dir: true,
                is_file: false,
                size: 0,
                modified: Some(*modified),
            }),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not found: {}", path.display()),
            )),
        }
    }

    async fn mkdir(&self, path: &Path) -> io::Result<()> {
        let normalized = Self::normalize(path);
        self.ensure_parents(&normalized).await;

        let mut nodes = self.nodes.write().await;
        if let Some(existing) = nodes.get(&normalized) {
            return match existing {
                Node::Directory { .. } => Ok(()),
                Node::File { .. } => Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("file exists: {}", path.display()),
                )),
            };
        }

        nodes.insert(
            normalized,
            Node::Directory {
                modified: SystemTime::now(),
            },
        );
        Ok(())
    }

    fn read_only(&self) -> bool {
        false
    }
}
