//! Error types for the tarsh kernel.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while mounting an archive.
///
/// All of these are fatal to the mount attempt and none of them are fatal to
/// the process: the front-end reports the error and keeps its prior state.
#[derive(Debug, Error)]
pub enum MountError {
    /// The archive path does not exist.
    #[error("archive not found: {0}")]
    ArchiveNotFound(PathBuf),

    /// The file exists but is not a well-formed tar archive.
    #[error("invalid archive: {0}")]
    ArchiveInvalid(String),

    /// I/O failure while writing extracted entries.
    #[error("extraction failed: {0}")]
    ExtractionFailed(#[source] io::Error),
}

/// Errors raised by command handlers.
///
/// Each variant maps to exactly one user-visible message; the dispatcher
/// renders them in [`crate::shell`] and nothing below the front-end ever
/// panics or propagates an error upward.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command was invoked without a required argument.
    #[error("{0}")]
    Usage(String),

    /// The target directory does not exist (or is not a directory).
    #[error("No such directory")]
    NoSuchDirectory,

    /// The target file does not exist.
    #[error("No such file")]
    NoSuchFile,

    /// The file exists but is not valid UTF-8 text.
    #[error("Error decoding file: ensure it is in UTF-8 format.")]
    Decode,

    /// Unexpected I/O failure; rendered as a generic message.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CommandError {
    /// Classify an I/O error from a directory operation.
    ///
    /// Missing targets and non-directories collapse into the same
    /// user-visible "No such directory"; anything else stays an I/O error.
    pub fn for_directory(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => Self::NoSuchDirectory,
            _ => Self::Io(err),
        }
    }

    /// Classify an I/O error from a file read.
    pub fn for_file(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NoSuchFile,
            _ => Self::Io(err),
        }
    }
}
