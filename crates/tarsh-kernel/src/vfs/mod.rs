//! Filesystem backends for the mounted archive.
//!
//! The shell never touches the host filesystem directly; it goes through a
//! [`Filesystem`] backend rooted at the mount:
//!
//! - **ExtractedFs**: the archive extracted into a real directory, read-only
//!   once mounted
//! - **MemoryFs**: the archive unpacked into an in-memory tree (no on-disk
//!   side effects; also the test double)
//!
//! All paths handed to a backend are relative to its root; a leading `/` is
//! accepted and stripped. Containment is enforced twice: lexically by the
//! session resolver, and again by `ExtractedFs` before touching the disk.

mod extracted;
mod memory;
mod traits;

pub use extracted::ExtractedFs;
pub use memory::MemoryFs;
pub use traits::{DirEntry, EntryKind, Filesystem, Metadata};
