//! tarsh-kernel: the core of tarsh.
//!
//! This crate provides:
//!
//! - **VFS**: a small filesystem abstraction with disk-backed and in-memory
//!   backends, rooted at the mounted archive
//! - **Mount**: tar archive extraction into a backend
//! - **Session**: per-session cursor (current directory) and path resolution
//!   that can never escape the mount root
//! - **Commands**: the fixed builtin set (`ls`, `cd`, `cat`, `tail`,
//!   `clear`, `exit`)
//! - **Shell**: the dispatcher that turns one raw line into one reply and
//!   one audit record
//! - **Audit**: the append-only command log, flushed to JSON on exit
//!
//! The front-end (see `tarsh-repl`) owns the event loop and the display;
//! the kernel only ever returns text plus a display effect.

pub mod audit;
pub mod commands;
pub mod error;
pub mod mount;
pub mod session;
pub mod shell;
pub mod vfs;

pub use audit::{ActionRecord, AuditLog};
pub use commands::{Effect, Reply};
pub use error::{CommandError, MountError};
pub use mount::Mount;
pub use session::Session;
pub use shell::Shell;
