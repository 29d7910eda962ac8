//! The fixed command set and its plumbing.

pub mod builtin;
mod registry;
mod traits;

pub use registry::CommandRegistry;
pub use traits::{Command, Effect, Reply};
