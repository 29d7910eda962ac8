//! Builtin command implementations, one verb per file.

mod cat;
mod cd;
mod clear;
mod exit;
mod ls;
mod tail;

pub use cat::Cat;
pub use cd::Cd;
pub use clear::Clear;
pub use exit::Exit;
pub use ls::Ls;
pub use tail::Tail;
