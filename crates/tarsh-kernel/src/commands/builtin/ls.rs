//! ls — List directory contents.

use async_trait::async_trait;

use crate::commands::{Command, Reply};
use crate::error::CommandError;
use crate::session::Session;
use crate::vfs::Filesystem;

/// List the entries of the resolved directory, defaulting to the cwd.
pub struct Ls;

#[async_trait]
impl Command for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    async fn run(&self, argv: &[String], session: &mut Session) -> Result<Reply, CommandError> {
        let path = argv.first().map(String::as_str).unwrap_or(".");
        let resolved = session.resolve_path(path);

        let entries = session
            .filesystem()
            .list(&resolved)
            .await
            .map_err(CommandError::for_directory)?;

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        Ok(Reply::text(names.join("\n")))
    }
}
