//! cd — Move the session cursor.

use async_trait::async_trait;
use std::sync::Arc;

use crate::commands::{Command, Reply};
use crate::error::CommandError;
use crate::session::Session;
use crate::vfs::Filesystem;

/// Change the current directory after verifying the target exists.
pub struct Cd;

#[async_trait]
impl Command for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    async fn run(&self, argv: &[String], session: &mut Session) -> Result<Reply, CommandError> {
        let Some(path) = argv.first() else {
            return Err(CommandError::Usage(
                "cd requires a directory argument.".into(),
            ));
        };

        let resolved = session.resolve_path(path);
        let fs = Arc::clone(session.filesystem());

        let meta = fs
            .stat(&resolved)
            .await
            .map_err(CommandError::for_directory)?;
        if !meta.is_dir {
            return Err(CommandError::NoSuchDirectory);
        }

        let reply = Reply::text(format!("Changed directory to: {}", resolved.display()));
        session.set_cwd(resolved);
        Ok(reply)
    }
}
