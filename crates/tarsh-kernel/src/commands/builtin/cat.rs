//! cat — Read a file as UTF-8 text.

use async_trait::async_trait;

use crate::commands::{Command, Reply};
use crate::error::CommandError;
use crate::session::Session;
use crate::vfs::Filesystem;

/// Output the full contents of the resolved file.
pub struct Cat;

#[async_trait]
impl Command for Cat {
    fn name(&self) -> &str {
        "cat"
    }

    async fn run(&self, argv: &[String], session: &mut Session) -> Result<Reply, CommandError> {
        let Some(path) = argv.first() else {
            return Err(CommandError::Usage("cat requires a file argument.".into()));
        };

        let resolved = session.resolve_path(path);
        let data = session
            .filesystem()
            .read(&resolved)
            .await
            .map_err(CommandError::for_file)?;

        let text = String::from_utf8(data).map_err(|_| CommandError::Decode)?;
        Ok(Reply::text(text))
    }
}
