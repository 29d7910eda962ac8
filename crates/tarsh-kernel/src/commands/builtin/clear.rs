//! clear — Signal the front-end to wipe its display.

use async_trait::async_trait;

use crate::commands::{Command, Effect, Reply};
use crate::error::CommandError;
use crate::session::Session;

/// Acknowledge and ask the front-end to clear. Total: never fails.
pub struct Clear;

#[async_trait]
impl Command for Clear {
    fn name(&self) -> &str {
        "clear"
    }

    async fn run(&self, _argv: &[String], _session: &mut Session) -> Result<Reply, CommandError> {
        Ok(Reply::text("Console cleared.").with_effect(Effect::ClearScreen))
    }
}
