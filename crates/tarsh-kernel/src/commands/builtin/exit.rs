//! exit — Flush the audit log and end the session.

use async_trait::async_trait;
use tracing::warn;

use crate::commands::{Command, Effect, Reply};
use crate::error::CommandError;
use crate::session::Session;

/// Persist the audit log, then signal termination.
///
/// A flush failure is reported in the reply text but never blocks
/// termination, so this handler is infallible by construction.
pub struct Exit;

#[async_trait]
impl Command for Exit {
    fn name(&self) -> &str {
        "exit"
    }

    async fn run(&self, _argv: &[String], session: &mut Session) -> Result<Reply, CommandError> {
        let reply = match session.audit().flush().await {
            Ok(()) => Reply::none(),
            Err(e) => {
                warn!(error = %e, path = %session.audit().path().display(), "audit flush failed");
                Reply::text(format!("exit: failed to write audit log: {e}"))
            }
        };
        Ok(reply.with_effect(Effect::Terminate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditLog;
    use crate::vfs::MemoryFs;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_exit_flushes_and_terminates() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("audit.json");

        let mut session = Session::new(
            Arc::new(MemoryFs::new()),
            "testuser",
            "localhost",
            AuditLog::new(&log_path),
        );
        session.audit_mut().append("testuser", "ls", "ls", &[]);

        let reply = Exit.run(&[], &mut session).await.unwrap();
        assert_eq!(reply.effect, Effect::Terminate);
        assert_eq!(reply.text, "");

        let loaded = AuditLog::load(&log_path).await.unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[tokio::test]
    async fn test_exit_terminates_even_when_flush_fails() {
        // A log path inside a file cannot be created.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"file").unwrap();

        let mut session = Session::new(
            Arc::new(MemoryFs::new()),
            "testuser",
            "localhost",
            AuditLog::new(blocker.join("audit.json")),
        );

        let reply = Exit.run(&[], &mut session).await.unwrap();
        assert_eq!(reply.effect, Effect::Terminate);
        assert!(reply.text.contains("failed to write audit log"));
    }
}
