//! The append-only command audit log.
//!
//! Every dispatched command becomes one [`ActionRecord`], held in memory in
//! execution order. `append` never fails and never blocks the shell; the
//! sequence is persisted as a single JSON document on `flush`, which `exit`
//! calls (and the front-end calls again, best-effort, on EOF). Re-flushing
//! overwrites the previous file with the full current sequence.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One executed command, success or failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Position in the session, starting at 1.
    pub seq: u64,
    /// The session actor the command ran as.
    pub actor: String,
    /// The literal command line as typed.
    pub cmd: String,
    /// First whitespace token of `cmd`.
    pub verb: String,
    /// Remaining tokens.
    pub argv: Vec<String>,
    /// When the command was dispatched.
    pub at: DateTime<Utc>,
}

/// On-disk shape: one root element holding the ordered action records.
#[derive(Debug, Serialize, Deserialize)]
struct AuditFile {
    actions: Vec<ActionRecord>,
}

/// In-memory audit log bound to its persistence path.
#[derive(Debug)]
pub struct AuditLog {
    path: PathBuf,
    actions: Vec<ActionRecord>,
}

impl AuditLog {
    /// Create an empty log that will flush to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            actions: Vec::new(),
        }
    }

    /// Append one record. In-memory only; cannot fail.
    pub fn append(&mut self, actor: &str, cmd: &str, verb: &str, argv: &[String]) {
        self.actions.push(ActionRecord {
            seq: self.actions.len() as u64 + 1,
            actor: actor.to_string(),
            cmd: cmd.to_string(),
            verb: verb.to_string(),
            argv: argv.to_vec(),
            at: Utc::now(),
        });
    }

    /// The records appended so far, in execution order.
    pub fn records(&self) -> &[ActionRecord] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Where `flush` writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the full sequence to the log path.
    ///
    /// Written to a sibling temp file and renamed into place, so a crash
    /// mid-flush never leaves a truncated log. Idempotent: each call
    /// replaces the file with the current full sequence.
    pub async fn flush(&self) -> io::Result<()> {
        let file = AuditFile {
            actions: self.actions.clone(),
        };
        let json = serde_json::to_vec_pretty(&file)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), records = self.actions.len(), "flushed audit log");
        Ok(())
    }

    /// Read a flushed log back, in order. For inspection and tests.
    pub async fn load(path: &Path) -> io::Result<Vec<ActionRecord>> {
        let data = tokio::fs::read(path).await?;
        let file: AuditFile = serde_json::from_slice(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(file.actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log(path: &Path) -> AuditLog {
        let mut log = AuditLog::new(path);
        log.append("amy", "ls /docs", "ls", &["/docs".into()]);
        log.append("amy", "cd docs", "cd", &["docs".into()]);
        log.append("amy", "badcmd", "badcmd", &[]);
        log
    }

    #[test]
    fn append_is_ordered_and_sequenced() {
        let log = sample_log(Path::new("unused.json"));
        assert_eq!(log.len(), 3);
        let seqs: Vec<_> = log.records().iter().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        assert_eq!(log.records()[0].verb, "ls");
        assert_eq!(log.records()[2].cmd, "badcmd");
    }

    #[tokio::test]
    async fn flush_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.json");
        let log = sample_log(&path);

        log.flush().await.unwrap();
        let loaded = AuditLog::load(&path).await.unwrap();

        assert_eq!(loaded.len(), 3);
        let pairs: Vec<_> = loaded.iter().map(|r| (r.actor.clone(), r.cmd.clone())).collect();
        let original: Vec<_> = log
            .records()
            .iter()
            .map(|r| (r.actor.clone(), r.cmd.clone()))
            .collect();
        assert_eq!(pairs, original);
    }

    #[tokio::test]
    async fn reflush_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.json");
        let mut log = sample_log(&path);

        log.flush().await.unwrap();
        log.append("amy", "clear", "clear", &[]);
        log.flush().await.unwrap();

        let loaded = AuditLog::load(&path).await.unwrap();
        assert_eq!(loaded.len(), 4);
        assert_eq!(loaded[3].verb, "clear");
    }

    #[tokio::test]
    async fn flush_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/nested/audit.json");
        let log = sample_log(&path);

        log.flush().await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn every_record_bears_the_actor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.json");
        let log = sample_log(&path);
        log.flush().await.unwrap();

        for record in AuditLog::load(&path).await.unwrap() {
            assert_eq!(record.actor, "amy");
        }
    }
}
