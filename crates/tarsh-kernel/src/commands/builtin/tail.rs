//! tail — Read the last lines of a file.

use async_trait::async_trait;

use crate::commands::{Command, Reply};
use crate::error::CommandError;
use crate::session::Session;
use crate::vfs::Filesystem;

/// Default line count when none is given (or it fails to parse).
const DEFAULT_LINES: usize = 10;

/// Output the last `n` lines of the resolved file.
pub struct Tail;

#[async_trait]
impl Command for Tail {
    fn name(&self) -> &str {
        "tail"
    }

    async fn run(&self, argv: &[String], session: &mut Session) -> Result<Reply, CommandError> {
        let Some(path) = argv.first() else {
            return Err(CommandError::Usage("tail requires a file argument.".into()));
        };

        // A count that isn't a positive integer falls back to the default.
        let count = argv
            .get(1)
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_LINES);

        let resolved = session.resolve_path(path);
        let data = session
            .filesystem()
            .read(&resolved)
            .await
            .map_err(CommandError::for_file)?;
        let text = String::from_utf8(data).map_err(|_| CommandError::Decode)?;

        Ok(Reply::text(last_lines(&text, count)))
    }
}

/// The last `count` lines of `text`, terminators preserved.
///
/// Splitting inclusively keeps each line's `\n`, so the slice of
/// `"A\nB\nC\n"` with count 2 is exactly `"B\nC\n"`.
fn last_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].concat()
}
