//! Session state: the cursor into the mounted tree.
//!
//! Paths inside the session are virtual absolute paths rooted at `/`, the
//! mount root. [`resolve`] is the only way a user-supplied path becomes a
//! session path, and its output is always `/` or a descendant: `..` above
//! the root clamps to the root rather than erroring, so the shell can never
//! leave a valid state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::audit::AuditLog;
use crate::vfs::Filesystem;

/// Per-session shell state.
///
/// Owned by the front-end, mutated only on the single command path: `cd`
/// moves the cursor, the dispatcher appends audit records.
pub struct Session {
    fs: Arc<dyn Filesystem>,
    cwd: PathBuf,
    actor: String,
    host: String,
    audit: AuditLog,
}

impl Session {
    /// Create a session rooted at a mounted filesystem, starting at `/`.
    pub fn new(
        fs: Arc<dyn Filesystem>,
        actor: impl Into<String>,
        host: impl Into<String>,
        audit: AuditLog,
    ) -> Self {
        Self {
            fs,
            cwd: PathBuf::from("/"),
            actor: actor.into(),
            host: host.into(),
            audit,
        }
    }

    pub fn filesystem(&self) -> &Arc<dyn Filesystem> {
        &self.fs
    }

    /// The current directory, always `/` or a descendant of it.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    pub fn audit_mut(&mut self) -> &mut AuditLog {
        &mut self.audit
    }

    /// Resolve user input against the current directory.
    pub fn resolve_path(&self, input: &str) -> PathBuf {
        resolve(&self.cwd, input)
    }

    /// Move the cursor. Callers must pass a path produced by
    /// [`Session::resolve_path`], which is what keeps the invariant.
    pub fn set_cwd(&mut self, path: PathBuf) {
        self.cwd = path;
    }
}

/// Resolve a user-supplied path against the current directory.
///
/// Absolute-looking input resolves from the mount root; relative input joins
/// onto `cwd`. The result is normalized lexically (`.` dropped, `..` pops,
/// clamped at `/`) and no existence check is performed — that's the caller's
/// job.
pub fn resolve(cwd: &Path, input: &str) -> PathBuf {
    let joined = if input.starts_with('/') {
        PathBuf::from(input)
    } else {
        cwd.join(input)
    };

    let mut result = PathBuf::from("/");
    for component in joined.components() {
        match component {
            std::path::Component::ParentDir => {
                // `pop` refuses to remove the root, so climbing above the
                // mount clamps to "/" instead of escaping.
                result.pop();
            }
            std::path::Component::Normal(c) => result.push(c),
            _ => {}
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", "docs", "/docs")]
    #[case("/docs", "notes.txt", "/docs/notes.txt")]
    #[case("/docs", "/etc", "/etc")]
    #[case("/docs", "..", "/")]
    #[case("/docs/a/b", "../../c", "/docs/c")]
    #[case("/", ".", "/")]
    #[case("/docs", "./sub/./x", "/docs/sub/x")]
    fn resolve_cases(#[case] cwd: &str, #[case] input: &str, #[case] expected: &str) {
        assert_eq!(resolve(Path::new(cwd), input), PathBuf::from(expected));
    }

    #[rstest]
    #[case("/", "..")]
    #[case("/", "../../..")]
    #[case("/a", "../../../../etc/passwd")]
    #[case("/", "/..")]
    #[case("/deep/nest", "../../../../../..")]
    #[case("/", "a/../../../b/../../c/../..")]
    fn escape_attempts_clamp_to_root_or_below(#[case] cwd: &str, #[case] input: &str) {
        let resolved = resolve(Path::new(cwd), input);
        assert!(
            resolved.starts_with("/"),
            "resolved {resolved:?} must stay under /"
        );
        // A pure climb ends exactly at the root.
        if !input.contains(|c: char| c.is_alphanumeric()) {
            assert_eq!(resolved, PathBuf::from("/"));
        }
    }

    #[test]
    fn clamped_climb_then_descend() {
        // Climbing above the root and then descending lands relative to "/".
        assert_eq!(
            resolve(Path::new("/"), "../../etc/passwd"),
            PathBuf::from("/etc/passwd")
        );
    }

    #[tokio::test]
    async fn session_starts_at_root() {
        use crate::vfs::MemoryFs;

        let session = Session::new(
            Arc::new(MemoryFs::new()),
            "tester",
            "localhost",
            AuditLog::new("audit.json"),
        );
        assert_eq!(session.cwd(), Path::new("/"));
        assert_eq!(session.actor(), "tester");
        assert_eq!(session.host(), "localhost");
    }
}
