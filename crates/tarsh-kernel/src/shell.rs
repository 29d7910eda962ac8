//! The command dispatcher: one raw line in, one reply and one audit record
//! out.

use tracing::debug;

use crate::commands::{CommandRegistry, Reply};
use crate::error::CommandError;
use crate::session::Session;

/// A live shell: the fixed command registry plus the session it operates on.
pub struct Shell {
    registry: CommandRegistry,
    session: Session,
}

impl Shell {
    /// Create a shell over a session, with the full builtin set.
    pub fn new(session: Session) -> Self {
        Self {
            registry: CommandRegistry::builtins(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Execute one raw command line.
    ///
    /// Blank input is a no-op and leaves no audit record. Everything else —
    /// success, handler failure, unrecognized verb — appends exactly one
    /// record and comes back as plain reply text; errors never propagate
    /// past this boundary.
    ///
    /// The record is appended before the handler runs so that `exit`'s
    /// flush includes the `exit` command itself.
    pub async fn execute(&mut self, raw: &str) -> Reply {
        let mut tokens = raw.split_whitespace().map(str::to_string);
        let Some(verb) = tokens.next() else {
            return Reply::none();
        };
        let argv: Vec<String> = tokens.collect();

        let actor = self.session.actor().to_string();
        self.session
            .audit_mut()
            .append(&actor, raw.trim(), &verb, &argv);

        let Some(command) = self.registry.get(&verb) else {
            debug!(verb, "unrecognized command");
            return Reply::text("Command not recognized.");
        };

        match command.run(&argv, &mut self.session).await {
            Ok(reply) => reply,
            Err(err) => Reply::text(render_error(err)),
        }
    }
}

/// Turn a handler error into transcript text, deterministically per variant.
fn render_error(err: CommandError) -> String {
    match err {
        CommandError::Usage(msg) => msg,
        e @ (CommandError::NoSuchDirectory | CommandError::NoSuchFile | CommandError::Decode) => {
            e.to_string()
        }
        CommandError::Io(e) => format!("An error occurred: {e}"),
    }
}
