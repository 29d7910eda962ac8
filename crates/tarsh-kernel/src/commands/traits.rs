//! The command trait and its reply type.

use async_trait::async_trait;

use crate::error::CommandError;
use crate::session::Session;

/// What the front-end should do after rendering a reply's text.
///
/// The kernel never touches the display; `clear` and `exit` communicate
/// through these instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Effect {
    #[default]
    None,
    /// Wipe the display, then show the reply text.
    ClearScreen,
    /// End the session after showing the reply text.
    Terminate,
}

/// One command's text result plus its display effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub effect: Effect,
}

impl Reply {
    /// Plain text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            effect: Effect::None,
        }
    }

    /// Empty no-op reply (blank input).
    pub fn none() -> Self {
        Self::text("")
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }
}

/// A shell builtin.
///
/// Handlers return `Err` for every user-visible failure; the dispatcher owns
/// turning errors into transcript text, so a handler never formats failure
/// messages itself (aside from usage strings).
#[async_trait]
pub trait Command: Send + Sync {
    /// The verb that selects this handler.
    fn name(&self) -> &str;

    /// Execute with the already-tokenized arguments.
    async fn run(&self, argv: &[String], session: &mut Session) -> Result<Reply, CommandError>;
}
