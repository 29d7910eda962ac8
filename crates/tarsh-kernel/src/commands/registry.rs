//! Verb → handler lookup, fixed at construction time.

use std::collections::HashMap;
use std::sync::Arc;

use super::builtin;
use super::traits::Command;

/// Registry of available commands.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full builtin set: `ls`, `cd`, `cat`, `tail`, `clear`, `exit`.
    pub fn builtins() -> Self {
        let mut registry = Self::new();
        registry.register(builtin::Ls);
        registry.register(builtin::Cd);
        registry.register(builtin::Cat);
        registry.register(builtin::Tail);
        registry.register(builtin::Clear);
        registry.register(builtin::Exit);
        registry
    }

    /// Register a command.
    pub fn register(&mut self, command: impl Command + 'static) {
        let name = command.name().to_string();
        self.commands.insert(name, Arc::new(command));
    }

    /// Look up a command by verb.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    /// Check if a verb is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// All registered verbs, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.commands.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}
