//! Slash command registry.
//!
//! The [`SlashCommandRegistry`] is the single live table consulted by the
//! input loop: command name to [`CommandDefinition`]. Kits are merged into
//! it with [`install`](SlashCommandRegistry::install), taken out again with
//! [`remove`](SlashCommandRegistry::remove), and the whole table can be
//! swapped with [`replace_all`](SlashCommandRegistry::replace_all).
//!
//! `install` is last-write-wins on name collisions. `remove` only deletes
//! a name while it still routes to the handler being removed, so disabling
//! one kit never clobbers a command another kit has since taken over.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use kitbox_types::CommandDefinition;

/// Raw contents of a registry, as captured by [`SlashCommandRegistry::replace_all`].
pub type CommandTable = HashMap<String, CommandDefinition>;

/// Process-wide handle to the live registry.
///
/// The lock is synchronous so scoped injection can restore the table from
/// `Drop`. Never hold it across an `.await`.
pub type SharedCommands = Arc<RwLock<SlashCommandRegistry>>;

/// Create an empty shared registry.
pub fn shared_commands() -> SharedCommands {
    Arc::new(RwLock::new(SlashCommandRegistry::new()))
}

/// Live mapping from command name to definition.
#[derive(Debug, Default)]
pub struct SlashCommandRegistry {
    commands: CommandTable,
}

impl SlashCommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Insert each command in order; later entries overwrite earlier ones.
    pub fn install(&mut self, commands: &[CommandDefinition]) {
        for cmd in commands {
            self.commands.insert(cmd.name().to_string(), cmd.clone());
        }
    }

    /// Remove each command whose name still routes to the same handler.
    ///
    /// Returns the names actually removed.
    pub fn remove(&mut self, commands: &[CommandDefinition]) -> Vec<String> {
        let mut removed = Vec::new();
        for cmd in commands {
            let owned = self
                .commands
                .get(cmd.name())
                .is_some_and(|installed| installed.same_handler(cmd));
            if owned {
                self.commands.remove(cmd.name());
                removed.push(cmd.name().to_string());
            }
        }
        removed
    }

    /// Swap in a fresh table built from `commands`, returning the old one.
    pub fn replace_all<I>(&mut self, commands: I) -> CommandTable
    where
        I: IntoIterator<Item = CommandDefinition>,
    {
        let fresh = commands
            .into_iter()
            .map(|cmd| (cmd.name().to_string(), cmd))
            .collect();
        std::mem::replace(&mut self.commands, fresh)
    }

    /// Put back a table captured by [`replace_all`](Self::replace_all).
    ///
    /// Returns the table that was live until now.
    pub fn restore(&mut self, table: CommandTable) -> CommandTable {
        std::mem::replace(&mut self.commands, table)
    }

    /// Copy of the current table.
    pub fn snapshot(&self) -> CommandTable {
        self.commands.clone()
    }

    /// Parse a line of input and find its command.
    ///
    /// The input should start with `/`. The first word (after `/`) is the
    /// command name and the rest, trimmed, is the argument string. Returns
    /// `None` for non-slash input or unknown commands.
    pub fn resolve(&self, input: &str) -> Option<(CommandDefinition, String)> {
        let input = input.trim();
        let without_slash = input.strip_prefix('/')?;
        let (name, args) = match without_slash.split_once(char::is_whitespace) {
            Some((n, a)) => (n, a.trim()),
            None => (without_slash, ""),
        };

        let cmd = self.commands.get(name)?;
        Some((cmd.clone(), args.to_string()))
    }

    /// Check whether a command is registered.
    pub fn has(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Get a command by name.
    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    /// All registered command names (sorted).
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
