//! Ordered, name-indexed command storage.

use std::collections::HashMap;

use log::debug;

use super::Command;
use crate::error::ShellError;

/// Registry of shell commands.
///
/// Keeps commands in registration order (used for the `h` listing) next to a
/// name index for O(1) lookup. Every listed command is indexed and every index
/// entry points at a listed command.
///
/// Registering a name twice replaces the earlier command in place: the lookup
/// resolves to the new command and the listing shows it once, at the position
/// of the first registration.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command.
    ///
    /// Returns `Err(ShellError::InvalidCommandName)` for an empty or whitespace-only
    /// name, which could never be typed at the prompt.
    pub fn add(&mut self, command: Command) -> Result<(), ShellError> {
        if command.name().trim().is_empty() {
            return Err(ShellError::InvalidCommandName);
        }
        self.insert(command);
        Ok(())
    }

    /// Register a command whose name is known to be valid.
    pub(crate) fn insert(&mut self, command: Command) {
        let name = command.name();
        match self.index.get(name) {
            Some(&position) => {
                debug!("replacing command '{}'", name);
                self.commands[position] = command;
            }
            None => {
                debug!("registering command '{}'", name);
                self.index.insert(name.to_string(), self.commands.len());
                self.commands.push(command);
            }
        }
    }

    /// Find a command by name.
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.index.get(name).map(|&position| &self.commands[position])
    }

    /// Check if a command is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All commands in registration order.
    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// All command names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(Command::name)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if no command is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
