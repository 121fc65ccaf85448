//! Command registry with prefix-based resolution.
//!
//! Resolution during dispatch is deliberately lenient: the first command in
//! registration order whose name shares the typed prefix wins, with no
//! ambiguity check. Completion-time matching (`unique_match`) is strict.
//! The asymmetry is intentional: direct execution stays cheap and
//! predictable, completion-assist refuses to guess.

use keysh_types::{KeyshError, Result};

use crate::command::Command;
use crate::matcher::prefix_eq;

/// Registry of available commands, kept in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command.
    ///
    /// Fails if the command's minimal prefix already resolves to a
    /// registered command, or if `min_match` is out of range for the name.
    /// Callers treat a failure here as fatal at startup.
    pub fn register(&mut self, cmd: Box<dyn Command>) -> Result<()> {
        let name = cmd.name().to_string();
        let name_len = name.chars().count();
        let min = cmd.min_match();
        if name.is_empty() || min == 0 || min > name_len {
            return Err(KeyshError::Registration(format!(
                "command '{name}' has invalid minimal match length {min}"
            )));
        }
        let prefix: String = name.chars().take(min).collect();
        if let Some(existing) = self.resolve(&prefix) {
            return Err(KeyshError::Registration(format!(
                "command '{name}' collides with '{}' on prefix '{prefix}'",
                existing.name()
            )));
        }
        log::debug!("registered command '{name}' (min match {min})");
        self.commands.push(cmd);
        Ok(())
    }

    /// Resolve a typed keyword to a command, first match wins.
    ///
    /// A command is a candidate iff the keyword is at least `min_match`
    /// characters, no longer than the name, and shares its prefix.
    pub fn resolve(&self, typed: &str) -> Option<&dyn Command> {
        let n = typed.chars().count();
        self.commands
            .iter()
            .find(|c| {
                n >= c.min_match()
                    && n <= c.name().chars().count()
                    && prefix_eq(typed, c.name(), n)
            })
            .map(|c| c.as_ref())
    }

    /// Whether exactly one registered name shares the typed prefix.
    ///
    /// Unlike `resolve`, the minimal-match length is not consulted here:
    /// completion works from the very first character.
    pub fn unique_match(&self, keyword: &str) -> bool {
        let n = keyword.chars().count();
        let mut found = false;
        for c in &self.commands {
            if n > c.name().chars().count() {
                continue;
            }
            if prefix_eq(keyword, c.name(), n) {
                if found {
                    return false;
                }
                found = true;
            }
        }
        found
    }

    /// All registered names sharing the typed prefix, in registration order.
    pub fn matching_names(&self, keyword: &str) -> Vec<&str> {
        let n = keyword.chars().count();
        self.commands
            .iter()
            .filter(|c| n <= c.name().chars().count() && prefix_eq(keyword, c.name(), n))
            .map(|c| c.name())
            .collect()
    }

    /// The text to insert to complete `keyword` to the first matching name:
    /// the name's remainder plus one trailing space.
    pub fn completion(&self, keyword: &str) -> Option<String> {
        let n = keyword.chars().count();
        self.matching_names(keyword).first().map(|name| {
            let mut fill: String = name.chars().skip(n).collect();
            fill.push(' ');
            fill
        })
    }

    /// Iterate registered commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.iter().map(|c| c.as_ref())
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
