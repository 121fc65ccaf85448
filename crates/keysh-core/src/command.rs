//! The `Command` trait and the context it executes in.

use std::io::Write;

use keysh_types::Result;

use crate::registry::CommandRegistry;

/// Result of one command execution, consumed by the outer loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Command finished; keep reading lines.
    Done,
    /// Terminate the shell cleanly.
    Quit,
    /// Command failed; a diagnostic was printed, keep reading lines.
    Error,
}

/// Shared context passed to every command execution.
pub struct Environment<'a> {
    /// The registry the command was dispatched from, for help/usage
    /// introspection.
    pub registry: &'a CommandRegistry,
    /// Where command output goes.
    pub out: &'a mut dyn Write,
}

/// A single executable command.
///
/// External features integrate with the shell by implementing this trait
/// and registering; the shell never inspects a command beyond it.
pub trait Command {
    /// The command name (what the user types, possibly abbreviated).
    fn name(&self) -> &str;

    /// Smallest prefix of `name` that must be typed for this command to be
    /// a dispatch candidate. Always at least 1.
    fn min_match(&self) -> usize;

    /// One-line description for `Help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "Usage <Command command>").
    fn usage(&self) -> &str;

    /// Split the raw argument string into arguments.
    fn parse_args(&self, raw: &str) -> Vec<String> {
        raw.split_whitespace().map(str::to_string).collect()
    }

    /// Execute the command with the given arguments and environment.
    fn execute(&self, args: &[String], env: &mut Environment<'_>) -> Result<Status>;

    /// Text to insert when Tab is pressed on this command's arguments.
    fn autofill(&self, _partial_args: &str) -> String {
        String::new()
    }
}
