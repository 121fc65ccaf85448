//! Shell core for keysh.
//!
//! The shell is a registry-based dispatch system driven by raw keystrokes.
//! Commands implement the `Command` trait and are registered by name with a
//! minimal-match prefix length. The shell reads one key at a time, edits the
//! input line in place, navigates history, completes command names on
//! double-Tab, and dispatches finished lines through the registry.

mod builtins;
mod command;
mod editor;
mod history;
mod matcher;
mod registry;
mod shell;

/// Register the built-in commands (Quit, Exit, Help, Usage) into a registry.
pub use builtins::register_builtins;
/// A single executable command trait.
pub use command::Command;
/// Per-dispatch context handed to every command.
pub use command::Environment;
/// Result of one command execution.
pub use command::Status;
/// Line editor: input buffer, cursor, minimal-diff echo.
pub use editor::LineEditor;
/// Append-only history log with a draft slot.
pub use history::History;
/// Case-insensitive bounded prefix comparison.
pub use matcher::prefix_eq;
/// Registry of available commands with prefix resolution.
pub use registry::CommandRegistry;
/// Outcome of reading one line from the terminal.
pub use shell::LineEvent;
/// Blocking source of decoded keypresses.
pub use shell::KeyReader;
/// The shell: registry + editor + history + read-dispatch loop.
pub use shell::Shell;
