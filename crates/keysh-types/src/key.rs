//! Terminal key events.
//!
//! The terminal backend maps raw keyboard input (including multi-byte
//! escape sequences) to this enum. The shell core never sees raw bytes.

use serde::{Deserialize, Serialize};

/// A single decoded keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Submit the current line.
    Enter,
    /// Delete the character left of the cursor.
    Backspace,
    /// Delete the character under the cursor.
    Delete,
    /// Completion request.
    Tab,
    /// Ctrl-C. The sole cancellation mechanism.
    Interrupt,
    /// History: previous entry.
    Up,
    /// History: next entry.
    Down,
    /// Cursor left.
    Left,
    /// Cursor right.
    Right,
    /// History: jump several entries back.
    PageUp,
    /// History: jump several entries forward.
    PageDown,
    /// Cursor to start of line.
    Home,
    /// Cursor to end of line.
    End,
}

impl Key {
    /// Whether this key participates in tab completion. Any other key
    /// resets the consecutive-tab counter.
    pub fn is_tab(self) -> bool {
        self == Key::Tab
    }
}
