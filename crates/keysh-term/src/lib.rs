//! Crossterm-backed terminal layer.
//!
//! Maps native terminal key events (including multi-byte escape sequences,
//! which crossterm decodes) to `keysh_types::Key`, and scopes raw mode so
//! it is restored on every exit path, interrupt unwinds included.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use keysh_core::KeyReader;
use keysh_types::{Key, KeyshError, Result};

/// Puts the terminal in raw mode for its lifetime.
///
/// Raw mode disables line buffering and local echo; the shell echoes
/// explicitly. Dropping the guard restores cooked mode.
pub struct RawModeGuard(());

impl RawModeGuard {
    /// Enable raw mode.
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()
            .map_err(|e| KeyshError::Terminal(format!("cannot enter raw mode: {e}")))?;
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("failed to restore cooked mode: {e}");
        }
    }
}

/// Blocking key reader over the controlling terminal.
#[derive(Default)]
pub struct TermKeyReader(());

impl TermKeyReader {
    pub fn new() -> Self {
        Self(())
    }
}

impl KeyReader for TermKeyReader {
    /// Block until a keypress decodes to a `Key`.
    ///
    /// Non-key events, key releases/repeats, and unrecognized chords are
    /// swallowed here; the shell only ever sees decoded presses.
    fn next_key(&mut self) -> Result<Key> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(decoded) = decode(key) {
                    return Ok(decoded);
                }
            }
        }
    }
}

/// Map one crossterm key press to a shell key.
fn decode(key: KeyEvent) -> Option<Key> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Key::Interrupt)
        },
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Key::Char(c))
        },
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn plain_char_decodes() {
        assert_eq!(
            decode(press(KeyCode::Char('h'), KeyModifiers::NONE)),
            Some(Key::Char('h'))
        );
    }

    #[test]
    fn shifted_char_decodes_as_char() {
        assert_eq!(
            decode(press(KeyCode::Char('H'), KeyModifiers::SHIFT)),
            Some(Key::Char('H'))
        );
    }

    #[test]
    fn ctrl_c_is_interrupt() {
        assert_eq!(
            decode(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Key::Interrupt)
        );
    }

    #[test]
    fn other_control_chords_are_swallowed() {
        assert_eq!(decode(press(KeyCode::Char('d'), KeyModifiers::CONTROL)), None);
        assert_eq!(decode(press(KeyCode::Esc, KeyModifiers::NONE)), None);
        assert_eq!(decode(press(KeyCode::F(1), KeyModifiers::NONE)), None);
    }

    #[test]
    fn navigation_keys_decode() {
        let cases = [
            (KeyCode::Enter, Key::Enter),
            (KeyCode::Backspace, Key::Backspace),
            (KeyCode::Delete, Key::Delete),
            (KeyCode::Tab, Key::Tab),
            (KeyCode::Up, Key::Up),
            (KeyCode::Down, Key::Down),
            (KeyCode::Left, Key::Left),
            (KeyCode::Right, Key::Right),
            (KeyCode::PageUp, Key::PageUp),
            (KeyCode::PageDown, Key::PageDown),
            (KeyCode::Home, Key::Home),
            (KeyCode::End, Key::End),
        ];
        for (code, expected) in cases {
            assert_eq!(decode(press(code, KeyModifiers::NONE)), Some(expected));
        }
    }
}
