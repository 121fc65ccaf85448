//! Line editor: input buffer, cursor, and minimal-diff terminal echo.
//!
//! The terminal is assumed to sit exactly at the editor's cursor position
//! between calls. Movement re-emits buffer characters to go forward and
//! backspace characters to go backward; a full repaint happens only after
//! an ambiguous-completion listing. Wide characters are not column-tracked.

use std::io::Write;

use keysh_types::Result;

const BS: &[u8] = b"\x08";

/// The in-progress input line.
///
/// Invariant: `0 <= cursor <= buffer.len()` at all times.
#[derive(Default)]
pub struct LineEditor {
    buffer: Vec<char>,
    cursor: usize,
}

impl LineEditor {
    /// Create an empty editor.
    pub fn new() -> Self {
        Self::default()
    }

    /// The buffer contents.
    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    /// Current cursor index, in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Forget the buffer without touching the screen. Used when starting a
    /// fresh prompt line.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Insert text at the cursor, advancing the cursor past it.
    ///
    /// Echoes the inserted text plus the shifted tail, then walks the
    /// terminal cursor back over the tail.
    pub fn insert(&mut self, text: &str, out: &mut dyn Write) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let at = self.cursor;
        for (i, c) in text.chars().enumerate() {
            self.buffer.insert(at + i, c);
        }
        let target = at + text.chars().count();
        let tail: String = self.buffer[at..].iter().collect();
        out.write_all(tail.as_bytes())?;
        self.cursor = self.buffer.len();
        self.move_to(target, out)?;
        out.flush()?;
        Ok(())
    }

    /// Remove the character left of the cursor. No-op at the start.
    pub fn delete_backward(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.cursor == 0 {
            return Ok(());
        }
        self.buffer.remove(self.cursor - 1);
        self.cursor -= 1;
        out.write_all(BS)?;
        let keep = self.cursor;
        // Repaint the shortened tail and blank the vacated cell.
        self.move_to(self.buffer.len(), out)?;
        out.write_all(b" ")?;
        out.write_all(BS)?;
        self.move_to(keep, out)?;
        out.flush()?;
        Ok(())
    }

    /// Remove the character under the cursor. No-op at the end.
    pub fn delete_forward(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.cursor == self.buffer.len() {
            return Ok(());
        }
        self.move_to(self.cursor + 1, out)?;
        self.delete_backward(out)
    }

    /// Move the cursor one position left. No-op at the start.
    pub fn move_left(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.cursor > 0 {
            self.move_to(self.cursor - 1, out)?;
            out.flush()?;
        }
        Ok(())
    }

    /// Move the cursor one position right. No-op at the end.
    pub fn move_right(&mut self, out: &mut dyn Write) -> Result<()> {
        if self.cursor < self.buffer.len() {
            self.move_to(self.cursor + 1, out)?;
            out.flush()?;
        }
        Ok(())
    }

    /// Move the cursor to the start of the line.
    pub fn move_home(&mut self, out: &mut dyn Write) -> Result<()> {
        self.move_to(0, out)?;
        out.flush()?;
        Ok(())
    }

    /// Move the cursor to the end of the line.
    pub fn move_end(&mut self, out: &mut dyn Write) -> Result<()> {
        self.move_to(self.buffer.len(), out)?;
        out.flush()?;
        Ok(())
    }

    /// Erase the visible buffer and empty it, leaving the terminal cursor
    /// where the buffer began.
    pub fn clear(&mut self, out: &mut dyn Write) -> Result<()> {
        self.move_to(0, out)?;
        for _ in 0..self.buffer.len() {
            out.write_all(b" ")?;
        }
        for _ in 0..self.buffer.len() {
            out.write_all(BS)?;
        }
        self.buffer.clear();
        self.cursor = 0;
        out.flush()?;
        Ok(())
    }

    /// Replace the buffer with `text`, cursor at end-of-line. Used when a
    /// history entry is recalled.
    pub fn load(&mut self, text: &str, out: &mut dyn Write) -> Result<()> {
        self.clear(out)?;
        self.buffer = text.chars().collect();
        let line: String = self.buffer.iter().collect();
        out.write_all(line.as_bytes())?;
        self.cursor = self.buffer.len();
        out.flush()?;
        Ok(())
    }

    /// Repaint prompt and buffer on the current terminal line, preserving
    /// the cursor position. Used after an ambiguous-completion listing.
    pub fn reprint(&mut self, prompt: &str, out: &mut dyn Write) -> Result<()> {
        let keep = self.cursor;
        write!(out, "{prompt} ")?;
        let line: String = self.buffer.iter().collect();
        out.write_all(line.as_bytes())?;
        self.cursor = self.buffer.len();
        self.move_to(keep, out)?;
        out.flush()?;
        Ok(())
    }

    /// Walk the terminal cursor to `pos`: re-emit buffer characters going
    /// forward, emit backspaces going backward.
    fn move_to(&mut self, pos: usize, out: &mut dyn Write) -> Result<()> {
        debug_assert!(pos <= self.buffer.len());
        while pos > self.cursor {
            let mut buf = [0u8; 4];
            out.write_all(self.buffer[self.cursor].encode_utf8(&mut buf).as_bytes())?;
            self.cursor += 1;
        }
        while pos < self.cursor {
            out.write_all(BS)?;
            self.cursor -= 1;
        }
        Ok(())
    }
}
