//! Submitted-line history with a draft slot.
//!
//! The log is append-only, oldest first, in-memory only (lost on exit).
//! While the user browses upward, the live unsubmitted line is snapshotted
//! into a draft slot; returning to the bottom restores and discards it.

/// Ordered log of submitted lines plus a navigation cursor.
///
/// `current` ranges over `[0, len]`; `current == len` means the live edit
/// line (the bottom). The draft exists only between the first upward
/// navigation and the return to the bottom.
#[derive(Default)]
pub struct History {
    entries: Vec<String>,
    current: usize,
    draft: Option<String>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a submitted line and reset the cursor to the bottom.
    ///
    /// Any pending draft is discarded: once the line under edit has been
    /// submitted, the snapshot taken before browsing is stale.
    pub fn record(&mut self, line: &str) {
        self.entries.push(line.to_string());
        self.current = self.entries.len();
        self.draft = None;
    }

    /// Step up to `step` entries back and return the entry to display.
    ///
    /// On the first step away from the bottom the live line is snapshotted
    /// as the draft. Returns `None` at the top (no-op).
    pub fn navigate_up(&mut self, step: usize, live: &str) -> Option<String> {
        if self.current == 0 {
            return None;
        }
        if self.current == self.entries.len() {
            self.draft = Some(live.to_string());
        }
        self.current = self.current.saturating_sub(step);
        Some(self.entries[self.current].clone())
    }

    /// Step up to `step` entries forward and return the entry to display.
    ///
    /// Landing back at the bottom yields the draft and discards it.
    /// Returns `None` when already at the bottom (no-op).
    pub fn navigate_down(&mut self, step: usize) -> Option<String> {
        if self.current >= self.entries.len() {
            return None;
        }
        self.current = (self.current + step).min(self.entries.len());
        if self.current == self.entries.len() {
            Some(self.draft.take().unwrap_or_default())
        } else {
            Some(self.entries[self.current].clone())
        }
    }

    /// Number of permanently recorded lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no lines have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_walks_newest_to_oldest() {
        let mut h = History::new();
        h.record("foo");
        h.record("bar");
        assert_eq!(h.navigate_up(1, "").as_deref(), Some("bar"));
        assert_eq!(h.navigate_up(1, "").as_deref(), Some("foo"));
        assert_eq!(h.navigate_up(1, ""), None);
    }

    #[test]
    fn round_trip_restores_draft_unchanged() {
        let mut h = History::new();
        h.record("foo");
        h.record("bar");
        assert_eq!(h.navigate_up(1, "my draft").as_deref(), Some("bar"));
        assert_eq!(h.navigate_up(1, "should not overwrite").as_deref(), Some("foo"));
        assert_eq!(h.navigate_down(1).as_deref(), Some("bar"));
        assert_eq!(h.navigate_down(1).as_deref(), Some("my draft"));
    }

    #[test]
    fn down_at_bottom_is_noop() {
        let mut h = History::new();
        h.record("foo");
        assert_eq!(h.navigate_down(1), None);
    }

    #[test]
    fn up_on_empty_history_is_noop() {
        let mut h = History::new();
        assert_eq!(h.navigate_up(1, "draft"), None);
    }

    #[test]
    fn page_steps_clamp() {
        let mut h = History::new();
        for line in ["a", "b", "c"] {
            h.record(line);
        }
        assert_eq!(h.navigate_up(10, "live").as_deref(), Some("a"));
        assert_eq!(h.navigate_down(10).as_deref(), Some("live"));
    }

    #[test]
    fn record_discards_pending_draft() {
        let mut h = History::new();
        h.record("foo");
        // Browse away from a draft, then submit without coming back down.
        assert_eq!(h.navigate_up(1, "draft").as_deref(), Some("foo"));
        h.record("foo");
        assert_eq!(h.len(), 2);
        // The stale draft must not reappear at the bottom.
        assert_eq!(h.navigate_up(1, "new live").as_deref(), Some("foo"));
        assert_eq!(h.navigate_down(1).as_deref(), Some("new live"));
    }

    #[test]
    fn record_resets_cursor_to_bottom() {
        let mut h = History::new();
        h.record("a");
        h.navigate_up(1, "");
        h.record("b");
        assert_eq!(h.navigate_up(1, "").as_deref(), Some("b"));
    }
}
