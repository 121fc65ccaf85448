//! The shell: per-keystroke read loop and line dispatch.
//!
//! `read_line` runs while the terminal is in raw mode and echoes
//! explicitly, so line breaks it emits are `\r\n`. `execute_line` runs
//! after raw mode is dropped and commands write plain `\n`.

use std::io::Write;

use keysh_types::{Key, Result};

use crate::command::{Command, Environment, Status};
use crate::editor::LineEditor;
use crate::history::History;
use crate::registry::CommandRegistry;

/// Column width of one entry in an ambiguity listing.
const LIST_COL_WIDTH: usize = 12;
/// Entries per row in an ambiguity listing.
const LIST_ROW_LEN: usize = 5;

/// Blocking source of decoded keypresses.
///
/// The terminal backend implements this; tests drive the shell with a
/// scripted implementation.
pub trait KeyReader {
    /// Block until the next keypress and return it.
    fn next_key(&mut self) -> Result<Key>;
}

/// Outcome of reading one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// Enter was pressed; the finished buffer (untrimmed).
    Submitted(String),
    /// Ctrl-C was pressed; the caller unwinds and terminates.
    Interrupted,
}

/// An interactive shell: command registry, line editor, history, and the
/// read-dispatch loop tying them together.
///
/// Explicitly constructed and passed where needed; there is no global
/// instance.
pub struct Shell {
    registry: CommandRegistry,
    editor: LineEditor,
    history: History,
    prompt: String,
    page_step: usize,
    tab_count: u32,
}

impl Shell {
    /// Create a shell with an empty registry and history.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            registry: CommandRegistry::new(),
            editor: LineEditor::new(),
            history: History::new(),
            prompt: prompt.into(),
            page_step: 10,
            tab_count: 0,
        }
    }

    /// Set the PageUp/PageDown history step.
    pub fn with_page_step(mut self, step: usize) -> Self {
        self.page_step = step.max(1);
        self
    }

    /// Register a command. A prefix collision here is fatal at startup.
    pub fn register(&mut self, cmd: Box<dyn Command>) -> Result<()> {
        self.registry.register(cmd)
    }

    /// The command registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The command registry, for registration at startup.
    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    /// Lines recorded in history so far.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Read one line, one keystroke at a time.
    ///
    /// Echo is explicit: printable keys and edits go through the line
    /// editor, arrows and page keys navigate history, double-Tab completes.
    /// Returns on Enter or Ctrl-C. The caller must have the terminal in
    /// raw mode for the duration of this call.
    pub fn read_line(&mut self, keys: &mut dyn KeyReader, out: &mut dyn Write) -> Result<LineEvent> {
        self.tab_count = 0;
        self.editor.reset();
        write!(out, "{} ", self.prompt)?;
        out.flush()?;

        loop {
            let key = keys.next_key()?;
            if !key.is_tab() {
                self.tab_count = 0;
            }
            match key {
                Key::Interrupt => {
                    out.write_all(b"\r\n")?;
                    out.flush()?;
                    return Ok(LineEvent::Interrupted);
                },
                Key::Enter => {
                    out.write_all(b"\r\n")?;
                    out.flush()?;
                    return Ok(LineEvent::Submitted(self.editor.text()));
                },
                Key::Tab => self.handle_tab(out)?,
                Key::Backspace => self.editor.delete_backward(out)?,
                Key::Delete => self.editor.delete_forward(out)?,
                Key::Left => self.editor.move_left(out)?,
                Key::Right => self.editor.move_right(out)?,
                Key::Home => self.editor.move_home(out)?,
                Key::End => self.editor.move_end(out)?,
                Key::Up => self.history_up(1, out)?,
                Key::PageUp => self.history_up(self.page_step, out)?,
                Key::Down => self.history_down(1, out)?,
                Key::PageDown => self.history_down(self.page_step, out)?,
                Key::Char(c) if !c.is_control() => {
                    self.editor.insert(&c.to_string(), out)?;
                },
                Key::Char(_) => {},
            }
        }
    }

    /// Execute one submitted line and report its status.
    ///
    /// Empty lines are a no-op and are not recorded. A command fault never
    /// propagates: it is printed and folded into `Status::Error` so the
    /// loop keeps running.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> Status {
        let line = line.trim();
        if line.is_empty() {
            return Status::Done;
        }
        self.history.record(line);

        let (keyword, arguments) = split_keyword(line);
        let Some(cmd) = self.registry.resolve(keyword) else {
            let _ = writeln!(out, "Command '{keyword}' is not supported.");
            return Status::Error;
        };
        let args = cmd.parse_args(arguments);
        let mut env = Environment {
            registry: &self.registry,
            out,
        };
        match cmd.execute(&args, &mut env) {
            Ok(status) => status,
            Err(e) => {
                log::warn!("command '{}' failed: {e}", cmd.name());
                let _ = writeln!(out, "error: {e}");
                Status::Error
            },
        }
    }

    // -- Tab completion --

    /// Second-or-later consecutive Tab acts; the first is a no-op, and any
    /// other key resets the count.
    fn handle_tab(&mut self, out: &mut dyn Write) -> Result<()> {
        self.tab_count += 1;
        if self.tab_count < 2 {
            return Ok(());
        }
        let text = self.editor.text();
        let (keyword, arguments) = split_keyword(text.trim());

        if arguments.is_empty() {
            if self.registry.unique_match(keyword) {
                if let Some(fill) = self.registry.completion(keyword) {
                    self.editor.insert(&fill, out)?;
                }
            } else {
                self.list_matches(keyword, out)?;
                self.editor.reprint(&self.prompt, out)?;
            }
        } else if let Some(cmd) = self.registry.resolve(keyword) {
            let fill = cmd.autofill(arguments);
            if !fill.is_empty() {
                self.editor.insert(&fill, out)?;
            }
        }
        Ok(())
    }

    /// Print every matching command name, `LIST_ROW_LEN` fixed-width
    /// columns per row, leaving the cursor on a fresh line.
    fn list_matches(&self, keyword: &str, out: &mut dyn Write) -> Result<()> {
        out.write_all(b"\r\n")?;
        for (i, name) in self.registry.matching_names(keyword).iter().enumerate() {
            if i % LIST_ROW_LEN == 0 && i > 0 {
                out.write_all(b"\r\n")?;
            }
            write!(out, "{name:LIST_COL_WIDTH$}")?;
        }
        out.write_all(b"\r\n")?;
        out.flush()?;
        Ok(())
    }

    // -- History navigation --

    fn history_up(&mut self, step: usize, out: &mut dyn Write) -> Result<()> {
        let live = self.editor.text();
        if let Some(entry) = self.history.navigate_up(step, &live) {
            self.editor.load(&entry, out)?;
        }
        Ok(())
    }

    fn history_down(&mut self, step: usize, out: &mut dyn Write) -> Result<()> {
        if let Some(entry) = self.history.navigate_down(step) {
            self.editor.load(&entry, out)?;
        }
        Ok(())
    }
}

/// Split a trimmed line at the first whitespace run into keyword and
/// argument string.
fn split_keyword(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((kw, rest)) => (kw, rest.trim_start()),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_builtins;
    use keysh_types::KeyshError;

    /// Feeds a fixed key script; errors when it runs dry.
    struct Scripted {
        keys: std::vec::IntoIter<Key>,
    }
    impl Scripted {
        fn new(keys: Vec<Key>) -> Self {
            Self {
                keys: keys.into_iter(),
            }
        }
    }
    impl KeyReader for Scripted {
        fn next_key(&mut self) -> Result<Key> {
            self.keys
                .next()
                .ok_or_else(|| KeyshError::Terminal("key script exhausted".into()))
        }
    }

    fn chars(s: &str) -> Vec<Key> {
        s.chars().map(Key::Char).collect()
    }

    fn shell_with_builtins() -> Shell {
        let mut shell = Shell::new("test >");
        register_builtins(shell.registry_mut()).unwrap();
        shell
    }

    struct FailCmd;
    impl Command for FailCmd {
        fn name(&self) -> &str {
            "Fail"
        }
        fn min_match(&self) -> usize {
            1
        }
        fn description(&self) -> &str {
            "Always fails."
        }
        fn usage(&self) -> &str {
            "Fail"
        }
        fn execute(&self, _args: &[String], _env: &mut Environment<'_>) -> Result<Status> {
            Err(KeyshError::Command("boom".into()))
        }
    }

    // -- execute_line --

    #[test]
    fn empty_line_is_done_and_unrecorded() {
        let mut shell = shell_with_builtins();
        let mut out = Vec::new();
        assert_eq!(shell.execute_line("", &mut out), Status::Done);
        assert_eq!(shell.execute_line("   ", &mut out), Status::Done);
        assert_eq!(shell.history_len(), 0);
    }

    #[test]
    fn quit_and_exit_any_case() {
        let mut shell = shell_with_builtins();
        let mut out = Vec::new();
        assert_eq!(shell.execute_line("quit", &mut out), Status::Quit);
        assert_eq!(shell.execute_line("Exit", &mut out), Status::Quit);
        assert_eq!(shell.execute_line("q", &mut out), Status::Quit);
        assert_eq!(shell.execute_line("E", &mut out), Status::Quit);
    }

    #[test]
    fn unknown_command_reports_and_continues() {
        let mut shell = shell_with_builtins();
        let mut out = Vec::new();
        assert_eq!(shell.execute_line("frobnicate", &mut out), Status::Error);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("'frobnicate' is not supported"));
        // The failed line is still recorded.
        assert_eq!(shell.history_len(), 1);
    }

    #[test]
    fn command_fault_becomes_error_status() {
        let mut shell = shell_with_builtins();
        shell.register(Box::new(FailCmd)).unwrap();
        let mut out = Vec::new();
        assert_eq!(shell.execute_line("fail", &mut out), Status::Error);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("boom"));
    }

    #[test]
    fn keyword_split_tolerates_extra_whitespace() {
        assert_eq!(split_keyword("help   usage"), ("help", "usage"));
        assert_eq!(split_keyword("quit"), ("quit", ""));
    }

    // -- read_line --

    #[test]
    fn typed_line_is_submitted() {
        let mut shell = shell_with_builtins();
        let mut keys = Scripted::new({
            let mut k = chars("help");
            k.push(Key::Enter);
            k
        });
        let mut out = Vec::new();
        let ev = shell.read_line(&mut keys, &mut out).unwrap();
        assert_eq!(ev, LineEvent::Submitted("help".into()));
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("test > help"));
    }

    #[test]
    fn interrupt_ends_the_read() {
        let mut shell = shell_with_builtins();
        let mut keys = Scripted::new(vec![Key::Char('h'), Key::Interrupt]);
        let mut out = Vec::new();
        assert_eq!(
            shell.read_line(&mut keys, &mut out).unwrap(),
            LineEvent::Interrupted
        );
    }

    #[test]
    fn backspace_edits_the_line() {
        let mut shell = shell_with_builtins();
        let mut keys = Scripted::new({
            let mut k = chars("quix");
            k.push(Key::Backspace);
            k.push(Key::Char('t'));
            k.push(Key::Enter);
            k
        });
        let mut out = Vec::new();
        let ev = shell.read_line(&mut keys, &mut out).unwrap();
        assert_eq!(ev, LineEvent::Submitted("quit".into()));
    }

    #[test]
    fn single_tab_does_nothing() {
        let mut shell = shell_with_builtins();
        let mut keys = Scripted::new({
            let mut k = chars("he");
            k.push(Key::Tab);
            k.push(Key::Enter);
            k
        });
        let mut out = Vec::new();
        let ev = shell.read_line(&mut keys, &mut out).unwrap();
        assert_eq!(ev, LineEvent::Submitted("he".into()));
    }

    #[test]
    fn double_tab_completes_unique_prefix() {
        let mut shell = shell_with_builtins();
        let mut keys = Scripted::new({
            let mut k = chars("he");
            k.push(Key::Tab);
            k.push(Key::Tab);
            k.push(Key::Enter);
            k
        });
        let mut out = Vec::new();
        let ev = shell.read_line(&mut keys, &mut out).unwrap();
        // Only Help starts with "he" among the builtins; the stored name's
        // remainder plus a space is inserted after the typed prefix.
        assert_eq!(ev, LineEvent::Submitted("help ".into()));
    }

    #[test]
    fn interleaved_key_resets_tab_count() {
        let mut shell = shell_with_builtins();
        let mut keys = Scripted::new(vec![
            Key::Char('h'),
            Key::Tab,
            Key::Char('e'),
            Key::Tab,
            Key::Enter,
        ]);
        let mut out = Vec::new();
        let ev = shell.read_line(&mut keys, &mut out).unwrap();
        // Neither Tab was the second consecutive one.
        assert_eq!(ev, LineEvent::Submitted("he".into()));
    }

    #[test]
    fn double_tab_on_ambiguous_prefix_lists_and_keeps_buffer() {
        let mut shell = Shell::new("test >");
        register_builtins(shell.registry_mut()).unwrap();

        struct HelpAll;
        impl Command for HelpAll {
            fn name(&self) -> &str {
                "HelpAll"
            }
            fn min_match(&self) -> usize {
                5
            }
            fn description(&self) -> &str {
                "Show everything."
            }
            fn usage(&self) -> &str {
                "HelpAll"
            }
            fn execute(&self, _: &[String], _: &mut Environment<'_>) -> Result<Status> {
                Ok(Status::Done)
            }
        }
        shell.register(Box::new(HelpAll)).unwrap();

        let mut keys = Scripted::new({
            let mut k = chars("he");
            k.push(Key::Tab);
            k.push(Key::Tab);
            k.push(Key::Enter);
            k
        });
        let mut out = Vec::new();
        let ev = shell.read_line(&mut keys, &mut out).unwrap();
        assert_eq!(ev, LineEvent::Submitted("he".into()));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Help"));
        assert!(text.contains("HelpAll"));
    }

    #[test]
    fn double_tab_with_arguments_uses_command_autofill() {
        struct Greet;
        impl Command for Greet {
            fn name(&self) -> &str {
                "Greet"
            }
            fn min_match(&self) -> usize {
                1
            }
            fn description(&self) -> &str {
                "Greet someone."
            }
            fn usage(&self) -> &str {
                "Greet <name>"
            }
            fn execute(&self, _: &[String], _: &mut Environment<'_>) -> Result<Status> {
                Ok(Status::Done)
            }
            fn autofill(&self, partial: &str) -> String {
                if partial == "wo" { "rld".into() } else { String::new() }
            }
        }
        let mut shell = Shell::new("test >");
        shell.register(Box::new(Greet)).unwrap();

        let mut keys = Scripted::new({
            let mut k = chars("greet wo");
            k.push(Key::Tab);
            k.push(Key::Tab);
            k.push(Key::Enter);
            k
        });
        let mut out = Vec::new();
        let ev = shell.read_line(&mut keys, &mut out).unwrap();
        assert_eq!(ev, LineEvent::Submitted("greet world".into()));
    }

    // -- history navigation through the key loop --

    #[test]
    fn arrow_up_recalls_previous_lines() {
        let mut shell = shell_with_builtins();
        let mut out = Vec::new();
        shell.execute_line("help", &mut out);
        shell.execute_line("usage help", &mut out);

        let mut keys = Scripted::new(vec![Key::Up, Key::Up, Key::Enter]);
        let mut out = Vec::new();
        let ev = shell.read_line(&mut keys, &mut out).unwrap();
        assert_eq!(ev, LineEvent::Submitted("help".into()));
    }

    #[test]
    fn down_restores_edited_draft() {
        let mut shell = shell_with_builtins();
        let mut out = Vec::new();
        shell.execute_line("help", &mut out);

        let mut keys = Scripted::new({
            let mut k = chars("dra");
            k.extend([Key::Up, Key::Down, Key::Enter]);
            k
        });
        let mut out = Vec::new();
        let ev = shell.read_line(&mut keys, &mut out).unwrap();
        assert_eq!(ev, LineEvent::Submitted("dra".into()));
    }

    #[test]
    fn page_up_jumps_by_step() {
        let mut shell = Shell::new("test >").with_page_step(10);
        register_builtins(shell.registry_mut()).unwrap();
        let mut out = Vec::new();
        for _ in 0..12 {
            shell.execute_line("help", &mut out);
        }
        shell.execute_line("usage help", &mut out);

        let mut keys = Scripted::new(vec![Key::PageUp, Key::PageUp, Key::Enter]);
        let mut out = Vec::new();
        let ev = shell.read_line(&mut keys, &mut out).unwrap();
        // 13 entries; two pages of 10 clamp to the oldest.
        assert_eq!(ev, LineEvent::Submitted("help".into()));
    }
}
