//! Line input for the editor REPL.
//!
//! On a terminal, lines come from rustyline with command-word completion and a
//! history file. Piped input is read straight from stdin so scripted sessions
//! (`quest_script < session.txt`) work without a TTY.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use log::{debug, warn};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::command::COMMAND_WORDS;

/// Outcome of reading a line from the REPL input.
pub enum InputEvent {
    Line(String),
    Eof,
    Interrupted,
}

type LineEditor = rustyline::Editor<CommandCompleter, DefaultHistory>;

/// Completes the first word of a line against the editor's command set.
#[derive(Default)]
struct CommandCompleter;

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((0, command_candidates(&line[..pos])))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}

fn command_candidates(head: &str) -> Vec<Pair> {
    if head.contains(char::is_whitespace) {
        return Vec::new();
    }
    COMMAND_WORDS
        .iter()
        .filter(|word| word.starts_with(head))
        .map(|word| Pair {
            display: (*word).to_string(),
            replacement: (*word).to_string(),
        })
        .collect()
}

/// Source of REPL lines: rustyline on a terminal, plain stdin otherwise.
pub struct InputManager {
    editor: Option<LineEditor>,
    history: Option<PathBuf>,
}

impl InputManager {
    pub fn new() -> Self {
        if !io::stdin().is_terminal() {
            debug!("stdin is not a terminal; reading plain lines");
            return Self {
                editor: None,
                history: None,
            };
        }
        let mut editor = match LineEditor::new() {
            Ok(editor) => editor,
            Err(err) => {
                warn!("line editor unavailable ({err}); reading plain lines");
                return Self {
                    editor: None,
                    history: None,
                };
            },
        };
        editor.set_helper(Some(CommandCompleter));
        let history = dirs::data_local_dir().map(|dir| dir.join("quest_script").join("history.txt"));
        if let Some(path) = &history {
            // a missing history file is the normal first run
            let _ = editor.load_history(path);
        }
        Self {
            editor: Some(editor),
            history,
        }
    }

    pub fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let Some(editor) = self.editor.as_mut() else {
            return read_plain_line(prompt);
        };
        match editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                Ok(InputEvent::Line(line))
            },
            Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
            Err(ReadlineError::Io(err)) => Err(err),
            Err(err) => Err(io::Error::other(err)),
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputManager {
    fn drop(&mut self) {
        let (Some(editor), Some(path)) = (self.editor.as_mut(), self.history.as_ref()) else {
            return;
        };
        if let Some(dir) = path.parent()
            && let Err(err) = std::fs::create_dir_all(dir)
        {
            warn!("cannot create history directory {}: {err}", dir.display());
            return;
        }
        if let Err(err) = editor.save_history(path) {
            warn!("cannot save history to {}: {err}", path.display());
        }
    }
}

fn read_plain_line(prompt: &str) -> io::Result<InputEvent> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(InputEvent::Eof);
    }
    Ok(InputEvent::Line(line.trim_end_matches(['\n', '\r']).to_string()))
}
