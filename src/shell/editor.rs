//! Terminal line reader backed by `rustyline`.
//!
//! Provides line editing, optional persistent history (feature `history`) and
//! tab completion of command names, session built-ins and namespace variables
//! (feature `completion`).

#![cfg_attr(not(feature = "history"), allow(unused_variables, dead_code))]
#![cfg_attr(not(feature = "completion"), allow(unused_variables))]

use std::fmt;
use std::path::PathBuf;

use log::debug;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};

use super::help::HELP_COMMAND;
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::io::{LineReader, ReadEvent};

/// Completion and hint helper.
#[derive(Debug, Clone, Default)]
pub struct ShellHelper {
    candidates: Vec<String>,
}

impl ShellHelper {
    /// Create a helper completing from `candidates`.
    pub fn new(mut candidates: Vec<String>) -> Self {
        candidates.sort();
        candidates.dedup();
        Self { candidates }
    }

    /// Candidates for the word ending at `pos`, with the word's start offset.
    ///
    /// Only the first word and the argument of `h` complete.
    pub fn candidates_at(&self, line: &str, pos: usize) -> (usize, Vec<&str>) {
        let line = &line[..pos];
        let start = line
            .rfind(|c: char| c.is_ascii_whitespace())
            .map(|i| i + 1)
            .unwrap_or(0);

        let head = line[..start].trim();
        if !head.is_empty() && head != HELP_COMMAND {
            return (start, Vec::new());
        }

        let prefix = &line[start..];
        let matches = self
            .candidates
            .iter()
            .map(String::as_str)
            .filter(|name| name.starts_with(prefix))
            .collect();
        (start, matches)
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    #[cfg(feature = "completion")]
    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates_at(line, pos);
        let pairs = matches
            .into_iter()
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }

    #[cfg(not(feature = "completion"))]
    fn complete(
        &self,
        _line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok((pos, Vec::new()))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if !cfg!(feature = "completion") || pos < line.len() {
            return None;
        }

        let (start, matches) = self.candidates_at(line, pos);
        let typed = pos - start;
        if typed < 2 {
            return None;
        }
        matches
            .into_iter()
            .find(|name| name.len() > typed)
            .map(|name| name[typed..].to_string())
    }
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

/// `LineReader` over a terminal line editor.
pub struct EditorReader {
    editor: Editor<ShellHelper, DefaultHistory>,
    history_file: Option<PathBuf>,
}

impl EditorReader {
    /// Create an editor configured from `config`, completing `candidates`.
    ///
    /// With the `history` feature, history is loaded from `config.history_file`
    /// if present; a missing or unreadable file starts an empty history.
    pub fn new(config: &ShellConfig, candidates: Vec<String>) -> Result<Self, ShellError> {
        let rl_config = Config::builder()
            .max_history_size(config.max_history)?
            .auto_add_history(false)
            .completion_type(CompletionType::List)
            .edit_mode(config.edit_mode.into())
            .build();

        let mut editor: Editor<ShellHelper, DefaultHistory> = Editor::with_config(rl_config)?;
        editor.set_helper(Some(ShellHelper::new(candidates)));

        #[cfg(feature = "history")]
        if let Some(path) = &config.history_file {
            if let Err(err) = editor.load_history(path) {
                debug!("no history loaded from {}: {}", path.display(), err);
            }
        }

        Ok(Self {
            editor,
            history_file: config.history_file.clone(),
        })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadEvent, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadEvent::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadEvent::Eof),
            Err(err) => Err(err.into()),
        }
    }

    fn add_history(&mut self, line: &str) {
        #[cfg(feature = "history")]
        if let Err(err) = self.editor.add_history_entry(line) {
            debug!("history entry dropped: {}", err);
        }
    }

    fn close(&mut self) -> Result<(), ShellError> {
        #[cfg(feature = "history")]
        if let Some(path) = &self.history_file {
            self.editor.save_history(path)?;
            debug!("history saved to {}", path.display());
        }
        Ok(())
    }
}

impl fmt::Debug for EditorReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorReader")
            .field("history_file", &self.history_file)
            .finish_non_exhaustive()
    }
}
