//! Line input abstraction.
//!
//! The session reads input through the `LineReader` trait so the same evaluation
//! loop drives a terminal line editor, a batch script or a test fixture.

use std::collections::VecDeque;

use crate::error::ShellError;

/// Result of one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent {
    /// A complete line (without the trailing newline)
    Line(String),

    /// The user interrupted the current line (Ctrl+C)
    Interrupted,

    /// Input is exhausted (Ctrl+D or end of script)
    Eof,
}

/// Line-oriented input source.
pub trait LineReader {
    /// Read one line, displaying `prompt` if the source is interactive.
    fn read_line(&mut self, prompt: &str) -> Result<ReadEvent, ShellError>;

    /// Record an evaluated line in history.
    ///
    /// Default implementation keeps no history.
    fn add_history(&mut self, _line: &str) {}

    /// Release the source when the session ends (e.g. persist history).
    fn close(&mut self) -> Result<(), ShellError> {
        Ok(())
    }
}

/// Reader over a fixed sequence of lines.
///
/// Used for batch execution and tests. Every prompt requested is recorded, and
/// `ReadEvent::Eof` is returned once the lines run out.
#[derive(Debug, Default)]
pub struct ScriptReader {
    lines: VecDeque<ReadEvent>,
    prompts: Vec<String>,
}

impl ScriptReader {
    /// Create a reader over the lines of `source`.
    pub fn from_source(source: &str) -> Self {
        Self {
            lines: source
                .lines()
                .map(|line| ReadEvent::Line(line.to_string()))
                .collect(),
            prompts: Vec::new(),
        }
    }

    /// Create a reader over explicit events (lines and interrupts).
    pub fn from_events(events: impl IntoIterator<Item = ReadEvent>) -> Self {
        Self {
            lines: events.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts requested so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Number of unread events.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineReader for ScriptReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadEvent, ShellError> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front().unwrap_or(ReadEvent::Eof))
    }
}
