//! Error types for shell operations.
//!
//! The `ShellError` enum represents every failure that can surface while building
//! a shell, dispatching a command or driving the interactive session. None of them
//! is fatal to a running session: the session reports the error and prompts again.

use std::io;
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use thiserror::Error;

/// Shell error type.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Tried to register a command with an empty name
    #[error("Command name must not be empty")]
    InvalidCommandName,

    /// Input named neither a command, a macro nor a namespace variable
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Command callback executed but reported failure
    #[error("{0}")]
    CommandFailed(String),

    /// Batch script stopped at a line whose evaluation failed
    #[error("Script aborted at `{line}`")]
    ScriptAborted {
        /// Failing input line
        line: String,
    },

    /// Value could not be converted into a namespace entry
    #[error("Cannot inject '{name}': {source}")]
    Inject {
        /// Namespace entry name
        name: String,
        /// Conversion failure
        #[source]
        source: serde_json::Error,
    },

    /// Configuration text is not valid TOML for `ShellConfig`
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] toml::de::Error),

    /// Configuration file is not valid TOML for `ShellConfig`
    #[error("Invalid configuration in {}: {source}", path.display())]
    Config {
        /// Configuration file path
        path: PathBuf,
        /// Parse failure
        #[source]
        source: toml::de::Error,
    },

    /// Configuration or script file could not be read
    #[error("Cannot read {}: {source}", path.display())]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Line editor failure
    #[error("Readline error: {0}")]
    Readline(#[from] ReadlineError),

    /// I/O error while writing session output
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Create a `CommandFailed` error from any message.
    ///
    /// Convenience for callbacks: `return Err(ShellError::failed("no such device"))`.
    pub fn failed(message: impl Into<String>) -> Self {
        ShellError::CommandFailed(message.into())
    }
}
