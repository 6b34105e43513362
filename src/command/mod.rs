//! Command data model.
//!
//! A `Command` couples a name with a callback and an invocation mode. The mode is an
//! explicit tag rather than something inferred from the callback:
//!
//! - `StructuredParse`: a `clap::Command` owns argument interpretation and the callback
//!   receives the parsed `ArgMatches`
//! - `PositionalSplit`: the argument string is split on whitespace and the callback
//!   receives the tokens, optionally documented by a usage string
//!
//! Commands are immutable once built and are owned by the `CommandRegistry`.

use core::fmt;
use std::io::Write;

use clap::ArgMatches;

use crate::error::ShellError;
use crate::shell::Namespace;

// Sub-modules
pub mod dispatch;
pub mod registry;

// Re-export key types
pub use dispatch::{Dispatched, dispatch};
pub use registry::CommandRegistry;

/// Result type returned by command callbacks.
pub type CommandResult = Result<(), ShellError>;

/// Callback for commands with a structured argument parser.
pub type ParsedCallback = Box<dyn Fn(&mut CommandContext<'_>, &ArgMatches) -> CommandResult>;

/// Callback for commands taking whitespace-split positional arguments.
pub type PositionalCallback = Box<dyn Fn(&mut CommandContext<'_>, &[String]) -> CommandResult>;

/// Session state handed to a callback for the duration of one invocation.
pub struct CommandContext<'a> {
    /// Session output
    pub out: &'a mut dyn Write,

    /// Session variable namespace
    pub namespace: &'a mut Namespace,

    /// All registered commands (read-only while the session runs)
    pub registry: &'a CommandRegistry,
}

impl fmt::Debug for CommandContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("namespace", &self.namespace)
            .field("commands", &self.registry.len())
            .finish_non_exhaustive()
    }
}

/// How a command interprets its raw argument string.
pub enum Invocation {
    /// Structured parse: the parser owns argument interpretation and usage text
    StructuredParse {
        /// Argument parser (also the source of usage text)
        parser: clap::Command,
        /// Receives the parse result
        callback: ParsedCallback,
    },

    /// Whitespace split: tokens are passed positionally
    PositionalSplit {
        /// Usage string shown as `Usage: <name> <usage>`
        usage: Option<String>,
        /// Receives the tokens
        callback: PositionalCallback,
    },
}

/// A named shell command.
pub struct Command {
    name: String,
    about: Option<String>,
    invocation: Invocation,
}

impl Command {
    /// Create a command that receives whitespace-split positional arguments.
    pub fn positional<F>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>, &[String]) -> CommandResult + 'static,
    {
        Self {
            name: name.into(),
            about: None,
            invocation: Invocation::PositionalSplit {
                usage: None,
                callback: Box::new(callback),
            },
        }
    }

    /// Create a command whose arguments are interpreted by a `clap` parser.
    ///
    /// The parser is run without a binary name, so its arguments start directly
    /// after the command name.
    pub fn structured<F>(name: impl Into<String>, parser: clap::Command, callback: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>, &ArgMatches) -> CommandResult + 'static,
    {
        Self {
            name: name.into(),
            about: None,
            invocation: Invocation::StructuredParse {
                parser: parser.no_binary_name(true),
                callback: Box::new(callback),
            },
        }
    }

    /// Builder method to set the one-line description shown by `h`.
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Builder method to set the usage string.
    ///
    /// Ignored for structured commands: their parser is authoritative for usage.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        if let Invocation::PositionalSplit { usage: slot, .. } = &mut self.invocation {
            *slot = Some(usage.into());
        }
        self
    }

    /// Command name (invocation key).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invocation mode and callback.
    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    /// Check if this command has a structured argument parser.
    pub fn has_parser(&self) -> bool {
        matches!(self.invocation, Invocation::StructuredParse { .. })
    }

    /// One-line description.
    ///
    /// Falls back to the parser's `about` text for structured commands, then to
    /// the empty string.
    pub fn description(&self) -> String {
        if let Some(about) = &self.about {
            return about.clone();
        }
        match &self.invocation {
            Invocation::StructuredParse { parser, .. } => parser
                .get_about()
                .map(|about| about.to_string())
                .unwrap_or_default(),
            Invocation::PositionalSplit { .. } => String::new(),
        }
    }

    /// Usage text.
    ///
    /// Exactly one source is authoritative:
    /// 1. parser help, when a parser is set
    /// 2. `Usage: <name> <usage>`, when a usage string is set
    /// 3. the description otherwise
    pub fn usage_text(&self) -> String {
        match &self.invocation {
            Invocation::StructuredParse { parser, .. } => {
                parser.clone().render_help().to_string()
            }
            Invocation::PositionalSplit {
                usage: Some(usage), ..
            } => format!("Usage: {} {}", self.name, usage),
            Invocation::PositionalSplit { usage: None, .. } => self.description(),
        }
    }
}

impl fmt::Debug for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocation::StructuredParse { parser, .. } => f
                .debug_struct("StructuredParse")
                .field("parser", &parser.get_name())
                .finish_non_exhaustive(),
            Invocation::PositionalSplit { usage, .. } => f
                .debug_struct("PositionalSplit")
                .field("usage", usage)
                .finish_non_exhaustive(),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("about", &self.about)
            .field("invocation", &self.invocation)
            .finish()
    }
}
