//! # pysh
//!
//! Embeddable interactive command shell.
//!
//! **Key features:**
//! - **Command registry** - Named commands listed in registration order
//! - **Two invocation modes** - Whitespace-split positional arguments, or a `clap` parser
//! - **Built-in help** - `h` lists commands, `h <name>` and `<name> -h` show usage
//! - **Variable namespace** - Inject any `Serialize` value and inspect it at the prompt
//! - **Line editing** - `rustyline` editor with history and tab completion
//! - **Batch mode** - Run a script through the same evaluator
//!
//! ## Optional Features
//!
//! - `completion` - Tab completion and hints for commands and namespace names
//! - `history` - Persistent line editor history
//!
//! ## Example
//!
//! ```no_run
//! use std::io::Write;
//!
//! use pysh::{Command, Pysh, ShellConfig};
//!
//! let mut shell = Pysh::new(ShellConfig::default());
//! shell
//!     .register(
//!         Command::positional("echo", |ctx, args| {
//!             writeln!(ctx.out, "{}", args.join(" "))?;
//!             Ok(())
//!         })
//!         .about("Print the arguments."),
//!     )
//!     .unwrap();
//! shell.run().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::result_large_err)]

// ============================================================================
// Module Declarations
// ============================================================================

// Foundation
pub mod config;
pub mod error;
pub mod io;

// Commands and dispatch
pub mod command;

// Presentation
pub mod banner;
pub mod prompt;

// Shell orchestration
pub mod shell;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Line input
pub use io::{LineReader, ReadEvent, ScriptReader};

// Configuration
pub use config::{EditMode, ShellConfig};

// Error types
pub use error::ShellError;

// Command types
pub use command::{
    Command, CommandContext, CommandRegistry, CommandResult, Dispatched, Invocation, dispatch,
};

// Presentation
pub use banner::Banner;
pub use prompt::{Prompts, SessionAttributes, ShellPrompts};

// Shell types
pub use shell::{
    EditorReader, Execution, Handle, Namespace, NoopHooks, Outcome, Pysh, Session, SessionHooks,
};

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
