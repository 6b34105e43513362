//! Shell orchestration.
//!
//! `Pysh` owns the command registry, the banner and the construction settings.
//! Starting it embeds a `Session`, binds every registered command into the
//! session, injects the configured namespace and then either runs the
//! interactive loop or executes a script.

use core::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use clap::ArgMatches;
use log::info;
use serde::Serialize;

use crate::banner::Banner;
use crate::command::{Command, CommandContext, CommandRegistry, CommandResult};
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::io::LineReader;
use crate::prompt::{Prompts, ShellPrompts};

// Sub-modules
pub mod editor;
pub mod help;
pub mod hooks;
pub mod namespace;
pub mod session;

// Re-export key types
pub use editor::{EditorReader, ShellHelper};
pub use help::{HELP_COMMAND, help_command};
pub use hooks::{Execution, NoopHooks, Outcome, SessionHooks};
pub use namespace::Namespace;
use namespace::to_entry;
pub use session::{EXIT_MESSAGE, Handle, SESSION_BUILTINS, Session, embed_depth};

/// Macro bound in every session as a shortcut for `exit`.
pub const QUIT_SHORTCUT: &str = "q";

/// Shell builder and entry point.
///
/// ```no_run
/// use std::io::Write;
///
/// use pysh::{Pysh, ShellConfig};
///
/// let mut shell = Pysh::new(ShellConfig::default().with_prompt("dev> "));
/// shell
///     .add_command("hello", |ctx, args| {
///         writeln!(ctx.out, "hello {}", args.join(" "))?;
///         Ok(())
///     }, None)
///     .unwrap();
/// shell.run().unwrap();
/// ```
pub struct Pysh {
    config: ShellConfig,
    registry: CommandRegistry,
    banner: Banner,
    prompts: Box<dyn Prompts>,
    hooks: Box<dyn SessionHooks>,
}

impl Pysh {
    /// Create a shell from `config`.
    ///
    /// Resolves the banner (custom messages, else the default block) and
    /// registers the built-in `h` command ahead of any caller command.
    pub fn new(config: ShellConfig) -> Self {
        let banner = Banner::new(config.banner.clone());

        let mut registry = CommandRegistry::new();
        registry.insert(help_command());

        Self {
            config,
            registry,
            banner,
            prompts: Box::new(ShellPrompts),
            hooks: Box::new(NoopHooks),
        }
    }

    /// Register a command taking whitespace-split arguments.
    ///
    /// `usage` is shown by `<name> -h` and `h <name>` as `Usage: <name> <usage>`.
    pub fn add_command<F>(
        &mut self,
        name: impl Into<String>,
        callback: F,
        usage: Option<&str>,
    ) -> Result<(), ShellError>
    where
        F: Fn(&mut CommandContext<'_>, &[String]) -> CommandResult + 'static,
    {
        let mut command = Command::positional(name, callback);
        if let Some(usage) = usage {
            command = command.usage(usage);
        }
        self.register(command)
    }

    /// Register a command whose arguments are interpreted by `parser`.
    pub fn add_parsed_command<F>(
        &mut self,
        name: impl Into<String>,
        parser: clap::Command,
        callback: F,
    ) -> Result<(), ShellError>
    where
        F: Fn(&mut CommandContext<'_>, &ArgMatches) -> CommandResult + 'static,
    {
        self.register(Command::structured(name, parser, callback))
    }

    /// Register a fully built command.
    pub fn register(&mut self, command: Command) -> Result<(), ShellError> {
        self.registry.add(command)
    }

    /// Replace the banner.
    pub fn set_banner(&mut self, banner: Banner) {
        self.banner = banner;
    }

    /// Append a banner message.
    pub fn add_banner_message(&mut self, msg: impl Into<String>) {
        self.banner.add_message(msg);
    }

    /// Serialize `value` into the namespace injected at startup.
    pub fn inject<T: Serialize + ?Sized>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<(), ShellError> {
        let name = name.into();
        let value = to_entry(&name, value)?;
        self.config.namespace.insert(name, value);
        Ok(())
    }

    /// Replace the prompt provider.
    pub fn set_prompts(&mut self, prompts: impl Prompts + 'static) {
        self.prompts = Box::new(prompts);
    }

    /// Replace the post-execution hooks.
    pub fn set_hooks(&mut self, hooks: impl SessionHooks + 'static) {
        self.hooks = Box::new(hooks);
    }

    /// Command registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Banner.
    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    /// Construction settings.
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Embed a session wired to this shell.
    ///
    /// The steps run in a fixed order: create the session with the prompt
    /// provider and rendered banner, bind every command, define `q`, apply the
    /// prompt override, copy the namespace, register the hooks.
    pub fn embed(&mut self) -> Session<'_> {
        let Pysh {
            config,
            registry,
            banner,
            prompts,
            hooks,
        } = self;

        let mut session = Session::embed(registry, &**prompts, banner.render());
        for name in registry.names() {
            session.bind_command(name);
        }
        session.define_macro(QUIT_SHORTCUT, "exit");
        if let Some(prompt) = &config.prompt {
            session.set_simple_prompt(prompt.clone());
        }
        session
            .namespace_mut()
            .extend(config.namespace.iter().map(|(k, v)| (k.clone(), v.clone())));
        session.register_post_execute(&mut **hooks);
        session
    }

    /// Run the interactive loop on the terminal until the user exits.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let config = self.config.clone();
        let mut session = self.embed();
        let mut reader = EditorReader::new(&config, session.completion_candidates())?;
        session.interact(&mut reader, &mut io::stdout())
    }

    /// Run the interactive loop over any line source and output.
    pub fn run_with(
        &mut self,
        reader: &mut dyn LineReader,
        out: &mut dyn Write,
    ) -> Result<(), ShellError> {
        self.embed().interact(reader, out)
    }

    /// Execute the script at `path` instead of the interactive loop.
    pub fn run_script(&mut self, path: impl AsRef<Path>) -> Result<(), ShellError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ShellError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        info!("running script {}", path.display());
        self.run_source(&source, &mut io::stdout())
    }

    /// Execute script text, writing to `out`.
    pub fn run_source(&mut self, source: &str, out: &mut dyn Write) -> Result<(), ShellError> {
        self.embed().execute_script(source, out)
    }
}

impl Default for Pysh {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}

impl fmt::Debug for Pysh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pysh")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("banner", &self.banner)
            .finish_non_exhaustive()
    }
}
