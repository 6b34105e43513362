//! Embedded interactive session.
//!
//! A `Session` owns the per-session state (invocable handles, namespace,
//! prompt attributes) and evaluates input lines read through a `LineReader`.
//! Command handles resolve through the shell's registry on every call, so a
//! command replaced after binding is picked up by the next invocation.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info, warn};

use super::hooks::{Execution, Outcome, SessionHooks};
use super::namespace::{Namespace, display_value};
use crate::command::dispatch::write_block;
use crate::command::{CommandContext, CommandRegistry, Dispatched, dispatch};
use crate::error::ShellError;
use crate::io::{LineReader, ReadEvent, ScriptReader};
use crate::prompt::{Prompts, SessionAttributes};

/// Printed when an interactive session ends.
pub const EXIT_MESSAGE: &str = "Leaving PYSH interactive...";

/// Words understood by every session, with their help text.
pub const SESSION_BUILTINS: [(&str, &str); 4] = [
    ("exit", "Leave the interactive shell."),
    ("quit", "Leave the interactive shell."),
    ("q", "Shortcut for `exit`."),
    ("who", "List the variables in the session namespace."),
];

const EXIT_WORDS: [&str; 2] = ["exit", "quit"];

static EMBED_DEPTH: AtomicUsize = AtomicUsize::new(0);

/// Number of sessions currently alive in this process.
pub fn embed_depth() -> usize {
    EMBED_DEPTH.load(Ordering::SeqCst)
}

struct EmbedGuard;

impl EmbedGuard {
    fn enter() -> Self {
        let outer = EMBED_DEPTH.fetch_add(1, Ordering::SeqCst);
        if outer > 0 {
            debug!("embedding session inside an active one (depth {})", outer + 1);
        }
        EmbedGuard
    }
}

impl Drop for EmbedGuard {
    fn drop(&mut self) {
        EMBED_DEPTH.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Something invocable by name at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handle {
    /// Dispatch to the registry command of the same name
    Command,

    /// Evaluate the stored line instead
    Macro(String),
}

/// Interactive evaluator bound to a command registry.
pub struct Session<'a> {
    registry: &'a CommandRegistry,
    prompts: &'a dyn Prompts,
    hooks: Option<&'a mut dyn SessionHooks>,
    banner: String,
    handles: BTreeMap<String, Handle>,
    attributes: SessionAttributes,
    namespace: Namespace,
    _guard: EmbedGuard,
}

impl<'a> Session<'a> {
    /// Embed a new session.
    ///
    /// `banner` is shown when `interact` starts; pass an empty string for none.
    pub fn embed(
        registry: &'a CommandRegistry,
        prompts: &'a dyn Prompts,
        banner: impl Into<String>,
    ) -> Self {
        let guard = EmbedGuard::enter();
        Self {
            registry,
            prompts,
            hooks: None,
            banner: banner.into(),
            handles: BTreeMap::new(),
            attributes: SessionAttributes::default(),
            namespace: Namespace::new(),
            _guard: guard,
        }
    }

    /// Make the registry command `name` invocable at the prompt.
    pub fn bind_command(&mut self, name: &str) {
        debug!("binding command '{}'", name);
        self.handles.insert(name.to_string(), Handle::Command);
    }

    /// Make `name` evaluate `expansion` instead.
    pub fn define_macro(&mut self, name: impl Into<String>, expansion: impl Into<String>) {
        self.handles
            .insert(name.into(), Handle::Macro(expansion.into()));
    }

    /// Invocable handle bound to `name`.
    pub fn handle(&self, name: &str) -> Option<&Handle> {
        self.handles.get(name)
    }

    /// Override the input prompt.
    pub fn set_simple_prompt(&mut self, prompt: impl Into<String>) {
        self.attributes.simple_prompt = Some(prompt.into());
    }

    /// Session attributes consulted by the prompt provider.
    pub fn attributes(&self) -> &SessionAttributes {
        &self.attributes
    }

    /// Session namespace.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Session namespace for modification.
    pub fn namespace_mut(&mut self) -> &mut Namespace {
        &mut self.namespace
    }

    /// Register the post-execution hooks.
    pub fn register_post_execute(&mut self, hooks: &'a mut dyn SessionHooks) {
        self.hooks = Some(hooks);
    }

    /// Names worth completing at the prompt: handles, built-ins and variables.
    pub fn completion_candidates(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .handles
            .keys()
            .cloned()
            .chain(SESSION_BUILTINS.iter().map(|(name, _)| name.to_string()))
            .chain(self.namespace.names().map(str::to_string))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Run the interactive loop until exit or end of input.
    ///
    /// Writes the banner first and the exit message last. Errors raised while
    /// evaluating a line are reported and the loop continues; only failures of
    /// the reader or of `out` end the session early.
    pub fn interact(
        &mut self,
        reader: &mut dyn LineReader,
        out: &mut dyn Write,
    ) -> Result<(), ShellError> {
        info!("interactive session started");
        let result = self.interact_loop(reader, out);
        let closed = reader.close();
        info!("interactive session ended");
        result?;
        closed
    }

    fn interact_loop(
        &mut self,
        reader: &mut dyn LineReader,
        out: &mut dyn Write,
    ) -> Result<(), ShellError> {
        out.write_all(self.banner.as_bytes())?;

        while let Some(line) = self.read_input(reader)? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            reader.add_history(line);
            if self.execute(line, out)? == Outcome::Exit {
                break;
            }
        }

        writeln!(out, "{}", EXIT_MESSAGE)?;
        out.flush()?;
        Ok(())
    }

    /// Evaluate `source` line by line without prompts or banner.
    ///
    /// Blank lines and `#` comments are skipped. Stops at `exit`, or at the
    /// first failing line with `ShellError::ScriptAborted` after reporting it.
    pub fn execute_script(&mut self, source: &str, out: &mut dyn Write) -> Result<(), ShellError> {
        let mut reader = ScriptReader::from_source(source);

        while let Some(line) = self.read_input(&mut reader)? {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match self.execute(line, out)? {
                Outcome::Success => {}
                Outcome::Exit => break,
                Outcome::Failed => {
                    return Err(ShellError::ScriptAborted {
                        line: line.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Evaluate a single line.
    ///
    /// Evaluation errors are returned, not reported. `Outcome::Failed` means the
    /// failure was already reported to `out` (an argument parser rejection).
    pub fn eval_line(&mut self, line: &str, out: &mut dyn Write) -> Result<Outcome, ShellError> {
        self.eval(line.trim(), out, true)
    }

    /// Read one logical line, joining `\` continuations.
    ///
    /// `None` means end of input. An interrupt discards the pending input and
    /// yields an empty line.
    fn read_input(&self, reader: &mut dyn LineReader) -> Result<Option<String>, ShellError> {
        let prompt = self.prompts.input_prompt(&self.attributes);
        let mut line = match reader.read_line(&prompt)? {
            ReadEvent::Line(line) => line,
            ReadEvent::Interrupted => return Ok(Some(String::new())),
            ReadEvent::Eof => return Ok(None),
        };

        let width = prompt.chars().count();
        while let Some(head) = line.strip_suffix('\\') {
            let continuation = self.prompts.continuation_prompt(&self.attributes, width);
            match reader.read_line(&continuation)? {
                ReadEvent::Line(next) => line = format!("{} {}", head, next),
                ReadEvent::Interrupted => return Ok(Some(String::new())),
                ReadEvent::Eof => {
                    line = head.to_string();
                    break;
                }
            }
        }

        Ok(Some(line))
    }

    /// Evaluate, report any error, run the hooks and flush `out`.
    ///
    /// Only a failure to write to `out` is returned.
    fn execute(&mut self, line: &str, out: &mut dyn Write) -> Result<Outcome, ShellError> {
        let outcome = match self.eval(line, out, true) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("'{}' failed: {}", line, err);
                writeln!(out, "Error: {}", err)?;
                if let ShellError::UnknownCommand(_) = err {
                    writeln!(out, "Type `h` for a list of commands.")?;
                }
                Outcome::Failed
            }
        };

        if let Some(hooks) = self.hooks.as_deref_mut() {
            hooks.post_execute(&Execution { line, outcome });
        }
        out.flush()?;
        Ok(outcome)
    }

    fn eval(&mut self, line: &str, out: &mut dyn Write, expand: bool) -> Result<Outcome, ShellError> {
        let (name, args) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        if EXIT_WORDS.contains(&name) {
            return Ok(Outcome::Exit);
        }

        match self.handles.get(name) {
            Some(Handle::Command) => return self.invoke(name, args, out),
            Some(Handle::Macro(expansion)) if expand => {
                let expansion = if args.is_empty() {
                    expansion.clone()
                } else {
                    format!("{} {}", expansion, args)
                };
                debug!("expanding '{}' to '{}'", name, expansion);
                return self.eval(&expansion, out, false);
            }
            _ => {}
        }

        if name == "who" && args.is_empty() {
            self.who(out)?;
            return Ok(Outcome::Success);
        }

        if let Some(value) = self.namespace.resolve(line) {
            write!(out, "{}", self.prompts.output_prompt())?;
            write_block(out, &display_value(value))?;
            return Ok(Outcome::Success);
        }

        Err(ShellError::UnknownCommand(name.to_string()))
    }

    fn invoke(&mut self, name: &str, args: &str, out: &mut dyn Write) -> Result<Outcome, ShellError> {
        let command = self
            .registry
            .lookup(name)
            .ok_or_else(|| ShellError::UnknownCommand(name.to_string()))?;

        let mut ctx = CommandContext {
            out,
            namespace: &mut self.namespace,
            registry: self.registry,
        };
        let dispatched = dispatch(command, args, &mut ctx)?;
        debug!("'{}' dispatched: {:?}", name, dispatched);
        match dispatched {
            Dispatched::Rejected => Ok(Outcome::Failed),
            Dispatched::Usage | Dispatched::Invoked => Ok(Outcome::Success),
        }
    }

    fn who(&self, out: &mut dyn Write) -> Result<(), ShellError> {
        if self.namespace.is_empty() {
            writeln!(out, "Interactive namespace is empty.")?;
        } else {
            let names: Vec<&str> = self.namespace.names().collect();
            writeln!(out, "{}", names.join("\t"))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("handles", &self.handles)
            .field("attributes", &self.attributes)
            .field("namespace", &self.namespace)
            .field("has_hooks", &self.hooks.is_some())
            .finish_non_exhaustive()
    }
}
