//! Built-in `h` command.
//!
//! - `h`: list every registered command with its one-line description
//! - `h <command>`: show that command's usage text
//! - `h <anything else>`: best-effort introspection (namespace values, session
//!   built-ins), never an error

use crate::command::dispatch::write_block;
use crate::command::{Command, CommandContext, CommandResult};
use crate::shell::SESSION_BUILTINS;
use crate::shell::namespace::{display_value, value_kind};

/// Name the help command is registered under.
pub const HELP_COMMAND: &str = "h";

/// Build the help command.
pub fn help_command() -> Command {
    Command::positional(HELP_COMMAND, |ctx, args| run_help(ctx, &args.join(" ")))
        .about("Shows list of commands.")
}

/// Run help for `definition` (empty for the full listing).
pub fn run_help(ctx: &mut CommandContext<'_>, definition: &str) -> CommandResult {
    if definition.is_empty() {
        writeln!(ctx.out, "All commands explained:")?;
        for cmd in ctx.registry.all() {
            writeln!(ctx.out, " * {}: {}", cmd.name(), cmd.description())?;
        }
        return Ok(());
    }

    match ctx.registry.lookup(definition) {
        Some(cmd) => write_block(ctx.out, &cmd.usage_text())?,
        None => introspect(ctx, definition)?,
    }
    Ok(())
}

/// Generic help for a topic that is not a registered command.
fn introspect(ctx: &mut CommandContext<'_>, topic: &str) -> CommandResult {
    if let Some(value) = ctx.namespace.resolve(topic) {
        writeln!(ctx.out, "{}: {}", topic, value_kind(value))?;
        write_block(ctx.out, &display_value(value))?;
        return Ok(());
    }

    if let Some((name, about)) = SESSION_BUILTINS.iter().find(|(name, _)| *name == topic) {
        writeln!(ctx.out, "{}: {}", name, about)?;
        return Ok(());
    }

    writeln!(ctx.out, "No help found for '{}'", topic)?;
    Ok(())
}
