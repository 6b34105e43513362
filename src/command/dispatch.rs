//! Invocation dispatch.
//!
//! Turns the raw argument string typed after a command name into a callback
//! invocation. Evaluated afresh on every call; nothing is cached.

use std::io::Write;

use log::{debug, warn};

use super::{Command, CommandContext, Invocation};
use crate::error::ShellError;

/// Argument string that requests usage instead of running the command.
pub const USAGE_FLAG: &str = "-h";

/// Outcome of a successful dispatch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// Usage text was shown (`-h`, or help/version output from the parser);
    /// the callback did not run
    Usage,

    /// The parser rejected the arguments and reported why; the callback did not
    /// run and the invocation counts as failed
    Rejected,

    /// The callback ran to completion
    Invoked,
}

/// Dispatch one invocation of `command`.
///
/// 1. `args` exactly `-h`: print usage text
/// 2. structured command: parse the whitespace-split tokens, then call the callback
///    with the matches. A parse failure is rendered by the parser to the session
///    output and returned as `Rejected`; a `--help` the parser handles itself is
///    rendered the same way and returned as `Usage`
/// 3. positional command: call the callback with the whitespace-split tokens
///
/// Callback errors are returned unchanged for the session to report.
pub fn dispatch(
    command: &Command,
    args: &str,
    ctx: &mut CommandContext<'_>,
) -> Result<Dispatched, ShellError> {
    if args == USAGE_FLAG {
        debug!("showing usage for '{}'", command.name());
        write_block(ctx.out, &command.usage_text())?;
        return Ok(Dispatched::Usage);
    }

    let tokens = args.split_whitespace();

    match command.invocation() {
        Invocation::StructuredParse { parser, callback } => {
            match parser.clone().try_get_matches_from(tokens) {
                Ok(matches) => {
                    debug!("invoking '{}' with parsed arguments", command.name());
                    callback(ctx, &matches)?;
                    Ok(Dispatched::Invoked)
                }
                Err(err) => {
                    write_block(ctx.out, &err.render().to_string())?;
                    if err.exit_code() == 0 {
                        return Ok(Dispatched::Usage);
                    }
                    warn!("'{}' rejected arguments: {:?}", command.name(), err.kind());
                    Ok(Dispatched::Rejected)
                }
            }
        }
        Invocation::PositionalSplit { callback, .. } => {
            let tokens: Vec<String> = tokens.map(str::to_string).collect();
            debug!(
                "invoking '{}' with {} positional argument(s)",
                command.name(),
                tokens.len()
            );
            callback(ctx, &tokens)?;
            Ok(Dispatched::Invoked)
        }
    }
}

/// Write `text` followed by a newline unless it already ends with one.
pub(crate) fn write_block(out: &mut dyn Write, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}
