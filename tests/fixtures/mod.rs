//! Test fixtures for pysh integration tests.
//!
//! Provides:
//! - `CallLog`: shared record of the arguments each command was invoked with
//! - `recording_command`: positional command that records its arguments
//! - `greet_parser`: sample `clap` parser
//! - `demo_shell`: shell with a small command set and no banner

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use clap::{Arg, ArgAction};
use pysh::{Banner, Command, Pysh, ShellError};

// ============================================================================
// CallLog - Invocation Recorder
// ============================================================================

/// Shared list of recorded invocations.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<(String, Vec<String>)>>>);

impl CallLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one invocation.
    pub fn record(&self, name: &str, args: Vec<String>) {
        self.0.borrow_mut().push((name.to_string(), args));
    }

    /// All recorded invocations in order.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.0.borrow().clone()
    }

    /// Number of invocations of `name`.
    pub fn count(&self, name: &str) -> usize {
        self.0.borrow().iter().filter(|(n, _)| n == name).count()
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Positional command that records its arguments and prints nothing.
pub fn recording_command(name: &str, log: &CallLog) -> Command {
    let log = log.clone();
    let recorded = name.to_string();
    Command::positional(name, move |_ctx, args| {
        log.record(&recorded, args.to_vec());
        Ok(())
    })
    .about("Record the arguments.")
}

/// `greet <name> [--loud]`
pub fn greet_parser() -> clap::Command {
    clap::Command::new("hello")
        .about("Say hello to someone.")
        .arg(Arg::new("name").required(true).help("Who to greet"))
        .arg(
            Arg::new("loud")
                .long("loud")
                .action(ArgAction::SetTrue)
                .help("Shout"),
        )
}

/// Shell with `greet`, `hello`, `record` and `fail`, and an empty banner.
pub fn demo_shell(log: &CallLog) -> Pysh {
    let mut shell = Pysh::default();
    shell.set_banner(Banner::with_messages(Vec::<String>::new()));

    let greet_log = log.clone();
    shell
        .register(
            Command::positional("greet", move |ctx, args| {
                greet_log.record("greet", args.to_vec());
                writeln!(ctx.out, "hi {}", args.join(" "))?;
                Ok(())
            })
            .about("Say hi."),
        )
        .unwrap();

    let hello_log = log.clone();
    shell
        .add_parsed_command("hello", greet_parser(), move |ctx, matches| {
            let name = matches.get_one::<String>("name").unwrap().clone();
            hello_log.record("hello", vec![name.clone()]);
            if matches.get_flag("loud") {
                writeln!(ctx.out, "HELLO {}!", name.to_uppercase())?;
            } else {
                writeln!(ctx.out, "hello {}", name)?;
            }
            Ok(())
        })
        .unwrap();

    shell.register(recording_command("record", log)).unwrap();

    shell
        .add_command(
            "fail",
            |_ctx, _args| Err(ShellError::failed("device not ready")),
            Some("[anything]"),
        )
        .unwrap();

    shell
}
