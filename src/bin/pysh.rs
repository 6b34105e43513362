//! Demo shell.
//!
//! Registers a few sample commands, injects `included_object` into the
//! namespace and runs either interactively or over a script file.

use std::path::PathBuf;
use std::process::exit;

use clap::{Arg, ArgAction, Parser};
use serde::Serialize;
use serde_json::json;

use pysh::{Command, Pysh, ShellConfig, ShellError};

/// Interactive demo shell
#[derive(Debug, Parser)]
#[command(name = "pysh", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Input prompt override
    #[arg(short, long, value_name = "TEXT")]
    prompt: Option<String>,

    /// Script to execute instead of the interactive loop
    script: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct IncludedObject {
    property_int: i64,
    param_list: Vec<serde_json::Value>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    if let Err(e) = try_main() {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        exit(1);
    }
}

fn try_main() -> Result<(), ShellError> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    if let Some(prompt) = cli.prompt {
        config.prompt = Some(prompt);
    }

    let mut shell = Pysh::new(config);
    register_demo_commands(&mut shell)?;
    shell.inject(
        "included_object",
        &IncludedObject {
            property_int: 1,
            param_list: vec![json!("first entry in list"), json!(2), json!(3)],
        },
    )?;

    match cli.script {
        Some(script) => shell.run_script(script),
        None => shell.run(),
    }
}

fn register_demo_commands(shell: &mut Pysh) -> Result<(), ShellError> {
    shell.register(
        Command::positional("echo", |ctx, args| {
            writeln!(ctx.out, "{}", args.join(" "))?;
            Ok(())
        })
        .about("Print the arguments."),
    )?;

    let greet_parser = clap::Command::new("greet")
        .about("Greet someone.")
        .arg(Arg::new("name").required(true).help("Who to greet"))
        .arg(
            Arg::new("loud")
                .long("loud")
                .short('l')
                .action(ArgAction::SetTrue)
                .help("Shout the greeting"),
        );
    shell.add_parsed_command("greet", greet_parser, |ctx, matches| {
        let name = matches
            .get_one::<String>("name")
            .map(String::as_str)
            .unwrap_or_default();
        let greeting = format!("hi {}", name);
        if matches.get_flag("loud") {
            writeln!(ctx.out, "{}!", greeting.to_uppercase())?;
        } else {
            writeln!(ctx.out, "{}", greeting)?;
        }
        Ok(())
    })?;

    shell.register(
        Command::positional("sum", |ctx, args| {
            let mut total = 0.0;
            for arg in args {
                total += arg
                    .parse::<f64>()
                    .map_err(|_| ShellError::failed(format!("not a number: {}", arg)))?;
            }
            writeln!(ctx.out, "{}", total)?;
            Ok(())
        })
        .about("Add up numbers.")
        .usage("<number>..."),
    )?;

    Ok(())
}
