//! Session integration tests.
//!
//! Tests the startup sequence, the banner, prompts, exit handling, the
//! namespace and post-execution hooks through the public `Pysh` API.

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

#[allow(clippy::duplicate_mod)]
#[path = "helpers.rs"]
mod helpers;

use std::cell::RefCell;
use std::rc::Rc;

use fixtures::CallLog;
use pysh::{Banner, Command, Execution, Outcome, Pysh, SessionHooks, ShellConfig};
use serde::Serialize;

// ============================================================================
// End-to-End Scenarios
// ============================================================================

#[test]
fn test_greet_end_to_end() {
    let log = CallLog::new();
    let mut shell = fixtures::demo_shell(&log);

    let output = helpers::run_session(&mut shell, "greet world\ngreet -h\n");

    assert_eq!(
        helpers::without_exit_message(&output),
        "hi world\nSay hi.\n"
    );
    assert_eq!(log.count("greet"), 1);
}

#[test]
fn test_custom_banner_renders_four_lines() {
    let mut shell = Pysh::new(ShellConfig::default().with_banner(["line1", "line2"]));
    let border = format!("* {}", "*".repeat(78));

    let rendered = shell.banner().render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines, [border.as_str(), "* line1", "* line2", border.as_str()]);
    assert_eq!(border.len(), 80);

    let output = helpers::run_session(&mut shell, "exit\n");
    assert_eq!(output, format!("{}Leaving PYSH interactive...\n", rendered));
}

#[test]
fn test_default_banner_shown() {
    let mut shell = Pysh::default();

    let output = helpers::run_session(&mut shell, "");

    helpers::assert_contains_all(&output, &["* PYSH interactive shell\n", "`h`"]);
}

#[test]
fn test_banner_message_added_before_run() {
    let mut shell = Pysh::new(ShellConfig::default().with_banner(["first"]));
    shell.add_banner_message("second");

    let output = helpers::run_session(&mut shell, "");

    helpers::assert_contains_all(&output, &["* first\n* second\n"]);
}

// ============================================================================
// Exit and Prompts
// ============================================================================

#[test]
fn test_exit_words() {
    for word in ["exit", "quit", "q"] {
        let log = CallLog::new();
        let mut shell = fixtures::demo_shell(&log);
        let input = format!("{word}\nrecord unreachable\n");

        let output = helpers::run_session(&mut shell, &input);

        assert_eq!(output, "Leaving PYSH interactive...\n", "exit word: {word}");
        assert_eq!(log.count("record"), 0);
    }
}

#[test]
fn test_default_and_override_prompts() {
    let log = CallLog::new();
    let mut shell = fixtures::demo_shell(&log);
    let (_, prompts) = helpers::run_session_with_prompts(&mut shell, "record\n");
    assert_eq!(prompts, ["PYSH$ ", "PYSH$ "]);

    let mut shell = Pysh::new(ShellConfig::default().with_prompt("dev> "));
    let (_, prompts) = helpers::run_session_with_prompts(&mut shell, "record \\\nmore\n");
    assert_eq!(prompts, ["dev> ", "   ", "dev> "]);
}

// ============================================================================
// Namespace
// ============================================================================

#[derive(Serialize)]
struct IncludedObject {
    property_int: i64,
    param_list: Vec<serde_json::Value>,
}

#[test]
fn test_injected_object_visible_at_prompt() {
    let log = CallLog::new();
    let mut shell = fixtures::demo_shell(&log);
    shell
        .inject(
            "included_object",
            &IncludedObject {
                property_int: 1,
                param_list: vec!["first entry in list".into(), 2.into(), 3.into()],
            },
        )
        .unwrap();

    let output = helpers::run_session(
        &mut shell,
        "included_object.property_int\nincluded_object.param_list[0]\nwho\n",
    );

    assert_eq!(
        helpers::without_exit_message(&output),
        "1\n\"first entry in list\"\nincluded_object\n"
    );
}

#[test]
fn test_callbacks_share_session_namespace() {
    let mut shell = Pysh::default();
    shell.set_banner(Banner::with_messages(Vec::<String>::new()));
    shell.inject("count", &0).unwrap();
    shell
        .register(Command::positional("bump", |ctx, _args| {
            let next = ctx
                .namespace
                .get("count")
                .and_then(serde_json::Value::as_i64)
                .unwrap_or(0)
                + 1;
            ctx.namespace.insert("count", next.into());
            writeln!(ctx.out, "{}", next)?;
            Ok(())
        }))
        .unwrap();

    let output = helpers::run_session(&mut shell, "bump\nbump\ncount\n");
    assert_eq!(helpers::without_exit_message(&output), "1\n2\n2\n");

    // Every run starts from the injected mapping again
    let output = helpers::run_session(&mut shell, "count\n");
    assert_eq!(helpers::without_exit_message(&output), "0\n");
}

// ============================================================================
// Hooks
// ============================================================================

#[derive(Clone, Default)]
struct Audit(Rc<RefCell<Vec<(String, Outcome)>>>);

impl SessionHooks for Audit {
    fn post_execute(&mut self, execution: &Execution<'_>) {
        self.0
            .borrow_mut()
            .push((execution.line.to_string(), execution.outcome));
    }
}

#[test]
fn test_post_execute_hook_sees_each_line() {
    let log = CallLog::new();
    let mut shell = fixtures::demo_shell(&log);
    let audit = Audit::default();
    shell.set_hooks(audit.clone());

    helpers::run_session(&mut shell, "record 1\n\nfail\nq\n");

    assert_eq!(
        *audit.0.borrow(),
        [
            ("record 1".to_string(), Outcome::Success),
            ("fail".to_string(), Outcome::Failed),
            ("q".to_string(), Outcome::Exit),
        ]
    );
}
