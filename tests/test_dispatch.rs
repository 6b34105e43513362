//! Command dispatch tests.
//!
//! Tests positional splitting, the `-h` usage short-circuit, structured
//! parsing with clap and error reporting through the session.

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

#[allow(clippy::duplicate_mod)]
#[path = "helpers.rs"]
mod helpers;

use fixtures::CallLog;

// ============================================================================
// Positional Commands
// ============================================================================

#[test]
fn test_positional_args_split_on_whitespace() {
    let log = CallLog::new();
    let mut shell = fixtures::demo_shell(&log);

    helpers::run_session(&mut shell, "record a b c\nrecord   spaced\t out \nrecord\n");

    assert_eq!(
        log.calls(),
        [
            ("record".to_string(), vec!["a".to_string(), "b".into(), "c".into()]),
            ("record".to_string(), vec!["spaced".to_string(), "out".into()]),
            ("record".to_string(), vec![]),
        ]
    );
}

#[test]
fn test_usage_flag_never_invokes_callback() {
    let test_cases = [
        // (input, expected output)
        ("record -h", "Record the arguments.\n"),
        ("fail -h", "Usage: fail [anything]\n"),
    ];

    for (input, expected) in test_cases {
        let log = CallLog::new();
        let mut shell = fixtures::demo_shell(&log);
        let output = helpers::run_session(&mut shell, input);
        assert_eq!(helpers::without_exit_message(&output), expected, "input: {input}");
        assert!(log.calls().is_empty(), "callback invoked for {input}");
    }
}

#[test]
fn test_usage_flag_must_match_exactly() {
    let log = CallLog::new();
    let mut shell = fixtures::demo_shell(&log);

    helpers::run_session(&mut shell, "record -h extra\nrecord --h\n");

    assert_eq!(log.count("record"), 2);
    assert_eq!(log.calls()[0].1, ["-h", "extra"]);
}

// ============================================================================
// Structured Commands
// ============================================================================

#[test]
fn test_parsed_command_receives_matches() {
    let log = CallLog::new();
    let mut shell = fixtures::demo_shell(&log);

    let output = helpers::run_session(&mut shell, "hello world\nhello --loud ada\n");

    helpers::assert_contains_all(&output, &["hello world\n", "HELLO ADA!\n"]);
    assert_eq!(log.count("hello"), 2);
}

#[test]
fn test_parsed_command_usage_is_parser_help() {
    let log = CallLog::new();
    let mut shell = fixtures::demo_shell(&log);

    let output = helpers::run_session(&mut shell, "hello -h\n");

    helpers::assert_contains_all(&output, &["Say hello to someone.", "--loud", "<name>"]);
    assert_eq!(log.count("hello"), 0);
}

#[test]
fn test_parse_failure_reported_and_session_continues() {
    let log = CallLog::new();
    let mut shell = fixtures::demo_shell(&log);

    let output = helpers::run_session(&mut shell, "hello\nhello --bogus x\nhello again\n");

    helpers::assert_contains_all(&output, &["error:", "hello again\n"]);
    helpers::assert_contains_none(&output, &["Error: "]);
    assert_eq!(log.calls(), [("hello".to_string(), vec!["again".to_string()])]);
}

// ============================================================================
// Error Reporting
// ============================================================================

#[test]
fn test_callback_error_does_not_end_session() {
    let log = CallLog::new();
    let mut shell = fixtures::demo_shell(&log);

    let output = helpers::run_session(&mut shell, "fail now\nrecord after\n");

    assert_eq!(
        helpers::without_exit_message(&output),
        "Error: device not ready\n"
    );
    assert_eq!(log.count("record"), 1);
}

#[test]
fn test_unknown_command_reported() {
    let log = CallLog::new();
    let mut shell = fixtures::demo_shell(&log);

    let output = helpers::run_session(&mut shell, "frobnicate 1 2\n");

    helpers::assert_contains_all(
        &output,
        &["Error: Unknown command: frobnicate\n", "Type `h`"],
    );
}
