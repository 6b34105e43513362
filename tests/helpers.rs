//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

use pysh::{Pysh, ScriptReader, ShellError};

// ============================================================================
// Session Helpers
// ============================================================================

/// Drive an interactive session over `input` and return everything written.
pub fn run_session(shell: &mut Pysh, input: &str) -> String {
    let mut reader = ScriptReader::from_source(input);
    let mut out = Vec::new();
    shell.run_with(&mut reader, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// Drive an interactive session and also return the prompts shown.
pub fn run_session_with_prompts(shell: &mut Pysh, input: &str) -> (String, Vec<String>) {
    let mut reader = ScriptReader::from_source(input);
    let mut out = Vec::new();
    shell.run_with(&mut reader, &mut out).unwrap();
    (String::from_utf8(out).unwrap(), reader.prompts().to_vec())
}

/// Execute `source` in batch mode, returning the result and the output.
pub fn run_script(shell: &mut Pysh, source: &str) -> (Result<(), ShellError>, String) {
    let mut out = Vec::new();
    let result = shell.run_source(source, &mut out);
    (result, String::from_utf8(out).unwrap())
}

/// Output of a session without the trailing exit message.
pub fn without_exit_message(output: &str) -> &str {
    output
        .strip_suffix(&format!("{}\n", pysh::shell::EXIT_MESSAGE))
        .unwrap_or(output)
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert output contains all expected strings.
pub fn assert_contains_all(output: &str, expected: &[&str]) {
    for s in expected {
        assert!(
            output.contains(s),
            "Expected output to contain '{}'\nActual: {}",
            s,
            output
        );
    }
}

/// Assert output contains none of the given strings.
pub fn assert_contains_none(output: &str, unexpected: &[&str]) {
    for s in unexpected {
        assert!(
            !output.contains(s),
            "Expected output NOT to contain '{}'\nActual: {}",
            s,
            output
        );
    }
}
