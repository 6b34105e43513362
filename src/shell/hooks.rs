//! Session event hooks.
//!
//! Extension point called by the session after every evaluated input line.
//! The default implementation does nothing; implement `SessionHooks` to add
//! per-command telemetry, auditing or state sync.

/// How an evaluated line ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Evaluated without error
    Success,

    /// Evaluation reported an error (already shown to the user)
    Failed,

    /// The line ended the session
    Exit,
}

/// Record of one evaluated input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution<'a> {
    /// Input line as evaluated (continuations joined)
    pub line: &'a str,

    /// Evaluation outcome
    pub outcome: Outcome,
}

/// Session event hook trait.
pub trait SessionHooks {
    /// Called after each non-empty input line has been evaluated.
    fn post_execute(&mut self, _execution: &Execution<'_>) {}
}

/// Hooks that do nothing.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoopHooks;

impl SessionHooks for NoopHooks {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(usize);

    impl SessionHooks for Counter {
        fn post_execute(&mut self, execution: &Execution<'_>) {
            if execution.outcome == Outcome::Success {
                self.0 += 1;
            }
        }
    }

    #[test]
    fn test_override_post_execute() {
        let mut hooks = Counter(0);
        hooks.post_execute(&Execution {
            line: "status",
            outcome: Outcome::Success,
        });
        hooks.post_execute(&Execution {
            line: "bogus",
            outcome: Outcome::Failed,
        });
        assert_eq!(hooks.0, 1);
    }

    #[test]
    fn test_noop_hooks() {
        let mut hooks = NoopHooks;
        hooks.post_execute(&Execution {
            line: "status",
            outcome: Outcome::Success,
        });
    }
}
