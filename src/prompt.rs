//! Prompt customization.
//!
//! The session asks a `Prompts` implementation for its three prompts on every
//! read: the input prompt, the continuation prompt for lines joined with a
//! trailing `\`, and the output prompt written before a displayed value.

use std::borrow::Cow;

/// Default input prompt.
pub const DEFAULT_INPUT_PROMPT: &str = "PYSH$ ";

/// Continuation prompt (fixed, independent of the input prompt width).
pub const CONTINUATION_PROMPT: &str = "   ";

/// Output prompt (empty: no prefix before displayed values).
pub const OUTPUT_PROMPT: &str = "";

/// Per-session attributes readable by prompt providers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionAttributes {
    /// Input prompt override attached to the session
    pub simple_prompt: Option<String>,
}

/// Prompt provider trait.
pub trait Prompts {
    /// Prompt shown when reading a new input line.
    fn input_prompt<'a>(&'a self, session: &'a SessionAttributes) -> Cow<'a, str>;

    /// Prompt shown when reading a continuation line.
    ///
    /// `width` is the character width of the current input prompt.
    fn continuation_prompt<'a>(&'a self, session: &'a SessionAttributes, width: usize)
    -> Cow<'a, str>;

    /// Prefix written before a displayed value.
    fn output_prompt(&self) -> Cow<'_, str>;
}

/// Default prompts: `PYSH$ ` (or the session override), three spaces, nothing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ShellPrompts;

impl Prompts for ShellPrompts {
    fn input_prompt<'a>(&'a self, session: &'a SessionAttributes) -> Cow<'a, str> {
        match &session.simple_prompt {
            Some(prompt) => Cow::Borrowed(prompt.as_str()),
            None => Cow::Borrowed(DEFAULT_INPUT_PROMPT),
        }
    }

    fn continuation_prompt<'a>(
        &'a self,
        _session: &'a SessionAttributes,
        _width: usize,
    ) -> Cow<'a, str> {
        Cow::Borrowed(CONTINUATION_PROMPT)
    }

    fn output_prompt(&self) -> Cow<'_, str> {
        Cow::Borrowed(OUTPUT_PROMPT)
    }
}
