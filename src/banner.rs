//! Startup banner.
//!
//! A bordered block of messages shown when the interactive session starts:
//!
//! ```text
//! * ******************************************************************************
//! * PYSH interactive shell
//! * ...
//! * ******************************************************************************
//! ```

/// Total width of a border line, including the leading `* `.
pub const BANNER_WIDTH: usize = 80;

/// Messages used when no custom banner is supplied.
pub const DEFAULT_MESSAGES: [&str; 4] = [
    "PYSH interactive shell",
    "You may leave this shell by typing `exit`, `q` or pressing Ctrl+D",
    "Type `h <Command>` to get usage information for a given command,",
    "or `h` for looking into a brief description of all commands.",
];

/// Banner message list, rendered on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    messages: Vec<String>,
}

impl Default for Banner {
    fn default() -> Self {
        Self::with_messages(DEFAULT_MESSAGES)
    }
}

impl Banner {
    /// Create a banner from custom messages.
    ///
    /// `None` and an empty list both select the default block. Use
    /// `with_messages` with no messages for a banner that renders nothing.
    pub fn new(messages: Option<Vec<String>>) -> Self {
        match messages {
            Some(messages) if !messages.is_empty() => Self { messages },
            _ => Self::default(),
        }
    }

    /// Create a banner from the given messages.
    pub fn with_messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a message.
    pub fn add_message(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    /// Current messages in order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Render the banner.
    ///
    /// Returns the empty string when there are no messages; otherwise a border
    /// line, one `* <message>` line per message and a closing border, each
    /// newline-terminated.
    pub fn render(&self) -> String {
        if self.messages.is_empty() {
            return String::new();
        }

        let border = format!("* {}\n", "*".repeat(BANNER_WIDTH - 2));
        let mut out = border.clone();
        for msg in &self.messages {
            out.push_str("* ");
            out.push_str(msg);
            out.push('\n');
        }
        out.push_str(&border);
        out
    }
}
