//! Shell configuration.
//!
//! `ShellConfig` carries everything a shell is constructed from: the namespace
//! entries to inject, the prompt override, the banner messages and the line
//! editor settings. It can be built in code or loaded from a TOML file:
//!
//! ```toml
//! prompt = "dev> "
//! banner = ["Device shell", "Type `h` for help"]
//! history_file = "/home/me/.pysh_history"
//! edit_mode = "vi"
//!
//! [namespace]
//! board = { name = "rev-b", channels = 4 }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::ShellError;

/// Default number of entries kept in the line editor history.
pub const DEFAULT_MAX_HISTORY: usize = 1000;

/// Line editing key bindings.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Emacs-style bindings (Ctrl-A, Ctrl-E, Ctrl-R, ...)
    #[default]
    Emacs,

    /// Vi-style modal bindings
    Vi,
}

impl From<EditMode> for rustyline::config::EditMode {
    fn from(mode: EditMode) -> Self {
        match mode {
            EditMode::Emacs => rustyline::config::EditMode::Emacs,
            EditMode::Vi => rustyline::config::EditMode::Vi,
        }
    }
}

/// Shell construction settings.
///
/// Missing TOML keys take their defaults: no prompt override, default banner,
/// no persistent history, Emacs bindings, empty namespace.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Input prompt override (default prompt is `PYSH$ `)
    pub prompt: Option<String>,

    /// Banner messages (`None` or an empty list selects the default introductory block)
    pub banner: Option<Vec<String>>,

    /// File used to load and save line editor history
    pub history_file: Option<PathBuf>,

    /// Maximum number of history entries
    pub max_history: usize,

    /// Key bindings
    pub edit_mode: EditMode,

    /// Named values injected into the session namespace at startup
    pub namespace: BTreeMap<String, Value>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: None,
            banner: None,
            history_file: None,
            max_history: DEFAULT_MAX_HISTORY,
            edit_mode: EditMode::default(),
            namespace: BTreeMap::new(),
        }
    }
}

impl ShellConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ShellError> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ShellError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ShellError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ShellError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builder method to set the input prompt override.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Builder method to replace the default banner messages.
    pub fn with_banner<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.banner = Some(messages.into_iter().map(Into::into).collect());
        self
    }

    /// Builder method to add a namespace entry.
    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.namespace.insert(name.into(), value);
        self
    }
}
