//! Session variable namespace.
//!
//! Named values injected into the session at startup. Values are stored as
//! `serde_json::Value`, so any `Serialize` type can be injected and later
//! inspected at the prompt with a bare name or a path such as `board.pins[0]`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::error::ShellError;

/// Name to value mapping visible to the session and to command callbacks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    vars: BTreeMap<String, Value>,
}

impl Namespace {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.vars.insert(name.into(), value)
    }

    /// Serialize `value` and insert it under `name`.
    pub fn inject<T: Serialize + ?Sized>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<(), ShellError> {
        let name = name.into();
        let value = to_entry(&name, value)?;
        self.vars.insert(name, value);
        Ok(())
    }

    /// Look up a top-level entry.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Look up a top-level entry for modification.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.vars.get_mut(name)
    }

    /// Remove an entry.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    /// Check if an entry exists.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Entry names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if the namespace is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Resolve a path expression against the namespace.
    ///
    /// Grammar: `name ( '.' key | '[' index ']' )*`. Negative indices count
    /// from the end of an array. Returns `None` when any segment is missing
    /// or the expression is malformed.
    pub fn resolve(&self, expr: &str) -> Option<&Value> {
        let (root, mut rest) = split_ident(expr.trim())?;
        let mut value = self.vars.get(root)?;

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('.') {
                let (key, tail) = split_ident(after)?;
                value = value.as_object()?.get(key)?;
                rest = tail;
            } else if let Some(after) = rest.strip_prefix('[') {
                let end = after.find(']')?;
                let items = value.as_array()?;
                let index = resolve_index(after[..end].trim(), items.len())?;
                value = items.get(index)?;
                rest = &after[end + 1..];
            } else {
                return None;
            }
        }

        Some(value)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Namespace {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<K: Into<String>> Extend<(K, Value)> for Namespace {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        self.vars
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}

/// Serialize `value` as the namespace entry `name`.
pub(crate) fn to_entry<T: Serialize + ?Sized>(name: &str, value: &T) -> Result<Value, ShellError> {
    serde_json::to_value(value).map_err(|source| ShellError::Inject {
        name: name.to_string(),
        source,
    })
}

/// Short name of a value's JSON kind.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Pretty-printed form of a value, as shown at the prompt.
pub fn display_value(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Split a leading identifier off `s` (up to the next `.` or `[`).
fn split_ident(s: &str) -> Option<(&str, &str)> {
    let end = s.find(['.', '[']).unwrap_or(s.len());
    let ident = &s[..end];
    if ident.is_empty() || ident.contains(char::is_whitespace) {
        return None;
    }
    Some((ident, &s[end..]))
}

fn resolve_index(raw: &str, len: usize) -> Option<usize> {
    let index: i64 = raw.parse().ok()?;
    if index < 0 {
        len.checked_sub(index.unsigned_abs() as usize)
    } else {
        Some(index as usize)
    }
}
