//! Property bags describing a conversion.
//!
//! Converters receive the source format, the document name and any
//! conversion options as one flat bag. Options specific to a single format
//! are namespaced (`profile.values_per_line`).

use indexmap::IndexMap;

/// A scalar property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    String(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// A bag of properties describing some data.
pub type Properties = IndexMap<String, Value>;

/// Well-known property keys.
pub mod keys {
    /// Format name of the data (`csv`, `prof`, `xy`).
    pub const FORMAT: &str = "format";
    /// Document name; the dispatcher sets it to the input file stem.
    pub const NAME: &str = "name";
    /// Number of table rows carried by the output.
    pub const ROWS: &str = "rows";
    /// Number of table columns carried by the output.
    pub const COLUMNS: &str = "columns";
    /// Values written per line inside a profile column block.
    pub const VALUES_PER_LINE: &str = "profile.values_per_line";
    /// Reject profile columns whose length disagrees with the header.
    pub const STRICT: &str = "profile.strict";
}

/// Extension trait for building and reading Properties ergonomically.
pub trait PropertiesExt {
    fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self;

    /// String property, if present and a string.
    fn get_str(&self, key: &str) -> Option<&str>;

    /// Boolean property, falling back to `default` when absent or mistyped.
    fn get_bool_or(&self, key: &str, default: bool) -> bool;
}

impl PropertiesExt for Properties {
    fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key.into(), value.into());
        self
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }
}
