//! Value types for declared defaults, parsed tokens, and resolved parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A resolved parameter value.
///
/// Values given on the command line are always strings. Default values may be
/// any of the variants, so a command can declare `--retries` with a default of
/// `Integer(3)` and still receive `String("5")` when the option is passed.
///
/// # Examples
///
/// ```
/// use console_kit_core::Value;
///
/// let v = Value::from("json");
/// assert_eq!(v.as_str(), Some("json"));
/// assert_eq!(Value::from(true).to_string(), "true");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
}

impl Value {
    /// Returns the string contents, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns `true` if this value can satisfy an option that requires one.
    ///
    /// Empty strings, `false` and numeric zero carry no value. The text
    /// `"0"` does.
    pub fn is_usable(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty(),
            Value::Integer(i) => *i != 0,
            Value::Float(x) => *x != 0.0,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

/// An option as it appeared on the command line.
///
/// `--verbose` is stored as [`RawValue::Present`], `--format=json` as
/// `RawValue::Text("json")`. An explicit empty value (`--format=`) is
/// `RawValue::Text("")`, which is distinct from `Present`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// The option was given without `=value`.
    Present,
    /// The option was given with `=value`.
    Text(String),
}

impl RawValue {
    /// Returns the text after `=`, if there was one.
    pub fn text(&self) -> Option<&str> {
        match self {
            RawValue::Present => None,
            RawValue::Text(s) => Some(s),
        }
    }
}
