//! Argument and option declarations.
//!
//! A command declares what it accepts with [`ArgumentDefinition`]s (bound by
//! position) and [`OptionDefinition`]s (bound by name). Both carry the
//! declaration itself plus the state of the most recent bind, which the
//! [`binder`](crate::binder) resets on every run so the same definition can
//! be bound again against a fresh command line.
//!
//! Definitions serialize to and from YAML/JSON. Binding state is never
//! serialized, and deserialization applies the same checks as the typed
//! constructors.
//!
//! # Examples
//!
//! ```
//! use console_kit_core::{ArgumentDefinition, OptionDefinition, Value};
//!
//! let source = ArgumentDefinition::required("source");
//! let verbose = OptionDefinition::flag('v');
//! let format = OptionDefinition::long("format")
//!     .value_required()
//!     .with_default(Value::from("json"));
//!
//! assert!(source.is_required());
//! assert!(verbose.is_flag_option());
//! assert_eq!(format.value(), Some(Value::from("json")));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::value::{RawValue, Value};

/// Whether a positional argument must be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ArgumentMode {
    /// Binding fails if the argument is missing.
    Required,
    /// The argument may be omitted (the default).
    #[default]
    Optional,
}

impl FromStr for ArgumentMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(Self::Required),
            "optional" => Ok(Self::Optional),
            other => Err(ConfigurationError::UnknownArgumentMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for ArgumentMode {
    type Error = ConfigurationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ArgumentMode> for String {
    fn from(mode: ArgumentMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for ArgumentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::Optional => f.write_str("optional"),
        }
    }
}

/// Whether an option needs a value once it is passed.
///
/// The option itself is never mandatory on the command line; this only
/// controls what happens when it appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OptionValueMode {
    /// `--name` alone is an error; `--name=value` is expected.
    Required,
    /// `--name` and `--name=value` are both accepted (the default).
    #[default]
    Optional,
}

impl FromStr for OptionValueMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "required" => Ok(Self::Required),
            "optional" => Ok(Self::Optional),
            other => Err(ConfigurationError::UnknownOptionValueMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for OptionValueMode {
    type Error = ConfigurationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OptionValueMode> for String {
    fn from(mode: OptionValueMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for OptionValueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::Optional => f.write_str("optional"),
        }
    }
}

/// A positional argument a command accepts.
///
/// The position is not part of the declaration: it is assigned each time the
/// command's argument list is bound, and equals the definition's index in
/// that list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ArgumentDeclaration")]
pub struct ArgumentDefinition {
    name: String,
    #[serde(rename = "required")]
    mode: ArgumentMode,
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
    #[serde(skip)]
    order: Option<usize>,
    #[serde(skip)]
    provided_value: Option<String>,
    #[serde(skip)]
    has_been_provided: bool,
}

/// Serialized form of an [`ArgumentDefinition`].
#[derive(Debug, Deserialize)]
struct ArgumentDeclaration {
    name: String,
    #[serde(default)]
    required: ArgumentMode,
    #[serde(default)]
    default: Option<Value>,
}

impl TryFrom<ArgumentDeclaration> for ArgumentDefinition {
    type Error = ConfigurationError;

    fn try_from(decl: ArgumentDeclaration) -> Result<Self, Self::Error> {
        if decl.name.is_empty() {
            return Err(ConfigurationError::EmptyName);
        }
        Ok(Self::new(&decl.name, decl.required, decl.default))
    }
}

impl ArgumentDefinition {
    /// Creates an argument definition.
    pub fn new(name: &str, mode: ArgumentMode, default_value: Option<Value>) -> Self {
        Self {
            name: name.to_string(),
            mode,
            default_value,
            order: None,
            provided_value: None,
            has_been_provided: false,
        }
    }

    /// Creates a required argument.
    pub fn required(name: &str) -> Self {
        Self::new(name, ArgumentMode::Required, None)
    }

    /// Creates an optional argument.
    pub fn optional(name: &str) -> Self {
        Self::new(name, ArgumentMode::Optional, None)
    }

    /// Sets the value used when the argument is not given.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> ArgumentMode {
        self.mode
    }

    pub fn is_required(&self) -> bool {
        self.mode == ArgumentMode::Required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Position assigned by the last bind, if any.
    pub fn order(&self) -> Option<usize> {
        self.order
    }

    pub fn provided_value(&self) -> Option<&str> {
        self.provided_value.as_deref()
    }

    pub fn has_been_provided(&self) -> bool {
        self.has_been_provided
    }

    /// The provided value if there is one, otherwise the default.
    pub fn value(&self) -> Option<Value> {
        match &self.provided_value {
            Some(provided) => Some(Value::String(provided.clone())),
            None => self.default_value.clone(),
        }
    }

    /// Resets binding state and binds against the positional list.
    pub(crate) fn bind(&mut self, order: usize, positional: &[String]) {
        self.order = Some(order);
        self.provided_value = positional.get(order).cloned();
        self.has_been_provided = self.provided_value.is_some();
    }
}

/// A named option a command accepts.
///
/// Options with a single-character name may be declared as flag options,
/// which are passed with one dash and can be combined (`-abc`). All other
/// options are long options passed with two dashes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OptionDeclaration")]
pub struct OptionDefinition {
    name: String,
    #[serde(rename = "value")]
    value_mode: OptionValueMode,
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    default_value: Option<Value>,
    #[serde(rename = "flag")]
    flag_option: bool,
    #[serde(skip)]
    provided_value: Option<String>,
    #[serde(skip)]
    has_been_provided: bool,
}

/// Serialized form of an [`OptionDefinition`].
#[derive(Debug, Deserialize)]
struct OptionDeclaration {
    name: String,
    #[serde(default)]
    value: OptionValueMode,
    #[serde(default)]
    default: Option<Value>,
    #[serde(default)]
    flag: bool,
}

impl TryFrom<OptionDeclaration> for OptionDefinition {
    type Error = ConfigurationError;

    fn try_from(decl: OptionDeclaration) -> Result<Self, Self::Error> {
        Self::new(&decl.name, decl.value, decl.default, decl.flag)
    }
}

impl OptionDefinition {
    /// Creates an option definition.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyName`] for an empty name and
    /// [`ConfigurationError::FlagNameTooLong`] when `flag_option` is set on a
    /// name longer than one character.
    pub fn new(
        name: &str,
        value_mode: OptionValueMode,
        default_value: Option<Value>,
        flag_option: bool,
    ) -> Result<Self, ConfigurationError> {
        if name.is_empty() {
            return Err(ConfigurationError::EmptyName);
        }
        let mut option = Self {
            name: name.to_string(),
            value_mode,
            default_value,
            flag_option: false,
            provided_value: None,
            has_been_provided: false,
        };
        option.set_flag_option(flag_option)?;
        Ok(option)
    }

    /// Creates a long option (`--name`) with an optional value.
    pub fn long(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value_mode: OptionValueMode::Optional,
            default_value: None,
            flag_option: false,
            provided_value: None,
            has_been_provided: false,
        }
    }

    /// Creates a flag option (`-c`) with an optional value.
    pub fn flag(name: char) -> Self {
        Self {
            flag_option: true,
            ..Self::long(&name.to_string())
        }
    }

    /// Marks the option as needing a value whenever it is passed.
    pub fn value_required(mut self) -> Self {
        self.value_mode = OptionValueMode::Required;
        self
    }

    /// Sets the value used when the option is absent or passed bare.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Switches between flag and long option syntax.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::FlagNameTooLong`] when enabling flag
    /// syntax on a multi-character name.
    pub fn set_flag_option(&mut self, enabled: bool) -> Result<(), ConfigurationError> {
        if enabled && self.name.chars().count() > 1 {
            return Err(ConfigurationError::FlagNameTooLong(self.name.clone()));
        }
        self.flag_option = enabled;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_mode(&self) -> OptionValueMode {
        self.value_mode
    }

    pub fn is_value_required(&self) -> bool {
        self.value_mode == OptionValueMode::Required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn is_flag_option(&self) -> bool {
        self.flag_option
    }

    /// `-` for flag options, `--` for long options.
    pub fn dashes(&self) -> &'static str {
        if self.flag_option { "-" } else { "--" }
    }

    pub fn provided_value(&self) -> Option<&str> {
        self.provided_value.as_deref()
    }

    pub fn has_been_provided(&self) -> bool {
        self.has_been_provided
    }

    /// The provided value if there is one, otherwise the default.
    pub fn value(&self) -> Option<Value> {
        match &self.provided_value {
            Some(provided) => Some(Value::String(provided.clone())),
            None => self.default_value.clone(),
        }
    }

    /// Like [`value`](Self::value), but an option passed bare with no
    /// default resolves to `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use console_kit_core::{OptionDefinition, Parameter, Value};
    ///
    /// let mut parameter = Parameter::new(["app", "--dry-run"]);
    /// let mut options = vec![OptionDefinition::long("dry-run")];
    /// parameter.bind_options(&mut options).unwrap();
    ///
    /// assert_eq!(options[0].value(), None);
    /// assert_eq!(options[0].resolved_value(), Some(Value::Bool(true)));
    /// ```
    pub fn resolved_value(&self) -> Option<Value> {
        if self.has_been_provided && self.provided_value.is_none() && self.default_value.is_none()
        {
            return Some(Value::Bool(true));
        }
        self.value()
    }

    /// Resets binding state and binds against the matching raw option.
    pub(crate) fn bind(&mut self, raw: Option<&RawValue>) {
        self.has_been_provided = raw.is_some();
        self.provided_value = raw.and_then(RawValue::text).map(String::from);
    }
}
