//! Parse state plus the definitions most recently bound against it.
//!
//! [`Parameter`] is what a command handler receives: it answers "what was the
//! command name", "what is argument `x`", and "what is option `y`". The
//! dispatcher uses the command-name toggles to decide whether the first
//! positional token selects a command or is ordinary argument 0.

use std::collections::BTreeMap;

use tracing::debug;

use crate::binder;
use crate::definition::{ArgumentDefinition, OptionDefinition};
use crate::error::BindingError;
use crate::parser::{RawParseResult, parse_tokens};
use crate::value::Value;

/// Parsed command line and bound parameter state.
///
/// # Examples
///
/// ```
/// use console_kit_core::{ArgumentDefinition, OptionDefinition, Parameter, Value};
///
/// let mut parameter = Parameter::new(["app", "copy", "a.txt", "--force"]);
/// assert_eq!(parameter.command_name(), Some("copy"));
///
/// let mut arguments = vec![ArgumentDefinition::required("source")];
/// let mut options = vec![OptionDefinition::long("force")];
/// parameter.bind_arguments(&mut arguments).unwrap();
/// parameter.bind_options(&mut options).unwrap();
///
/// assert_eq!(parameter.get_argument("source"), Some(Value::from("a.txt")));
/// assert_eq!(parameter.get_option("force"), Some(Value::Bool(true)));
/// ```
#[derive(Debug, Clone)]
pub struct Parameter {
    parameters: Vec<String>,
    raw: RawParseResult,
    command_name_enabled: bool,
    command_arguments: Vec<ArgumentDefinition>,
    command_options: Vec<OptionDefinition>,
}

impl Default for Parameter {
    fn default() -> Self {
        Self {
            parameters: Vec::new(),
            raw: RawParseResult::default(),
            command_name_enabled: true,
            command_arguments: Vec::new(),
            command_options: Vec::new(),
        }
    }
}

impl Parameter {
    /// Creates a parameter set from a full argument vector.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parameter = Self::default();
        parameter.set_parameters(tokens);
        parameter
    }

    /// Creates a parameter set from the current process arguments.
    pub fn from_env() -> Self {
        Self::new(std::env::args())
    }

    /// Replaces the parse state with a fresh parse of `tokens`.
    ///
    /// The first token is the script name. Command-name mode is re-enabled.
    /// Definitions bound earlier stay attached until the next bind.
    pub fn set_parameters<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        self.raw = parse_tokens(&tokens);
        self.parameters = tokens.into_iter().skip(1).collect();
        self.command_name_enabled = true;
    }

    /// Raw tokens after the script name.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn raw(&self) -> &RawParseResult {
        &self.raw
    }

    pub fn script_name(&self) -> &str {
        self.raw.script_name()
    }

    pub fn command_name(&self) -> Option<&str> {
        self.raw.command_name()
    }

    pub fn is_command_name_enabled(&self) -> bool {
        self.command_name_enabled
    }

    /// Folds the command name back into the positional arguments as index 0.
    ///
    /// Calling this again while disabled changes nothing.
    pub fn disable_command_name(&mut self) {
        if self.command_name_enabled {
            if let Some(name) = &self.raw.command_name {
                self.raw.positional.insert(0, name.clone());
                debug!(command = %name, "Command name folded into arguments");
            }
        }
        self.command_name_enabled = false;
    }

    /// Removes the command name from the front of the positional arguments.
    ///
    /// Only removes argument 0 if it is the folded-back command name.
    pub fn enable_command_name(&mut self) {
        if !self.command_name_enabled {
            if let Some(name) = &self.raw.command_name {
                if self.raw.positional.first() == Some(name) {
                    self.raw.positional.remove(0);
                    debug!(command = %name, "Command name removed from arguments");
                }
            }
        }
        self.command_name_enabled = true;
    }

    /// Binds `arguments` in place and keeps a copy for lookups.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::MissingRequiredArgument`] if a required
    /// argument was not given.
    pub fn bind_arguments(
        &mut self,
        arguments: &mut [ArgumentDefinition],
    ) -> Result<(), BindingError> {
        let result = binder::bind_arguments(&self.raw, arguments);
        self.command_arguments = arguments.to_vec();
        result
    }

    /// Binds `options` in place and keeps a copy for lookups.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::MissingRequiredOptionValue`] if an option that
    /// needs a value was passed without one.
    pub fn bind_options(&mut self, options: &mut [OptionDefinition]) -> Result<(), BindingError> {
        let result = binder::bind_options(&self.raw, options);
        self.command_options = options.to_vec();
        result
    }

    /// Bound arguments in declaration order.
    pub fn command_arguments(&self) -> &[ArgumentDefinition] {
        &self.command_arguments
    }

    /// Bound options in declaration order.
    pub fn command_options(&self) -> &[OptionDefinition] {
        &self.command_options
    }

    /// Value of a bound argument, or `None` if no such argument is declared.
    pub fn get_argument(&self, name: &str) -> Option<Value> {
        self.command_arguments
            .iter()
            .find(|argument| argument.name() == name)
            .and_then(ArgumentDefinition::value)
    }

    /// Values of all bound arguments, keyed by name.
    pub fn get_arguments(&self) -> BTreeMap<String, Option<Value>> {
        self.command_arguments
            .iter()
            .map(|argument| (argument.name().to_string(), argument.value()))
            .collect()
    }

    /// Value of a bound option, or `None` if no such option is declared.
    ///
    /// An option passed bare with no default resolves to `true`.
    pub fn get_option(&self, name: &str) -> Option<Value> {
        self.command_options
            .iter()
            .find(|option| option.name() == name)
            .and_then(OptionDefinition::resolved_value)
    }

    /// Values of all bound options, keyed by name.
    pub fn get_options(&self) -> BTreeMap<String, Option<Value>> {
        self.command_options
            .iter()
            .map(|option| (option.name().to_string(), option.resolved_value()))
            .collect()
    }

    /// Bound values as `{"arguments": {...}, "options": {...}}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "arguments": self.get_arguments(),
            "options": self.get_options(),
        })
    }
}
