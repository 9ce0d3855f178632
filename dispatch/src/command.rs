//! Commands: a name, a declared parameter contract, and a handler.
//!
//! A [`Command`] owns its [`ArgumentDefinition`]s and [`OptionDefinition`]s.
//! When the [`Application`] dispatches to it, those definitions are bound in
//! place, so after a run they report what the command actually received.
//!
//! The declarative part of a command, [`CommandContract`], serializes to and
//! from YAML or JSON so contracts can live outside the code that handles them.
//!
//! # Examples
//!
//! ```
//! use console_kit_core::{ArgumentDefinition, OptionDefinition};
//! use console_kit_dispatch::Command;
//!
//! let command = Command::new("cmd")
//!     .with_argument(ArgumentDefinition::required("a"))
//!     .with_argument(ArgumentDefinition::optional("b"))
//!     .with_option(OptionDefinition::long("o1"))
//!     .with_option(OptionDefinition::long("o2").value_required());
//!
//! assert_eq!(command.usage(), "cmd a [b] [--o1[=value]] [--o2=value]");
//! ```

use std::fmt;
use std::rc::Rc;

use console_kit_core::{
    ArgumentDefinition, ArgumentMode, ConfigurationError, OptionDefinition, OptionValueMode,
    Parameter, Value,
};
use serde::{Deserialize, Serialize};

use crate::application::Application;
use crate::error::Result;
use crate::io::{Input, Output};

/// Function run when a command is dispatched.
///
/// Receives the dispatching application, the output sink, the input source,
/// and the bound parameters.
pub type Handler =
    Rc<dyn Fn(&Application, &mut dyn Output, &mut dyn Input, &Parameter) -> Result<()>>;

/// Declarative part of a command.
///
/// # Examples
///
/// ```
/// use console_kit_dispatch::CommandContract;
///
/// let contract = CommandContract::from_yaml_str(r#"
/// name: copy
/// description: Copy a file
/// arguments:
///   - name: source
///     required: required
///   - name: dest
/// options:
///   - name: f
///     flag: true
/// "#).unwrap();
///
/// assert_eq!(contract.name, "copy");
/// assert_eq!(contract.arguments.len(), 2);
/// assert!(contract.options[0].is_flag_option());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandContract {
    /// Name the command is registered and invoked under.
    pub name: String,
    /// One-line description shown by `help`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Positional arguments in binding order.
    #[serde(default)]
    pub arguments: Vec<ArgumentDefinition>,
    /// Named options.
    #[serde(default)]
    pub options: Vec<OptionDefinition>,
}

impl CommandContract {
    /// Parses a contract from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Yaml`](crate::ConsoleError::Yaml) if the document is
    /// malformed or a declaration fails its construction checks.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a contract from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Json`](crate::ConsoleError::Json) if the document is
    /// malformed or a declaration fails its construction checks.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A runnable command.
#[derive(Clone)]
pub struct Command {
    name: String,
    description: Option<String>,
    arguments: Vec<ArgumentDefinition>,
    options: Vec<OptionDefinition>,
    handler: Option<Handler>,
    prepared: bool,
}

impl Command {
    /// Creates a command with no parameters and no handler.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            arguments: Vec::new(),
            options: Vec::new(),
            handler: None,
            prepared: false,
        }
    }

    /// Creates a command from a contract.
    pub fn from_contract(contract: CommandContract) -> Self {
        Self {
            name: contract.name,
            description: contract.description,
            arguments: contract.arguments,
            options: contract.options,
            handler: None,
            prepared: false,
        }
    }

    /// Returns the declarative part of this command.
    pub fn contract(&self) -> CommandContract {
        CommandContract {
            name: self.name.clone(),
            description: self.description.clone(),
            arguments: self.arguments.clone(),
            options: self.options.clone(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Appends a positional argument.
    pub fn with_argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Adds an option, replacing any option with the same name.
    pub fn with_option(mut self, option: OptionDefinition) -> Self {
        self.push_option(option);
        self
    }

    /// Sets the function run when the command is dispatched.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Application, &mut dyn Output, &mut dyn Input, &Parameter) -> Result<()> + 'static,
    {
        self.handler = Some(Rc::new(handler));
        self
    }

    /// Appends a positional argument.
    pub fn add_argument(&mut self, name: &str, mode: ArgumentMode, default_value: Option<Value>) {
        self.arguments
            .push(ArgumentDefinition::new(name, mode, default_value));
    }

    /// Adds an option, replacing any option with the same name.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the option fails its construction
    /// checks, such as a flag option with a multi-character name.
    pub fn add_option(
        &mut self,
        name: &str,
        value_mode: OptionValueMode,
        default_value: Option<Value>,
        flag_option: bool,
    ) -> std::result::Result<(), ConfigurationError> {
        let option = OptionDefinition::new(name, value_mode, default_value, flag_option)?;
        self.push_option(option);
        Ok(())
    }

    fn push_option(&mut self, option: OptionDefinition) {
        match self.options.iter_mut().find(|o| o.name() == option.name()) {
            Some(existing) => *existing = option,
            None => self.options.push(option),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn arguments(&self) -> &[ArgumentDefinition] {
        &self.arguments
    }

    pub fn arguments_mut(&mut self) -> &mut [ArgumentDefinition] {
        &mut self.arguments
    }

    pub fn options(&self) -> &[OptionDefinition] {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut [OptionDefinition] {
        &mut self.options
    }

    /// Finds a declared option by name.
    pub fn option(&self, name: &str) -> Option<&OptionDefinition> {
        self.options.iter().find(|o| o.name() == name)
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    /// Marks the command as attached to an application.
    pub fn prepare(&mut self) {
        self.prepared = true;
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Builds the usage line: name, arguments, then options.
    ///
    /// Optional arguments are bracketed. Options are always bracketed, and
    /// the `=value` part is bracketed again when the value is optional.
    pub fn usage(&self) -> String {
        let mut parts = vec![self.name.clone()];

        for argument in &self.arguments {
            if argument.is_required() {
                parts.push(argument.name().to_string());
            } else {
                parts.push(format!("[{}]", argument.name()));
            }
        }

        for option in &self.options {
            let value = if option.is_value_required() {
                "=value"
            } else {
                "[=value]"
            };
            parts.push(format!("[{}{}{value}]", option.dashes(), option.name()));
        }

        parts.join(" ")
    }

    /// Runs the handler, if there is one.
    ///
    /// # Errors
    ///
    /// Returns whatever error the handler reports.
    pub fn run(
        &self,
        application: &Application,
        output: &mut dyn Output,
        input: &mut dyn Input,
        parameter: &Parameter,
    ) -> Result<()> {
        match &self.handler {
            Some(handler) => handler(application, output, input, parameter),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .field("options", &self.options)
            .field("has_handler", &self.handler.is_some())
            .field("prepared", &self.prepared)
            .finish()
    }
}
