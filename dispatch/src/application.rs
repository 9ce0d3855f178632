//! Command registry owner and dispatcher.
//!
//! [`Application::run`] picks the command to execute from the parsed command
//! line, binds that command's declarations, and invokes its handler.
//!
//! Command selection:
//!
//! - With default-only mode off, the first positional token names the
//!   command. If nothing is registered under that name the configured default
//!   command runs instead.
//! - With default-only mode on, the configured default command always runs and
//!   the first positional token is folded back into its arguments as index 0.
//!
//! Registry lookups take `&self` so handlers, which only get a shared
//! reference to the application, can still enumerate and resolve commands.

use std::cell::{Ref, RefCell};

use console_kit_core::{Parameter, validate_definitions};
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::config::ApplicationConfig;
use crate::error::{ConsoleError, Result};
use crate::io::{Input, Output};
use crate::registry::{CommandContainer, CommandFactory, CommandRegistry};

/// Command dispatcher.
///
/// # Examples
///
/// ```
/// use console_kit_core::{ArgumentDefinition, Parameter};
/// use console_kit_dispatch::{Application, BufferedOutput, Command, StreamInput};
///
/// let output = BufferedOutput::new();
/// let mut app = Application::new(
///     output.clone(),
///     StreamInput::new(std::io::empty()),
///     Parameter::new(["app", "greet", "world"]),
/// );
///
/// app.add_command(
///     Command::new("greet")
///         .with_argument(ArgumentDefinition::required("name"))
///         .with_handler(|_, output, _, parameter| {
///             let name = parameter.get_argument("name").map(|v| v.to_string());
///             let name = name.unwrap_or_default();
///             output.writeln(&format!("Hello, {name}!"))?;
///             Ok(())
///         }),
/// ).unwrap();
///
/// app.run().unwrap();
/// assert_eq!(output.contents(), "Hello, world!\n");
/// ```
pub struct Application {
    name: Option<String>,
    registry: RefCell<CommandRegistry>,
    factory: Box<dyn CommandFactory>,
    output: RefCell<Box<dyn Output>>,
    input: RefCell<Box<dyn Input>>,
    parameter: RefCell<Parameter>,
    default_command: Option<String>,
    only_use_default_command: bool,
    active_command: Option<String>,
}

impl Application {
    /// Creates an application with an empty registry and no default command.
    pub fn new<O, I>(output: O, input: I, parameter: Parameter) -> Self
    where
        O: Output + 'static,
        I: Input + 'static,
    {
        Self {
            name: None,
            registry: RefCell::new(CommandRegistry::new()),
            factory: Box::new(CommandContainer::new()),
            output: RefCell::new(Box::new(output)),
            input: RefCell::new(Box::new(input)),
            parameter: RefCell::new(parameter),
            default_command: None,
            only_use_default_command: false,
            active_command: None,
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the factory used to construct deferred commands.
    pub fn set_factory<F>(&mut self, factory: F)
    where
        F: CommandFactory + 'static,
    {
        self.factory = Box::new(factory);
    }

    /// Applies name, default command, and default-only mode from `config`.
    ///
    /// Fields left unset in the configuration keep their current values.
    pub fn apply_config(&mut self, config: &ApplicationConfig) {
        if let Some(name) = &config.name {
            self.set_name(name);
        }
        if let Some(default_command) = &config.default_command {
            self.set_default_command_by_name(default_command);
        }
        self.only_use_default_command = config.only_default_command;
    }

    /// Registers a command under its name, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`Configuration`](ConsoleError::Configuration) if the command
    /// declares an empty or duplicate name or a multi-character flag option.
    pub fn add_command(&mut self, command: Command) -> Result<()> {
        if let Some(err) = validate_definitions(command.arguments(), command.options())
            .into_iter()
            .next()
        {
            return Err(err.into());
        }
        debug!(command = command.name(), "Registering command");
        self.registry.get_mut().insert(command);
        Ok(())
    }

    /// Registers every command in order.
    ///
    /// # Errors
    ///
    /// Stops at the first command that fails [`add_command`](Self::add_command).
    pub fn add_commands<I>(&mut self, commands: I) -> Result<()>
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            self.add_command(command)?;
        }
        Ok(())
    }

    /// Registers `identifier` to be constructed through the factory the first
    /// time `name` is looked up.
    pub fn add_command_by_name_and_identifier(&mut self, name: &str, identifier: &str) {
        debug!(command = name, identifier, "Registering deferred command");
        self.registry.get_mut().insert_deferred(name, identifier);
    }

    /// Registers `command` and makes it the default.
    ///
    /// # Errors
    ///
    /// Same as [`add_command`](Self::add_command).
    pub fn set_default_command(&mut self, command: Command) -> Result<()> {
        let name = command.name().to_string();
        self.add_command(command)?;
        self.set_default_command_by_name(&name);
        Ok(())
    }

    /// Makes the command registered under `name` the default.
    ///
    /// The name is not checked until the next [`run`](Self::run).
    pub fn set_default_command_by_name(&mut self, name: &str) {
        self.default_command = Some(name.to_string());
    }

    pub fn default_command_name(&self) -> Option<&str> {
        self.default_command.as_deref()
    }

    pub fn set_only_use_default_command(&mut self, only_use_default_command: bool) {
        self.only_use_default_command = only_use_default_command;
    }

    pub fn should_only_use_default_command(&self) -> bool {
        self.only_use_default_command
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.registry.borrow().contains(name)
    }

    /// Looks up a command, constructing it first if it was deferred.
    ///
    /// Returns a snapshot; later runs do not update it.
    ///
    /// # Errors
    ///
    /// Propagates the factory's error if a deferred command cannot be
    /// constructed.
    pub fn get_command(&self, name: &str) -> Result<Option<Command>> {
        let mut registry = self.registry.borrow_mut();
        Ok(registry.resolve(name, self.factory.as_ref())?.cloned())
    }

    /// Every registered command in registration order, constructing any that
    /// were deferred.
    ///
    /// # Errors
    ///
    /// Stops at the first deferred command that cannot be constructed.
    pub fn get_commands(&self) -> Result<Vec<Command>> {
        let mut registry = self.registry.borrow_mut();
        registry.resolve_all(self.factory.as_ref())?;
        let commands = registry
            .iter()
            .filter_map(|(_, entry)| entry.as_resolved().cloned())
            .collect();
        Ok(commands)
    }

    pub fn remove_command_by_name(&mut self, name: &str) {
        if self.registry.get_mut().remove(name).is_some() {
            debug!(command = name, "Removed command");
        }
    }

    pub fn command_usage(&self, command: &Command) -> String {
        command.usage()
    }

    /// Name of the command selected by the most recent [`run`](Self::run).
    pub fn active_command(&self) -> Option<&str> {
        self.active_command.as_deref()
    }

    /// Usage line of the command selected by the most recent run.
    pub fn active_command_usage(&self) -> Option<String> {
        let name = self.active_command.as_deref()?;
        let registry = self.registry.borrow();
        registry.get(name)?.as_resolved().map(Command::usage)
    }

    pub fn parameter(&self) -> Ref<'_, Parameter> {
        self.parameter.borrow()
    }

    pub fn parameter_mut(&mut self) -> &mut Parameter {
        self.parameter.get_mut()
    }

    pub fn output_mut(&mut self) -> &mut dyn Output {
        &mut **self.output.get_mut()
    }

    /// Selects a command, binds it against the command line, and runs it.
    ///
    /// # Errors
    ///
    /// Returns [`NoCommandResolved`](ConsoleError::NoCommandResolved) if
    /// neither the command line nor the default selects a registered command,
    /// a [`Binding`](ConsoleError::Binding) error if the command line does
    /// not satisfy the command's declarations, and otherwise whatever the
    /// handler returns.
    pub fn run(&mut self) -> Result<()> {
        let registry = self.registry.get_mut();
        let parameter = self.parameter.get_mut();
        let factory = self.factory.as_ref();

        let default_command = match self.default_command.as_deref() {
            Some(name) => {
                let found = registry.resolve(name, factory)?.is_some();
                if !found {
                    warn!(command = name, "Default command is not registered");
                }
                found.then(|| name.to_string())
            }
            None => None,
        };

        let mut cli_command = None;
        if self.only_use_default_command {
            parameter.disable_command_name();
        } else {
            if let Some(name) = parameter.command_name().map(str::to_string) {
                if registry.resolve(&name, factory)?.is_some() {
                    cli_command = Some(name);
                }
            }
            parameter.enable_command_name();
        }

        let name = cli_command
            .or(default_command)
            .ok_or(ConsoleError::NoCommandResolved)?;
        self.active_command = Some(name.clone());

        let command = registry
            .resolve(&name, factory)?
            .ok_or(ConsoleError::NoCommandResolved)?;
        if !command.is_prepared() {
            command.prepare();
        }

        info!(command = name.as_str(), "Dispatching command");
        parameter.bind_arguments(command.arguments_mut())?;
        parameter.bind_options(command.options_mut())?;
        let command = command.clone();

        let mut output = self.output.borrow_mut();
        let mut input = self.input.borrow_mut();
        let parameter = self.parameter.borrow();
        command.run(self, &mut **output, &mut **input, &parameter)
    }

    /// Runs `command` with its own parameter set built from `tokens`.
    ///
    /// `tokens` excludes the script name. Every non-option token binds as a
    /// positional argument. The application's own parameter state is left
    /// alone.
    ///
    /// # Errors
    ///
    /// Returns a [`Binding`](ConsoleError::Binding) error if `tokens` does
    /// not satisfy the command's declarations, and otherwise whatever the
    /// handler returns.
    pub fn run_command(
        &self,
        command: &Command,
        tokens: &[&str],
        output: &mut dyn Output,
        input: &mut dyn Input,
    ) -> Result<()> {
        let script_name = self.parameter.borrow().script_name().to_string();
        let mut parameter = Parameter::new(
            std::iter::once(script_name).chain(tokens.iter().map(|token| token.to_string())),
        );
        parameter.disable_command_name();

        let mut command = command.clone();
        if !command.is_prepared() {
            command.prepare();
        }

        debug!(command = command.name(), "Running nested command");
        parameter.bind_arguments(command.arguments_mut())?;
        parameter.bind_options(command.options_mut())?;
        command.run(self, output, input, &parameter)
    }

    /// Writes `err` as an error block, followed by the active command's usage
    /// line if a command had been selected.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](ConsoleError::Io) if writing fails.
    pub fn report_error(&mut self, err: &ConsoleError) -> Result<()> {
        let usage = self.active_command_usage();
        let output = self.output.get_mut();
        output.write_error_block(&[err.to_string()])?;
        if let Some(usage) = usage {
            output.writeln(&format!("Usage: {usage}"))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("name", &self.name)
            .field("registry", &self.registry)
            .field("default_command", &self.default_command)
            .field("only_use_default_command", &self.only_use_default_command)
            .field("active_command", &self.active_command)
            .finish_non_exhaustive()
    }
}
