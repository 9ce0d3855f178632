//! Built-in `help` command.

use console_kit_core::{ArgumentDefinition, Parameter};

use crate::application::Application;
use crate::command::Command;
use crate::error::Result;
use crate::io::{Input, Output};

/// Name the help command registers under.
pub const HELP_COMMAND_NAME: &str = "help";

const NAME_PADDING: usize = 5;

/// Builds the `help` command.
///
/// `help` lists every registered command with its description. `help <name>`
/// shows the description and usage line of one command instead, as long as
/// `help` itself was selected by name on the command line.
///
/// # Examples
///
/// ```
/// use console_kit_core::Parameter;
/// use console_kit_dispatch::{help_command, Application, BufferedOutput, Command, StreamInput};
///
/// let output = BufferedOutput::new();
/// let mut app = Application::new(
///     output.clone(),
///     StreamInput::new(std::io::empty()),
///     Parameter::new(["app", "help"]),
/// );
/// app.set_default_command(help_command()).unwrap();
/// app.add_command(Command::new("build").with_description("Build it")).unwrap();
/// app.run().unwrap();
///
/// assert!(output.contents().contains("  build     Build it\n"));
/// ```
pub fn help_command() -> Command {
    Command::new(HELP_COMMAND_NAME)
        .with_description("Shows all commands available.")
        .with_argument(ArgumentDefinition::optional("command_name"))
        .with_handler(run_help)
}

fn run_help(
    app: &Application,
    output: &mut dyn Output,
    _input: &mut dyn Input,
    parameter: &Parameter,
) -> Result<()> {
    if let Some(name) = app.name() {
        output.writeln(name)?;
        output.newline(1)?;
    }

    let selected_by_name = parameter.is_command_name_enabled()
        && parameter.command_name() == Some(HELP_COMMAND_NAME);

    match parameter.get_argument("command_name") {
        Some(target) if selected_by_name => show_command_help(app, output, &target.to_string()),
        _ => show_general_help(app, output),
    }
}

fn show_general_help(app: &Application, output: &mut dyn Output) -> Result<()> {
    output.writeln("Available commands:")?;

    let commands = app.get_commands()?;
    let width = commands
        .iter()
        .map(|command| command.name().chars().count())
        .max()
        .unwrap_or(0)
        + NAME_PADDING;

    for command in &commands {
        let line = format!(
            "  {:<width$}{}",
            command.name(),
            command.description().unwrap_or_default()
        );
        output.writeln(line.trim_end())?;
    }
    Ok(())
}

fn show_command_help(app: &Application, output: &mut dyn Output, name: &str) -> Result<()> {
    let Some(command) = app.get_command(name)? else {
        output.writeln(&format!("Unknown command: {name}"))?;
        return Ok(());
    };

    if let Some(description) = command.description() {
        output.writeln("Description:")?;
        output.writeln(&format!("  {description}"))?;
        output.newline(1)?;
    }

    output.writeln("Usage:")?;
    output.writeln(&format!("  {}", app.command_usage(&command)))?;
    Ok(())
}
