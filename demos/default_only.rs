//! Default-only dispatch example.
//!
//! Runs the same argument vector through two applications: one that selects
//! commands by name and one that always runs its default command. In the
//! second, the would-be command name becomes the default command's first
//! argument.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p console-kit-demos --example default_only
//! ```

use console_kit_core::{ArgumentDefinition, OptionDefinition, Parameter};
use console_kit_dispatch::{Application, Command, StreamInput, StreamOutput};

fn main() {
    let argv = ["./tool", "report.csv", "--format=json", "-q"];

    for default_only in [false, true] {
        println!("== default-only mode {}", if default_only { "on" } else { "off" });

        let mut app = Application::new(
            StreamOutput::stdout(),
            StreamInput::new(std::io::empty()),
            Parameter::new(argv),
        );
        app.set_only_use_default_command(default_only);
        app.set_default_command(convert_command()).unwrap();

        if let Err(err) = app.run() {
            app.report_error(&err).unwrap();
        }
        println!();
    }
}

fn convert_command() -> Command {
    Command::new("convert")
        .with_description("Converts a file to another format")
        .with_argument(ArgumentDefinition::optional("input").with_default("stdin"))
        .with_option(OptionDefinition::long("format").with_default("text"))
        .with_option(OptionDefinition::flag('q'))
        .with_handler(|app, output, _, parameter| {
            output.writeln(&format!(
                "command name on the command line: {:?}",
                parameter.command_name()
            ))?;
            output.writeln(&format!(
                "usage: {}",
                app.active_command_usage().unwrap_or_default()
            ))?;
            output.writeln(&serde_json::to_string_pretty(&parameter.to_json())?)?;
            Ok(())
        })
}
