use std::io;
use std::process;

use console_kit_core::{ArgumentDefinition, OptionDefinition, Parameter, Value};
use console_kit_dispatch::{
    Application, ApplicationConfig, Command, CommandContract, Result, StreamInput, StreamOutput,
    help_command,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path to an optional YAML file applied with `Application::apply_config`.
const CONFIG_ENV: &str = "CONSOLE_DEMO_CONFIG";

const INSPECT_CONTRACT: &str = r#"
name: inspect
description: Prints the bound parameters as JSON.
arguments:
  - name: subject
  - name: detail
    default: none
options:
  - name: depth
    value: required
    default: 1
  - name: v
    flag: true
"#;

fn main() {
    init_tracing();

    let mut app = match build_application() {
        Ok(app) => app,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    };

    if let Err(err) = app.run() {
        if let Err(report_err) = app.report_error(&err) {
            eprintln!("error: {report_err}");
        }
        process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn build_application() -> Result<Application> {
    let mut app = Application::new(
        StreamOutput::stdout(),
        StreamInput::stdin(),
        Parameter::from_env(),
    );
    app.set_name(&format!("console-demo {PACKAGE_VERSION}"));
    app.set_default_command(help_command())?;
    app.add_commands([greet_command(), confirm_command(), inspect_command()?])?;

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        info!(path = path.as_str(), "Loading configuration");
        let config = ApplicationConfig::load(&path)?;
        app.apply_config(&config);
    }

    Ok(app)
}

fn text(value: Option<Value>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn greet_command() -> Command {
    Command::new("greet")
        .with_description("Greets someone by name.")
        .with_argument(ArgumentDefinition::required("name"))
        .with_option(
            OptionDefinition::long("greeting")
                .value_required()
                .with_default("Hello"),
        )
        .with_option(OptionDefinition::flag('l'))
        .with_handler(|_, output, _, parameter| {
            let name = text(parameter.get_argument("name"));
            let greeting = text(parameter.get_option("greeting"));
            let mut line = format!("{greeting}, {name}!");
            if parameter.get_option("l").is_some() {
                line = line.to_uppercase();
            }
            output.writeln(&line)?;
            Ok(())
        })
}

fn confirm_command() -> Command {
    Command::new("confirm")
        .with_description("Asks a yes/no question on stdin.")
        .with_argument(ArgumentDefinition::optional("question").with_default("Continue?"))
        .with_option(OptionDefinition::flag('y'))
        .with_handler(|_, output, input, parameter| {
            let question = text(parameter.get_argument("question"));
            let default = parameter.get_option("y").is_some();
            let hint = if default { "[Y/n]" } else { "[y/N]" };

            output.write(&format!("{question} {hint} "))?;
            let answer = input.get_yes_no(default)?;
            output.writeln(if answer { "yes" } else { "no" })?;
            Ok(())
        })
}

fn inspect_command() -> Result<Command> {
    let contract = CommandContract::from_yaml_str(INSPECT_CONTRACT)?;
    Ok(
        Command::from_contract(contract).with_handler(|_, output, _, parameter| {
            let json = serde_json::to_string_pretty(&parameter.to_json())?;
            output.writeln(&json)?;
            Ok(())
        }),
    )
}
