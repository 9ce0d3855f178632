use std::cell::{Cell, RefCell};
use std::rc::Rc;

use console_kit_core::{ArgumentDefinition, OptionDefinition, OptionValueMode, Parameter, Value};
use console_kit_dispatch::{
    Application, ApplicationConfig, BufferedOutput, Command, CommandContainer, CommandContract,
    ConsoleError, RegistryEntry, StreamInput, help_command,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Records what handlers saw, in call order.
#[derive(Clone, Default)]
struct Recorder {
    calls: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    fn push(&self, value: impl Into<String>) {
        self.calls.borrow_mut().push(value.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn last(&self) -> Option<String> {
        self.calls.borrow().last().cloned()
    }
}

fn application(tokens: &[&str]) -> (Application, BufferedOutput) {
    let output = BufferedOutput::new();
    let app = Application::new(
        output.clone(),
        StreamInput::new(std::io::empty()),
        Parameter::new(tokens.iter().copied()),
    );
    (app, output)
}

fn marking(name: &str, recorder: &Recorder, mark: &str) -> Command {
    let recorder = recorder.clone();
    let mark = mark.to_string();
    Command::new(name).with_handler(move |_, _, _, _| {
        recorder.push(mark.clone());
        Ok(())
    })
}

fn option_echo(recorder: &Recorder) -> Command {
    let recorder = recorder.clone();
    Command::new("returnOptionValue").with_handler(move |_, _, _, parameter| {
        let value = parameter.get_option("option").map(|v| v.to_string());
        recorder.push(value.unwrap_or_else(|| "<none>".to_string()));
        Ok(())
    })
}

/// `test1` (default, one argument) and `test2`.
fn two_commands(tokens: &[&str], recorder: &Recorder) -> Application {
    let (mut app, _) = application(tokens);
    app.add_command(
        marking("test1", recorder, "OK1").with_argument(ArgumentDefinition::optional("arg1")),
    )
    .unwrap();
    app.add_command(marking("test2", recorder, "OK2")).unwrap();
    app.set_default_command_by_name("test1");
    app
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[test]
fn test_add_commands_and_has_command() {
    let recorder = Recorder::default();
    let (mut app, _) = application(&["./test.php"]);
    assert!(app.get_commands().unwrap().is_empty());

    app.add_commands([marking("test1", &recorder, "OK1"), marking("test2", &recorder, "OK2")])
        .unwrap();

    assert_eq!(app.get_commands().unwrap().len(), 2);
    assert!(app.has_command("test1"));
    assert!(!app.has_command("nope not this one"));
    assert!(app.get_command("nope").unwrap().is_none());
}

#[test]
fn test_set_get_name() {
    let (mut app, _) = application(&["./test.php"]);
    assert_eq!(app.name(), None);
    app.set_name("Super-application");
    assert_eq!(app.name(), Some("Super-application"));
}

#[test]
fn test_added_command_is_prepared() {
    let (mut app, _) = application(&["./test.php"]);
    let command = Command::new("test-command");
    assert!(!command.is_prepared());

    app.add_command(command).unwrap();
    let command = app.get_command("test-command").unwrap().unwrap();
    assert!(command.is_prepared());
    assert_eq!(command.name(), "test-command");
}

#[test]
fn test_remove_command_by_name() {
    let recorder = Recorder::default();
    let mut app = two_commands(&["./test.php"], &recorder);
    assert_eq!(app.get_commands().unwrap().len(), 2);

    app.remove_command_by_name("test1");
    app.remove_command_by_name("never-registered");

    let names: Vec<String> = app
        .get_commands()
        .unwrap()
        .iter()
        .map(|c| c.name().to_string())
        .collect();
    assert_eq!(names, ["test2"]);
}

// ---------------------------------------------------------------------------
// Deferred construction
// ---------------------------------------------------------------------------

fn counting_container(counter: &Rc<Cell<usize>>) -> CommandContainer {
    let counter = counter.clone();
    let mut container = CommandContainer::new();
    container.register("commands.test", move || {
        counter.set(counter.get() + 1);
        Command::new("test-command").with_description("built lazily")
    });
    container
}

#[test]
fn test_deferred_command_constructed_at_most_once() {
    let counter = Rc::new(Cell::new(0));
    let (mut app, _) = application(&["./test.php"]);
    app.set_factory(counting_container(&counter));
    app.add_command_by_name_and_identifier("test-command", "commands.test");

    assert!(app.has_command("test-command"));
    assert_eq!(counter.get(), 0);

    let command = app.get_command("test-command").unwrap().unwrap();
    assert!(command.is_prepared());
    assert_eq!(command.description(), Some("built lazily"));

    app.get_command("test-command").unwrap();
    app.get_commands().unwrap();
    assert_eq!(counter.get(), 1);
}

#[test]
fn test_get_commands_resolves_deferred_and_constructed() {
    let counter = Rc::new(Cell::new(0));
    let (mut app, _) = application(&["./test.php"]);
    app.set_factory(counting_container(&counter));
    app.add_command(Command::new("eager")).unwrap();
    app.add_command_by_name_and_identifier("test-command", "commands.test");

    let commands = app.get_commands().unwrap();
    assert_eq!(commands.len(), 2);
    assert!(commands.iter().all(Command::is_prepared));
    assert_eq!(counter.get(), 1);
}

#[test]
fn test_deferred_command_runs_from_command_line() {
    let counter = Rc::new(Cell::new(0));
    let (mut app, _) = application(&["./test.php", "test-command"]);
    app.set_factory(counting_container(&counter));
    app.add_command_by_name_and_identifier("test-command", "commands.test");

    app.run().unwrap();
    assert_eq!(app.active_command(), Some("test-command"));
    assert_eq!(counter.get(), 1);
}

#[test]
fn test_unknown_identifier_surfaces_on_lookup() {
    let (mut app, _) = application(&["./test.php"]);
    app.add_command_by_name_and_identifier("ghost", "commands.ghost");

    let err = app.get_command("ghost").unwrap_err();
    assert_eq!(err.to_string(), "Unknown command: commands.ghost");
    assert!(app.has_command("ghost"));
}

#[test]
fn test_closure_factory() {
    let (mut app, _) = application(&["./test.php", "dyn"]);
    app.set_factory(|identifier: &str| -> console_kit_dispatch::Result<Command> {
        match identifier {
            "factory.dyn" => Ok(Command::new("dyn")),
            other => Err(ConsoleError::UnknownCommand(other.to_string())),
        }
    });
    app.add_command_by_name_and_identifier("dyn", "factory.dyn");
    app.run().unwrap();
    assert_eq!(app.active_command(), Some("dyn"));
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[test]
fn test_default_command_runs_without_command_name() {
    let recorder = Recorder::default();
    let mut app = two_commands(&["./test.php"], &recorder);
    app.run().unwrap();
    assert_eq!(recorder.calls(), ["OK1"]);
}

#[test]
fn test_command_line_selects_command() {
    let recorder = Recorder::default();

    let mut app = two_commands(&["./test.php", "test2"], &recorder);
    app.run().unwrap();
    assert_eq!(recorder.last().as_deref(), Some("OK2"));

    let mut app = two_commands(&["./test.php", "test1"], &recorder);
    app.run().unwrap();
    assert_eq!(recorder.last().as_deref(), Some("OK1"));
}

#[test]
fn test_default_only_mode_folds_command_name_into_arguments() {
    for default_only in [false, true] {
        let recorder = Recorder::default();
        let mut app = two_commands(&["./test.php", "test2"], &recorder);
        app.set_only_use_default_command(default_only);
        app.run().unwrap();

        let test1 = app.get_command("test1").unwrap().unwrap();
        if default_only {
            assert_eq!(recorder.calls(), ["OK1"]);
            assert_eq!(test1.arguments()[0].value(), Some(Value::from("test2")));
            assert!(!app.parameter().is_command_name_enabled());
        } else {
            assert_eq!(recorder.calls(), ["OK2"]);
            assert_eq!(test1.arguments()[0].value(), None);
            assert!(app.parameter().is_command_name_enabled());
        }
    }
}

#[test]
fn test_no_command_resolved() {
    let (mut app, _) = application(&["./test.php"]);
    let err = app.run().unwrap_err();
    assert!(matches!(err, ConsoleError::NoCommandResolved));
    assert_eq!(err.to_string(), "No valid commands found.");
}

#[test]
fn test_unknown_command_without_default() {
    let recorder = Recorder::default();
    let (mut app, _) = application(&["./test.php", "missing"]);
    app.add_command(marking("test2", &recorder, "OK2")).unwrap();
    assert!(matches!(app.run(), Err(ConsoleError::NoCommandResolved)));
    assert!(recorder.calls().is_empty());
}

#[test]
fn test_handler_sees_bound_arguments() {
    let recorder = Recorder::default();
    let seen = recorder.clone();
    let (mut app, _) = application(&["./test.php", "copy", "a.txt", "b.txt", "-f"]);
    app.add_command(
        Command::new("copy")
            .with_argument(ArgumentDefinition::required("source"))
            .with_argument(ArgumentDefinition::required("dest"))
            .with_option(OptionDefinition::flag('f'))
            .with_handler(move |_, _, _, parameter| {
                seen.push(parameter.to_json().to_string());
                Ok(())
            }),
    )
    .unwrap();

    app.run().unwrap();
    let json: serde_json::Value = serde_json::from_str(&recorder.calls()[0]).unwrap();
    assert_eq!(json["arguments"]["source"], "a.txt");
    assert_eq!(json["arguments"]["dest"], "b.txt");
    assert_eq!(json["options"]["f"], true);
}

#[test]
fn test_handler_error_propagates() {
    let (mut app, _) = application(&["./test.php", "fail"]);
    app.add_command(
        Command::new("fail")
            .with_handler(|_, _, _, _| Err(ConsoleError::Command("disk full".to_string()))),
    )
    .unwrap();

    let err = app.run().unwrap_err();
    assert_eq!(err.to_string(), "disk full");
    assert_eq!(app.active_command(), Some("fail"));
}

// ---------------------------------------------------------------------------
// Option values
// ---------------------------------------------------------------------------

#[test]
fn test_required_option_value_is_only_checked_when_passed() {
    let recorder = Recorder::default();
    let command = || {
        marking("test1", &recorder, "OK1")
            .with_option(OptionDefinition::long("option").value_required())
    };

    let (mut app, _) = application(&["./test.php"]);
    app.set_default_command(command()).unwrap();
    app.run().unwrap();
    assert_eq!(recorder.calls(), ["OK1"]);

    let (mut app, _) = application(&["./test.php", "--option"]);
    app.set_default_command(command()).unwrap();
    let err = app.run().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Option '--option' requires a value, which is not provided."
    );
    assert_eq!(recorder.calls(), ["OK1"]);
}

#[test]
fn test_option_with_value_passed() {
    let recorder = Recorder::default();
    let (mut app, _) = application(&["./test.php", "--option=passed value here!"]);
    let mut command = option_echo(&recorder);
    command
        .add_option(
            "option",
            OptionValueMode::Optional,
            Some(Value::from("default value is here!")),
            false,
        )
        .unwrap();
    app.set_default_command(command).unwrap();

    app.run().unwrap();
    assert_eq!(recorder.last().as_deref(), Some("passed value here!"));
}

#[test]
fn test_option_with_default_value() {
    let recorder = Recorder::default();
    let (mut app, _) = application(&["./test.php", "--option"]);
    let mut command = option_echo(&recorder);
    command
        .add_option(
            "option",
            OptionValueMode::Optional,
            Some(Value::from("default value is here!")),
            false,
        )
        .unwrap();
    app.set_default_command(command).unwrap();

    app.run().unwrap();
    assert_eq!(recorder.last().as_deref(), Some("default value is here!"));
}

#[test]
fn test_bare_option_without_default_is_true() {
    let recorder = Recorder::default();
    let (mut app, _) = application(&["./test.php", "--option"]);
    app.set_default_command(option_echo(&recorder).with_option(OptionDefinition::long("option")))
        .unwrap();

    app.run().unwrap();
    assert_eq!(recorder.last().as_deref(), Some("true"));
}

// ---------------------------------------------------------------------------
// Usage and error reporting
// ---------------------------------------------------------------------------

#[test]
fn test_usage_with_nothing_set_is_empty() {
    let (app, _) = application(&["./test.php"]);
    assert_eq!(app.command_usage(&Command::new("")), "");
}

#[test]
fn test_usage_with_every_combination() {
    let (app, _) = application(&["./test.php"]);
    let command = Command::new("test-command")
        .with_option(OptionDefinition::long("opt1"))
        .with_option(OptionDefinition::long("opt2").value_required())
        .with_argument(ArgumentDefinition::required("arg1"))
        .with_argument(ArgumentDefinition::optional("arg2"));

    assert_eq!(
        app.command_usage(&command),
        "test-command arg1 [arg2] [--opt1[=value]] [--opt2=value]"
    );
}

#[test]
fn test_report_error_after_binding_failure() {
    let (mut app, output) = application(&["./test.php", "tag"]);
    app.add_command(
        Command::new("tag")
            .with_argument(ArgumentDefinition::required("version"))
            .with_option(OptionDefinition::long("message").value_required()),
    )
    .unwrap();

    let err = app.run().unwrap_err();
    app.report_error(&err).unwrap();

    assert_eq!(
        app.active_command_usage().as_deref(),
        Some("tag version [--message=value]")
    );
    let contents = output.contents();
    assert!(contents.contains(" │ Required argument with index #0 'version' not provided. │\n"));
    assert!(contents.ends_with("Usage: tag version [--message=value]\n"));
}

// ---------------------------------------------------------------------------
// Help and nested runs
// ---------------------------------------------------------------------------

#[test]
fn test_help_lists_lazy_commands() {
    let counter = Rc::new(Cell::new(0));
    let (mut app, output) = application(&["./test.php"]);
    app.set_factory(counting_container(&counter));
    app.set_default_command(help_command()).unwrap();
    app.add_command_by_name_and_identifier("test-command", "commands.test");

    app.run().unwrap();

    assert_eq!(counter.get(), 1);
    assert!(output.contents().contains("  test-command     built lazily\n"));
}

#[test]
fn test_help_for_single_command() {
    let (mut app, output) = application(&["./test.php", "help", "help"]);
    app.add_command(help_command()).unwrap();
    app.run().unwrap();
    assert_eq!(
        output.contents(),
        "Description:\n  Shows all commands available.\n\nUsage:\n  help [command_name]\n"
    );
}

#[test]
fn test_handler_runs_other_command() {
    let (mut app, output) = application(&["./test.php", "release", "v2"]);
    app.add_command(
        Command::new("tag")
            .with_argument(ArgumentDefinition::required("version"))
            .with_option(OptionDefinition::flag('s'))
            .with_handler(|_, output, _, parameter| {
                let version = parameter.get_argument("version").map(|v| v.to_string());
                let signed = parameter.get_option("s").is_some();
                output.writeln(&format!("tag {} signed={signed}", version.unwrap_or_default()))?;
                Ok(())
            }),
    )
    .unwrap();
    app.add_command(
        Command::new("release")
            .with_argument(ArgumentDefinition::required("version"))
            .with_handler(|app, output, input, parameter| {
                let tag = app
                    .get_command("tag")?
                    .ok_or_else(|| ConsoleError::Command("tag missing".to_string()))?;
                let version = parameter.get_argument("version").map(|v| v.to_string());
                let version = version.unwrap_or_default();
                app.run_command(&tag, &[version.as_str(), "-s"], output, input)
            }),
    )
    .unwrap();

    app.run().unwrap();
    assert_eq!(output.contents(), "tag v2 signed=true\n");
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_config_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("console.yaml");

    let config = ApplicationConfig {
        name: Some("Tool".to_string()),
        default_command: Some("test1".to_string()),
        only_default_command: true,
    };
    config.save(&path).unwrap();

    let loaded = ApplicationConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_missing_config_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ApplicationConfig::load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConsoleError::Io(_)));
}

#[test]
fn test_config_drives_dispatch() {
    let recorder = Recorder::default();
    let (mut app, _) = application(&["./test.php", "test2"]);
    app.add_command(
        marking("test1", &recorder, "OK1").with_argument(ArgumentDefinition::optional("arg1")),
    )
    .unwrap();
    app.add_command(marking("test2", &recorder, "OK2")).unwrap();

    let yaml = "name: Tool\ndefault_command: test1\nonly_default_command: true\n";
    let config = ApplicationConfig::from_yaml_str(yaml).unwrap();
    app.apply_config(&config);
    app.run().unwrap();

    assert_eq!(app.name(), Some("Tool"));
    assert_eq!(recorder.calls(), ["OK1"]);
}

#[test]
fn test_command_from_yaml_contract() {
    let contract = CommandContract::from_yaml_str(
        r#"
name: fetch
description: Downloads a file
arguments:
  - name: url
    required: required
options:
  - name: retries
    value: required
    default: 3
  - name: q
    flag: true
"#,
    )
    .unwrap();

    let recorder = Recorder::default();
    let seen = recorder.clone();
    let (mut app, _) = application(&["./test.php", "fetch", "http://x", "-q"]);
    app.add_command(Command::from_contract(contract).with_handler(move |_, _, _, parameter| {
        seen.push(parameter.to_json().to_string());
        Ok(())
    }))
    .unwrap();

    app.run().unwrap();
    let json: serde_json::Value = serde_json::from_str(&recorder.calls()[0]).unwrap();
    assert_eq!(json["arguments"]["url"], "http://x");
    assert_eq!(json["options"]["retries"], 3);
    assert_eq!(json["options"]["q"], true);
}

#[test]
fn test_registry_entry_variants_exposed() {
    let entry = RegistryEntry::Deferred("commands.x".to_string());
    assert!(entry.as_resolved().is_none());
    let entry = RegistryEntry::Resolved(Command::new("x"));
    assert_eq!(entry.as_resolved().map(Command::name), Some("x"));
}
