//! Deferred command registration example.
//!
//! Registers commands by identifier and lets a `CommandContainer` construct
//! them on first use. Only the command that actually runs is built, until
//! `help` enumerates the registry and forces the rest.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p console-kit-demos --example lazy_registry -- migrate --dry-run
//! cargo run -p console-kit-demos --example lazy_registry
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use console_kit_core::{OptionDefinition, Parameter};
use console_kit_dispatch::{
    Application, Command, CommandContainer, StreamInput, StreamOutput, help_command,
};

fn main() {
    let built: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

    let mut container = CommandContainer::new();
    {
        let built = built.clone();
        container.register("commands.migrate", move || {
            built.borrow_mut().push("migrate");
            Command::new("migrate")
                .with_description("Applies pending migrations")
                .with_option(OptionDefinition::long("dry-run"))
                .with_handler(|_, output, _, parameter| {
                    let dry_run = parameter.get_option("dry-run").is_some();
                    output.writeln(&format!("migrating (dry run: {dry_run})"))?;
                    Ok(())
                })
        });
    }
    {
        let built = built.clone();
        container.register("commands.seed", move || {
            built.borrow_mut().push("seed");
            Command::new("seed").with_description("Loads fixture data")
        });
    }

    let mut app = Application::new(
        StreamOutput::stdout(),
        StreamInput::stdin(),
        Parameter::from_env(),
    );
    app.set_name("lazy-registry demo");
    app.set_factory(container);
    app.set_default_command(help_command()).unwrap();
    app.add_command_by_name_and_identifier("migrate", "commands.migrate");
    app.add_command_by_name_and_identifier("seed", "commands.seed");

    if let Err(err) = app.run() {
        app.report_error(&err).unwrap();
        std::process::exit(1);
    }

    println!();
    println!("constructed: {:?}", built.borrow());
}
