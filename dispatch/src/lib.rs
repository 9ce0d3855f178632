//! Command registry and dispatcher for console applications.
//!
//! Builds on `console-kit-core` to select a command from the command line,
//! bind its declared arguments and options, and run its handler.
//!
//! # Quick start
//!
//! ```
//! use console_kit_core::{ArgumentDefinition, OptionDefinition, Parameter};
//! use console_kit_dispatch::{help_command, Application, BufferedOutput, Command, StreamInput};
//!
//! let output = BufferedOutput::new();
//! let mut app = Application::new(
//!     output.clone(),
//!     StreamInput::new(std::io::empty()),
//!     Parameter::new(["tool", "tag", "v1.2", "--push"]),
//! );
//!
//! app.set_default_command(help_command()).unwrap();
//! app.add_command(
//!     Command::new("tag")
//!         .with_description("Tags a release")
//!         .with_argument(ArgumentDefinition::required("version"))
//!         .with_option(OptionDefinition::long("push"))
//!         .with_handler(|_, output, _, parameter| {
//!             if parameter.get_option("push").is_some() {
//!                 output.writeln("pushing")?;
//!             }
//!             Ok(())
//!         }),
//! ).unwrap();
//!
//! app.run().unwrap();
//! assert_eq!(output.contents(), "pushing\n");
//! ```
//!
//! Commands can also be registered by identifier and constructed on first
//! use through a [`CommandFactory`]; see [`CommandRegistry`].

mod application;
mod command;
mod config;
mod error;
mod help;
mod io;
mod registry;

pub use application::Application;
pub use command::{Command, CommandContract, Handler};
pub use config::ApplicationConfig;
pub use error::{ConsoleError, Result};
pub use help::{HELP_COMMAND_NAME, help_command};
pub use io::{BufferedOutput, Input, Output, StreamInput, StreamOutput};
pub use registry::{CommandContainer, CommandFactory, CommandRegistry, RegistryEntry};
