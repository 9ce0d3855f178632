//! Argument parsing and binding for console applications.
//!
//! This crate turns a process argument vector into named options and
//! positional arguments, and binds them against what a command declares:
//!
//! - [`parse_tokens`]: splits an argument vector into a [`RawParseResult`]
//!   (script name, command name, long options, flag options, positionals).
//! - [`ArgumentDefinition`] / [`OptionDefinition`]: a command's declared
//!   positional arguments and named options.
//! - [`bind_arguments`] / [`bind_options`]: bind declarations against a
//!   parse result and check required arguments and required option values.
//! - [`Parameter`]: parse state plus bound definitions, with the
//!   command-name toggles a dispatcher uses and the lookups a command
//!   handler uses.
//!
//! Errors are split into [`ConfigurationError`] (bad declarations) and
//! [`BindingError`] (command line does not satisfy the declarations).
//!
//! # Example
//!
//! ```
//! use console_kit_core::*;
//!
//! let mut parameter = Parameter::new(["app", "deploy", "staging", "-fq", "--tag=v2"]);
//! assert_eq!(parameter.command_name(), Some("deploy"));
//!
//! let mut arguments = vec![
//!     ArgumentDefinition::required("environment"),
//!     ArgumentDefinition::optional("region").with_default("eu-west-1"),
//! ];
//! let mut options = vec![
//!     OptionDefinition::flag('f'),
//!     OptionDefinition::flag('q'),
//!     OptionDefinition::long("tag").value_required(),
//! ];
//! parameter.bind_arguments(&mut arguments).unwrap();
//! parameter.bind_options(&mut options).unwrap();
//!
//! assert_eq!(parameter.get_argument("environment"), Some(Value::from("staging")));
//! assert_eq!(parameter.get_argument("region"), Some(Value::from("eu-west-1")));
//! assert_eq!(parameter.get_option("f"), Some(Value::Bool(true)));
//! assert_eq!(parameter.get_option("tag"), Some(Value::from("v2")));
//! ```

pub mod binder;
mod definition;
mod error;
mod parameter;
mod parser;
mod validate;
mod value;

pub use binder::{bind_arguments, bind_options};
pub use definition::{ArgumentDefinition, ArgumentMode, OptionDefinition, OptionValueMode};
pub use error::{BindingError, ConfigurationError};
pub use parameter::Parameter;
pub use parser::{RawParseResult, parse_tokens};
pub use validate::validate_definitions;
pub use value::{RawValue, Value};
