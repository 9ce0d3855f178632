//! Error types for definition construction and parameter binding.
//!
//! [`ConfigurationError`] covers mistakes in how a command declares its
//! arguments and options. These are programming errors and surface as soon as
//! the offending declaration is built or registered.
//!
//! [`BindingError`] covers mismatches between a command's declarations and
//! the tokens found on the command line. Its `Display` output is the message
//! shown to the person running the program.

use thiserror::Error;

/// Invalid argument or option declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A flag option was declared with a name longer than one character.
    #[error("Flag options can only have a single-letter name, '{0}' given.")]
    FlagNameTooLong(String),
    /// An argument or option was declared with an empty name.
    #[error("argument and option names cannot be empty")]
    EmptyName,
    /// An argument mode string is neither `required` nor `optional`.
    #[error("unknown argument mode: {0} (expected 'required' or 'optional')")]
    UnknownArgumentMode(String),
    /// An option value mode string is neither `required` nor `optional`.
    #[error("unknown option value mode: {0} (expected 'required' or 'optional')")]
    UnknownOptionValueMode(String),
    /// Two arguments of the same command share a name.
    #[error("duplicate argument in command: {0}")]
    DuplicateArgument(String),
    /// Two options of the same command share a name.
    #[error("duplicate option in command: {0}")]
    DuplicateOption(String),
}

/// Command-line input that does not satisfy a command's declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// A required positional argument was not given.
    #[error("Required argument with index #{index} '{name}' not provided.")]
    MissingRequiredArgument {
        /// Position of the argument in the command's declaration list.
        index: usize,
        /// Declared argument name.
        name: String,
    },
    /// An option that needs a value was passed without a usable one.
    #[error("Option '{dashes}{name}' requires a value, which is not provided.")]
    MissingRequiredOptionValue {
        /// `-` for flag options, `--` for long options.
        dashes: &'static str,
        /// Declared option name.
        name: String,
    },
}
