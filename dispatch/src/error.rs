//! Error types for command dispatch.
//!
//! Provides a unified error type covering every way a run can fail: bad
//! declarations, unsatisfied declarations, no command to run, unknown
//! deferred commands, handler failures, and collaborator I/O.

use console_kit_core::{BindingError, ConfigurationError};
use thiserror::Error;

/// Errors that can occur while registering or dispatching commands.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// A command declared its arguments or options incorrectly.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The command line does not satisfy the selected command's declarations.
    #[error(transparent)]
    Binding(#[from] BindingError),

    /// Neither a command named on the command line nor a default command
    /// could be resolved.
    #[error("No valid commands found.")]
    NoCommandResolved,

    /// The command factory does not know the requested identifier.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A command handler reported a failure.
    #[error("{0}")]
    Command(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results with [`ConsoleError`].
pub type Result<T> = std::result::Result<T, ConsoleError>;
