//! Structural validation of declaration lists.
//!
//! Catches declarations that could never bind sensibly, such as two options
//! with the same name, before a command is registered.
//!
//! # Examples
//!
//! ```
//! use console_kit_core::*;
//!
//! let arguments = vec![ArgumentDefinition::required("source")];
//! let options = vec![OptionDefinition::flag('v'), OptionDefinition::long("verbose")];
//! assert!(validate_definitions(&arguments, &options).is_empty());
//!
//! let options = vec![OptionDefinition::long("verbose"), OptionDefinition::long("verbose")];
//! assert_eq!(
//!     validate_definitions(&arguments, &options),
//!     vec![ConfigurationError::DuplicateOption("verbose".to_string())]
//! );
//! ```

use std::collections::HashSet;

use crate::definition::{ArgumentDefinition, OptionDefinition};
use crate::error::ConfigurationError;

/// Validates a command's argument and option declarations.
///
/// Stops at the first problem found, checking arguments before options.
pub fn validate_definitions(
    arguments: &[ArgumentDefinition],
    options: &[OptionDefinition],
) -> Vec<ConfigurationError> {
    let mut errors = Vec::new();

    let mut seen: HashSet<&str> = HashSet::new();
    for argument in arguments {
        if argument.name().is_empty() {
            errors.push(ConfigurationError::EmptyName);
            return errors;
        }
        if !seen.insert(argument.name()) {
            errors.push(ConfigurationError::DuplicateArgument(
                argument.name().to_string(),
            ));
            return errors;
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for option in options {
        if option.name().is_empty() {
            errors.push(ConfigurationError::EmptyName);
            return errors;
        }
        if option.is_flag_option() && option.name().chars().count() > 1 {
            errors.push(ConfigurationError::FlagNameTooLong(option.name().to_string()));
            return errors;
        }
        if !seen.insert(option.name()) {
            errors.push(ConfigurationError::DuplicateOption(option.name().to_string()));
            return errors;
        }
    }

    errors
}
