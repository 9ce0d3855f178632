//! Binding of declared arguments and options against a parse result.
//!
//! Binding always starts from scratch: every definition's previous state is
//! overwritten, so a definition can be bound any number of times. Validation
//! runs once all definitions in the list are bound, and reports the first
//! offending definition in declaration order.

use tracing::debug;

use crate::definition::{ArgumentDefinition, OptionDefinition};
use crate::error::BindingError;
use crate::parser::RawParseResult;

/// Binds positional arguments by declaration order.
///
/// Each definition's order becomes its index in `definitions`.
///
/// # Errors
///
/// Returns [`BindingError::MissingRequiredArgument`] for the first required
/// argument without a token at its position.
pub fn bind_arguments(
    raw: &RawParseResult,
    definitions: &mut [ArgumentDefinition],
) -> Result<(), BindingError> {
    for (index, argument) in definitions.iter_mut().enumerate() {
        argument.bind(index, &raw.positional);
        debug!(
            index,
            name = argument.name(),
            provided = argument.has_been_provided(),
            "Bound argument"
        );
    }

    match definitions
        .iter()
        .enumerate()
        .find(|(_, argument)| argument.is_required() && !argument.has_been_provided())
    {
        Some((index, argument)) => Err(BindingError::MissingRequiredArgument {
            index,
            name: argument.name().to_string(),
        }),
        None => Ok(()),
    }
}

/// Binds options by name against the long or flag option map.
///
/// # Errors
///
/// Returns [`BindingError::MissingRequiredOptionValue`] for the first option
/// that needs a value, was passed, and resolved to no usable value.
pub fn bind_options(
    raw: &RawParseResult,
    definitions: &mut [OptionDefinition],
) -> Result<(), BindingError> {
    for option in definitions.iter_mut() {
        let found = if option.is_flag_option() {
            option
                .name()
                .chars()
                .next()
                .and_then(|c| raw.flag_options.get(&c))
        } else {
            raw.long_options.get(option.name())
        };
        option.bind(found);
        debug!(
            name = option.name(),
            flag = option.is_flag_option(),
            provided = option.has_been_provided(),
            "Bound option"
        );
    }

    let missing = definitions.iter().find(|option| {
        option.is_value_required()
            && option.has_been_provided()
            && !option.value().is_some_and(|value| value.is_usable())
    });
    match missing {
        Some(option) => Err(BindingError::MissingRequiredOptionValue {
            dashes: option.dashes(),
            name: option.name().to_string(),
        }),
        None => Ok(()),
    }
}
