//! Tokenizer for process argument vectors.
//!
//! Splits a flat argument list into a script name, an optional command name,
//! long options, flag options, and positional arguments. Tokens are taken as
//! given: shell quoting has already been resolved by the time they get here.
//!
//! Classification per token, after the script name:
//!
//! - `--name` / `--name=value` is a long option. Everything after the first
//!   `=` is the value, so the value may itself contain `=`.
//! - `-abc` is a flag cluster: `a`, `b` and `c` are each present. A value can
//!   be attached to the character right before an `=` (`-ab=c` gives `a`
//!   present and `b` = `"c"`), and that ends the cluster.
//! - Anything else is positional. The first positional token becomes the
//!   command name.

use std::collections::HashMap;

use tracing::debug;

use crate::value::RawValue;

/// Result of tokenizing one argument vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParseResult {
    pub(crate) script_name: String,
    pub(crate) command_name: Option<String>,
    pub(crate) long_options: HashMap<String, RawValue>,
    pub(crate) flag_options: HashMap<char, RawValue>,
    pub(crate) positional: Vec<String>,
}

impl RawParseResult {
    /// The first token of the argument vector (empty if there was none).
    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    pub fn command_name(&self) -> Option<&str> {
        self.command_name.as_deref()
    }

    /// Long options keyed by name without the leading dashes.
    pub fn long_options(&self) -> &HashMap<String, RawValue> {
        &self.long_options
    }

    /// Flag options keyed by their character.
    pub fn flag_options(&self) -> &HashMap<char, RawValue> {
        &self.flag_options
    }

    /// Non-option tokens in encounter order, minus the command name.
    pub fn positional_arguments(&self) -> &[String] {
        &self.positional
    }
}

/// Tokenizes a full argument vector, script name included.
///
/// The first positional token is captured as the command name.
///
/// # Examples
///
/// ```
/// use console_kit_core::{RawValue, parse_tokens};
///
/// let tokens: Vec<String> = ["app", "build", "-vq", "--target=x86", "src"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let parsed = parse_tokens(&tokens);
///
/// assert_eq!(parsed.script_name(), "app");
/// assert_eq!(parsed.command_name(), Some("build"));
/// assert_eq!(parsed.flag_options()[&'v'], RawValue::Present);
/// assert_eq!(parsed.long_options()["target"], RawValue::Text("x86".into()));
/// assert_eq!(parsed.positional_arguments(), ["src"]);
/// ```
pub fn parse_tokens(tokens: &[String]) -> RawParseResult {
    let mut result = RawParseResult::default();

    let Some((script_name, rest)) = tokens.split_first() else {
        return result;
    };
    result.script_name = script_name.clone();

    for token in rest {
        if let Some(option) = token.strip_prefix("--") {
            parse_long_option(&mut result, option.trim_start_matches('-'));
        } else if let Some(cluster) = token.strip_prefix('-') {
            parse_flag_cluster(&mut result, cluster);
        } else if result.command_name.is_none() {
            result.command_name = Some(token.clone());
        } else {
            result.positional.push(token.clone());
        }
    }

    debug!(
        script = %result.script_name,
        command = ?result.command_name,
        long_options = result.long_options.len(),
        flag_options = result.flag_options.len(),
        positional = result.positional.len(),
        "Parsed argument vector"
    );
    result
}

fn parse_long_option(result: &mut RawParseResult, option: &str) {
    let (key, value) = match option.split_once('=') {
        Some((key, value)) => (key, RawValue::Text(value.to_string())),
        None => (option, RawValue::Present),
    };
    result.long_options.insert(key.to_string(), value);
}

fn parse_flag_cluster(result: &mut RawParseResult, cluster: &str) {
    for (i, c) in cluster.char_indices() {
        if c == '=' {
            break;
        }
        let rest = &cluster[i + c.len_utf8()..];
        match rest.split_once('=') {
            Some(("", value)) if !value.is_empty() => {
                result.flag_options.insert(c, RawValue::Text(value.to_string()));
                break;
            }
            _ => {
                result.flag_options.insert(c, RawValue::Present);
            }
        }
    }
}
