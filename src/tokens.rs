//! Token substitution for asset path patterns and template identifiers.
//!
//! Tokens use single-brace delimiters: `{name}` inserts a variable value,
//! `{name|filter}` passes the value through one of the recognized filters
//! first. There is no escaping mechanism for literal braces.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Non-greedy so `{a}{b}` yields two tokens. `.` does not cross lines.
    PATTERN.get_or_init(|| Regex::new(r"\{(.+?)\}").expect("valid token pattern"))
}

/// Replaces all tokens in a given string with appropriate values.
///
/// Substitution happens in a single pass: replacement values are never
/// re-scanned for tokens. When `vars` is empty the input is returned
/// unchanged, so the function can be called unconditionally.
///
/// # Arguments
/// * `text` - A string potentially containing replaceable tokens
/// * `vars` - A mapping where keys are token names and values are replacements
///
/// # Errors
/// * `Error::UndefinedVariableError` if a token names a missing variable
/// * `Error::UndefinedFilterError` if a token carries an unknown filter
///
/// Both errors fail the whole call; no partially substituted text is
/// produced.
pub fn replace_tokens(text: &str, vars: &IndexMap<String, String>) -> Result<String> {
    if vars.is_empty() {
        return Ok(text.to_string());
    }

    let mut failure: Option<Error> = None;
    let result = token_pattern().replace_all(text, |caps: &regex::Captures| {
        if failure.is_some() {
            return String::new();
        }
        match process_token(&caps[1], vars) {
            Ok(replacement) => replacement,
            Err(err) => {
                failure = Some(err);
                String::new()
            }
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(result.into_owned()),
    }
}

/// Resolves a single token body of the form `name` or `name|filter`.
fn process_token(token: &str, vars: &IndexMap<String, String>) -> Result<String> {
    // An empty filter segment (`{name|}`) means no filter.
    let (name, filter) = match token.split_once('|') {
        Some((name, "")) => (name, None),
        Some((name, filter)) => (name, Some(filter)),
        None => (token, None),
    };

    let value = vars
        .get(name)
        .ok_or_else(|| Error::UndefinedVariableError { name: name.to_string() })?;

    match filter {
        None => Ok(value.clone()),
        Some(filter) => apply_filter(filter, value),
    }
}

/// Applies one of the recognized token filters to a value.
fn apply_filter(name: &str, value: &str) -> Result<String> {
    match name {
        "u2h" => Ok(value.replace('_', "-")),
        "h2u" => Ok(value.replace('-', "_")),
        "h2m" => Ok(human_to_machine(value)),
        "m2h" => Ok(machine_to_human(value)),
        "camelize" => Ok(camelize(value)),
        "c2m" => Ok(camel_to_machine(value)),
        _ => Err(Error::UndefinedFilterError { name: name.to_string() }),
    }
}

/// Transforms a machine name to a human name.
///
/// Underscores become spaces and the first letter is capitalized:
/// `node_type` becomes `Node type`.
pub fn machine_to_human(machine_name: &str) -> String {
    let spaced = machine_name.replace('_', " ");
    ucfirst(spaced.trim())
}

/// Transforms a human name to a machine name.
///
/// The result is lowercase with every run of characters outside
/// `[a-z0-9_]` collapsed to a single underscore; leading digits and
/// leading/trailing underscores are stripped: `9 Node types!` becomes
/// `node_types`.
pub fn human_to_machine(human_name: &str) -> String {
    static LEADING_DIGITS: OnceLock<Regex> = OnceLock::new();
    static NON_MACHINE: OnceLock<Regex> = OnceLock::new();

    let leading_digits =
        LEADING_DIGITS.get_or_init(|| Regex::new(r"^[0-9]+").expect("valid pattern"));
    let non_machine =
        NON_MACHINE.get_or_init(|| Regex::new(r"[^a-z0-9_]+").expect("valid pattern"));

    let lowered = human_name.to_lowercase();
    let stripped = leading_digits.replace(&lowered, "_");
    let collapsed = non_machine.replace_all(&stripped, "_");
    collapsed.trim_matches('_').to_string()
}

/// Camelizes a string: `block content` becomes `BlockContent`.
///
/// Segments are split on non-alphanumeric characters and on letter-case
/// boundaries, title-cased and concatenated.
pub fn camelize(input: &str) -> String {
    static CASE_BOUNDARY: OnceLock<Regex> = OnceLock::new();
    static NON_ALNUM: OnceLock<Regex> = OnceLock::new();

    let case_boundary =
        CASE_BOUNDARY.get_or_init(|| Regex::new(r"([^A-Z])([A-Z])").expect("valid pattern"));
    let non_alnum =
        NON_ALNUM.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid pattern"));

    let spaced = case_boundary.replace_all(input, "$1 $2");
    let lowered = spaced.to_lowercase();
    let cleaned = non_alnum.replace_all(&lowered, " ");
    cleaned.split_whitespace().map(ucfirst).collect()
}

/// Transforms a camelized string to a machine name.
///
/// Inverse of [`camelize`] for well-formed machine names: `BlockContent`
/// becomes `block_content`.
pub fn camel_to_machine(input: &str) -> String {
    static UPPERCASE: OnceLock<Regex> = OnceLock::new();

    let uppercase = UPPERCASE.get_or_init(|| Regex::new(r"[A-Z]").expect("valid pattern"));
    human_to_machine(&uppercase.replace_all(input, " ${0}"))
}

fn ucfirst(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Flattens a JSON answer map into the string variables consumed by
/// [`replace_tokens`]. String values are taken as-is, everything else uses
/// its JSON rendering.
pub fn string_vars(
    answers: &serde_json::Map<String, serde_json::Value>,
) -> IndexMap<String, String> {
    answers
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), rendered)
        })
        .collect()
}
