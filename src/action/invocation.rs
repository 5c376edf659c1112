//! Invocation parser: `name(arg, arg, ...)` → [`ActionCall`].

use crate::action::literal::deserialize_argument;
use crate::action::tokenizer::split_arguments;
use crate::action::ActionCall;

/// Whether `name` matches `^[A-Za-z_$][0-9A-Za-z_$]*$`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Split a call into its name and the raw text between the outer parens.
///
/// Returns `None` when the input is empty, has no `(`, does not end in `)`
/// or the text before the first `(` is not an identifier.
pub fn split_call(input: &str) -> Option<(&str, &str)> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.ends_with(')') {
        return None;
    }
    let open = trimmed.find('(')?;
    let name = &trimmed[..open];
    if !is_identifier(name) {
        return None;
    }
    Some((name, &trimmed[open + 1..trimmed.len() - 1]))
}

/// Parse a single invocation.
///
/// Nested invocation arguments are kept as raw strings; only the `sequence`
/// combinator looks inside them. Empty argument tokens are dropped.
pub fn parse_invocation(input: &str) -> Option<ActionCall> {
    let (name, inner) = split_call(input)?;
    let args = split_arguments(inner)
        .iter()
        .filter_map(|token| deserialize_argument(token))
        .collect();

    Some(ActionCall {
        name: name.to_string(),
        args,
    })
}
