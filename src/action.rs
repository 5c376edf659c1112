//! Action expression parsing.
//!
//! Markup carries actions as attribute strings:
//!
//! ```text
//! toggle(42)
//! sequence(save(), close())
//! ```
//!
//! [`parse_action_expression`] turns such a string into a [`ParsedAction`];
//! [`parse_action_plan`] flattens it into an [`ActionPlan`] for the DOM
//! runtime. Action names stay opaque strings; the runtime owns the
//! name → handler table.
//!
//! **Invariants:**
//! - Any malformed input yields `None`, never a partial plan
//! - Parsing is pure: the same input always yields an equal result
//! - Only `sequence` recurses into nested invocations, and only one level

pub mod cache;
pub mod invocation;
pub mod literal;
pub mod tokenizer;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::utils;
use crate::ActionValue;

pub use invocation::parse_invocation;
pub use literal::{deserialize_argument, looks_like_invocation};
pub use tokenizer::split_arguments;

/// Name of the only recognized combinator.
pub const SEQUENCE: &str = "sequence";

/// Prefix of the role-target shorthand.
pub const ROLE_PREFIX: &str = "role:";

// ---------------------------------------------------------------------------
// Data Model
// ---------------------------------------------------------------------------

/// One parsed `name(args)` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionCall {
    pub name: String,
    pub args: Vec<ActionValue>,
}

/// Result of parsing an action attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParsedAction {
    Single { action: ActionCall },
    /// Always holds at least one call.
    Sequence { actions: Vec<ActionCall> },
}

impl ParsedAction {
    /// The calls in dispatch order.
    pub fn calls(&self) -> &[ActionCall] {
        match self {
            ParsedAction::Single { action } => std::slice::from_ref(action),
            ParsedAction::Sequence { actions } => actions,
        }
    }

    pub fn into_calls(self) -> Vec<ActionCall> {
        match self {
            ParsedAction::Single { action } => vec![action],
            ParsedAction::Sequence { actions } => actions,
        }
    }
}

/// Per-plan behavior modifiers.
///
/// Extension point: the parser does not produce any of these yet, so every
/// plan it builds has an empty modifier list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActionModifier {
    Delay {
        ms: u64,
    },
    Optimistic {
        value: ActionValue,
    },
    Unknown {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<ActionValue>,
    },
}

/// A flattened, executable description of an action attribute.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionPlan {
    pub calls: Vec<ActionCall>,
    pub modifiers: Vec<ActionModifier>,
}

impl ActionPlan {
    /// Names of the calls in dispatch order.
    pub fn call_names(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().map(|call| call.name.as_str())
    }
}

impl From<ParsedAction> for ActionPlan {
    fn from(parsed: ParsedAction) -> Self {
        Self {
            calls: parsed.into_calls(),
            modifiers: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse an action attribute into a single call or a sequence of calls.
///
/// Input starting with `sequence` and named exactly `sequence` is treated as
/// the combinator: each argument shaped like an invocation is parsed, other
/// arguments are dropped, and the parse fails if no call remains. Any other
/// input must be one well-formed invocation.
pub fn parse_action_expression(input: &str) -> Option<ParsedAction> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with(SEQUENCE) {
        if let Some((SEQUENCE, inner)) = invocation::split_call(trimmed) {
            return parse_sequence(inner, trimmed);
        }
    }

    let parsed = parse_invocation(trimmed).map(|action| ParsedAction::Single { action });
    if parsed.is_none() {
        debug!(expression = trimmed, "Action expression did not parse");
    }
    parsed
}

fn parse_sequence(inner: &str, expression: &str) -> Option<ParsedAction> {
    let mut actions = Vec::new();

    for token in split_arguments(inner) {
        if token.is_empty() {
            continue;
        }
        match looks_like_invocation(&token)
            .then(|| parse_invocation(&token))
            .flatten()
        {
            Some(call) => actions.push(call),
            None => debug!(member = %token, expression, "Dropping non-invocation sequence member"),
        }
    }

    if actions.is_empty() {
        debug!(expression, "Sequence has no valid members");
        return None;
    }
    Some(ParsedAction::Sequence { actions })
}

/// Parse an action attribute and flatten it into an [`ActionPlan`].
pub fn parse_action_plan(raw: &str) -> Option<ActionPlan> {
    parse_action_expression(raw).map(ActionPlan::from)
}

/// Resolve an action target attribute to a selector.
///
/// `role:<name>` becomes `[data-role="<name>"]`; any other non-empty value is
/// returned trimmed as a literal selector. Blank input and an empty role
/// name both yield `None`.
pub fn resolve_action_target(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.strip_prefix(ROLE_PREFIX) {
        Some(role) => {
            let role = role.trim();
            if role.is_empty() {
                return None;
            }
            Some(format!(
                "[data-role=\"{}\"]",
                utils::escape_selector_value(role)
            ))
        }
        None => Some(trimmed.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn call(name: &str, args: Vec<ActionValue>) -> ActionCall {
        ActionCall {
            name: name.into(),
            args,
        }
    }

    #[test]
    fn test_single_action() {
        let parsed = parse_action_expression("foo(1, 'x', true, null)").unwrap();
        assert_eq!(
            parsed,
            ParsedAction::Single {
                action: call("foo", vec![json!(1), json!("x"), json!(true), json!(null)])
            }
        );
    }

    #[test]
    fn test_sequence() {
        let parsed = parse_action_expression("sequence(foo(1), bar(2))").unwrap();
        assert_eq!(
            parsed,
            ParsedAction::Sequence {
                actions: vec![call("foo", vec![json!(1)]), call("bar", vec![json!(2)])]
            }
        );
    }

    #[test]
    fn test_sequence_drops_non_invocations() {
        let parsed = parse_action_expression("sequence(1, save(), 'close()', done)").unwrap();
        assert_eq!(parsed.calls(), &[call("save", vec![])]);
    }

    #[test]
    fn test_sequence_without_valid_members_fails() {
        assert!(parse_action_expression("sequence()").is_none());
        assert!(parse_action_expression("sequence(1, 'a')").is_none());
        assert!(parse_action_expression("sequence(9bad())").is_none());
    }

    #[test]
    fn test_sequence_prefixed_name_is_plain_action() {
        let parsed = parse_action_expression("sequenceNext(1)").unwrap();
        assert_eq!(
            parsed,
            ParsedAction::Single {
                action: call("sequenceNext", vec![json!(1)])
            }
        );
    }

    #[test]
    fn test_malformed_sequence_fails() {
        assert!(parse_action_expression("sequence(foo(1)").is_none());
        assert!(parse_action_expression("sequence").is_none());
    }

    #[test]
    fn test_empty_and_malformed() {
        assert!(parse_action_expression("").is_none());
        assert!(parse_action_expression("   ").is_none());
        assert!(parse_action_expression("toggle(").is_none());
        assert!(parse_action_expression("not an action").is_none());
    }

    #[test]
    fn test_plan_flattens_single() {
        let plan = parse_action_plan("toggle(42)").unwrap();
        assert_eq!(plan.calls, vec![call("toggle", vec![json!(42)])]);
        assert!(plan.modifiers.is_empty());
    }

    #[test]
    fn test_plan_flattens_sequence() {
        let plan = parse_action_plan("sequence(save(), close())").unwrap();
        assert_eq!(plan.call_names().collect::<Vec<_>>(), vec!["save", "close"]);
        assert!(plan.modifiers.is_empty());
    }

    #[test]
    fn test_plan_absent_on_failure() {
        assert!(parse_action_plan("oops").is_none());
    }

    #[test]
    fn test_parsed_action_serializes_with_kind_tag() {
        let parsed = parse_action_expression("sequence(foo(1))").unwrap();
        assert_eq!(
            serde_json::to_value(&parsed).unwrap(),
            json!({"kind": "sequence", "actions": [{"name": "foo", "args": [1]}]})
        );
    }

    #[test]
    fn test_modifier_serialization() {
        let modifier = ActionModifier::Unknown {
            name: "debounce".into(),
            value: None,
        };
        assert_eq!(
            serde_json::to_value(&modifier).unwrap(),
            json!({"kind": "unknown", "name": "debounce"})
        );
        let delay: ActionModifier = serde_json::from_value(json!({"kind": "delay", "ms": 250})).unwrap();
        assert_eq!(delay, ActionModifier::Delay { ms: 250 });
    }

    #[test]
    fn test_resolve_role_target() {
        assert_eq!(
            resolve_action_target("role:submit").as_deref(),
            Some("[data-role=\"submit\"]")
        );
        assert_eq!(
            resolve_action_target("  role:  list ").as_deref(),
            Some("[data-role=\"list\"]")
        );
    }

    #[test]
    fn test_resolve_empty_targets() {
        assert_eq!(resolve_action_target("  "), None);
        assert_eq!(resolve_action_target("role:"), None);
        assert_eq!(resolve_action_target("role:   "), None);
    }

    #[test]
    fn test_resolve_literal_target() {
        assert_eq!(resolve_action_target("#id").as_deref(), Some("#id"));
        assert_eq!(resolve_action_target(" .card > p ").as_deref(), Some(".card > p"));
    }

    #[test]
    fn test_resolve_role_is_escaped() {
        assert_eq!(
            resolve_action_target(r#"role:x"] body"#).as_deref(),
            Some(r#"[data-role="x\"] body"]"#)
        );
    }
}
