//! # Zenith Actions
//!
//! The declarative action pipeline of the Zenith Framework.
//!
//! Interactive behavior is authored inside HTML attributes instead of a
//! client-side application runtime. This crate owns the two structural halves
//! of that contract:
//!
//! - **Action expressions**: `toggle(42)` or `sequence(save(), close())`
//!   parsed into [`ParsedAction`] / [`ActionPlan`] descriptions for the DOM
//!   runtime to dispatch.
//! - **Route bindings**: a named map of [`RouteDefinition`]s compiled into a
//!   server-side [`RouteTable`] and, independently, into [`ClientBinding`]s
//!   that emit hypertext-transport attribute maps (`hx-get`, `hx-vals`, ...).
//!
//! # Architecture
//!
//! ```text
//! attribute string → split_arguments → deserialize_argument → parse_invocation → ActionPlan
//! route map → PathTemplate ┬→ RouteTable (server matching)
//!                          └→ ClientApi  (attribute generation)
//! ```
//!
//! Parsing never fails loudly: malformed input yields `None` so a bad attribute
//! cannot break page rendering. Diagnostics go to `tracing`.

pub mod action;
pub mod binding;
pub mod route;
pub mod utils;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use action::cache::PlanCache;
pub use action::{
    parse_action_expression, parse_action_plan, parse_invocation, resolve_action_target,
    split_arguments, ActionCall, ActionModifier, ActionPlan, ParsedAction,
};
pub use binding::{
    generate_client_api, AttributeMap, BindingOptions, ClientApi, ClientApiConfig, ClientBinding,
    IntoRouteEntry, RouteEntry,
};
pub use route::table::{CompiledRoute, RouteMatch, RouteTable};
pub use route::template::{compile_path, PathPattern, PathTemplate};
pub use route::{del, get, patch, post, put, Method, RouteDefinition};

// ---------------------------------------------------------------------------
// Action Values
// ---------------------------------------------------------------------------

/// A deserialized action argument.
///
/// Strings, numbers, booleans and null. An argument that is itself shaped
/// like an invocation is kept as the raw invocation text in a string.
pub type ActionValue = serde_json::Value;

// ---------------------------------------------------------------------------
// Diagnostic
// ---------------------------------------------------------------------------

/// A structured diagnostic reported at the boundary (CLI, tooling).
/// The core parsers never produce these; they return `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while building route tables or loading route manifests.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Unknown HTTP method '{0}' (expected GET, POST, PUT, PATCH or DELETE)")]
    UnknownMethod(String),

    #[error("Invalid path pattern for '{path}': {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid route manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors raised by the strict binding entry points.
///
/// The lenient [`ClientBinding::call`] never returns these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("Route '{route}' is missing path parameters: {}", missing.join(", "))]
    MissingParams { route: String, missing: Vec<String> },

    #[error("Unknown route binding '{0}'")]
    UnknownRoute(String),
}
