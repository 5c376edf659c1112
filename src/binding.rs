//! Client binding generator.
//!
//! Turns a named route map into [`ClientBinding`]s. A binding takes the
//! route's path parameters positionally, plus optional extra values and
//! per-call options, and returns the transport attributes a browser-side
//! enhancement library consumes:
//!
//! ```text
//! patch("/api/todos/:id/toggle", h) as "toggle"
//!   toggle.call(["123"], None, None)
//!   → hx-patch="/api/todos/123/toggle" hx-headers='{"X-Requested-With":"XMLHttpRequest"}'
//! ```
//!
//! **Invariants:**
//! - Path parameters are substituted in the same order the server extracts them
//! - Malformed route-map entries never become bindings
//! - Optional attributes are omitted, never emitted empty

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::route::template::PathTemplate;
use crate::route::{Method, RouteDefinition};
use crate::utils;
use crate::{BindingError, RouteError};

/// Default transport attribute prefix.
pub const DEFAULT_PREFIX: &str = "hx";

/// Same-origin request marker sent with every bound request.
pub const SAME_ORIGIN_HEADER: &str = "X-Requested-With";
pub const SAME_ORIGIN_VALUE: &str = "XMLHttpRequest";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Generator-wide defaults shared by every binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientApiConfig {
    /// Attribute prefix, `hx` gives `hx-get`, `hx-vals`, ...
    pub prefix: String,
    /// Default target selector.
    pub target: Option<String>,
    /// Default swap strategy.
    pub swap: Option<String>,
    /// Headers sent with every request, on top of the same-origin marker.
    /// Per-call headers merge over these.
    #[serde(deserialize_with = "utils::deserialize_headers")]
    pub headers: BTreeMap<String, String>,
}

impl Default for ClientApiConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(SAME_ORIGIN_HEADER.to_string(), SAME_ORIGIN_VALUE.to_string());
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            target: None,
            swap: None,
            headers,
        }
    }
}

impl ClientApiConfig {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_swap(mut self, swap: impl Into<String>) -> Self {
        self.swap = Some(swap.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}-{}", self.prefix, suffix)
    }
}

/// Per-call overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingOptions {
    pub target: Option<String>,
    pub swap: Option<String>,
    /// Scalar header values are read in their string form.
    #[serde(deserialize_with = "utils::deserialize_optional_headers")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl BindingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn swap(mut self, swap: impl Into<String>) -> Self {
        self.swap = Some(swap.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Attribute Map
// ---------------------------------------------------------------------------

/// Transport attributes produced by one binding call, in key order.
///
/// Values are stored attribute-escaped, so everything read back through
/// [`AttributeMap::get`], [`AttributeMap::iter`] or serialization can be
/// written into a quoted HTML attribute as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeMap(BTreeMap<String, String>);

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw value; it is escaped on the way in.
    pub fn insert(&mut self, key: impl Into<String>, value: impl AsRef<str>) {
        self.0.insert(key.into(), utils::escape_attr(value.as_ref()));
    }

    /// The escaped value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The original, unescaped value for `key`.
    pub fn get_decoded(&self, key: &str) -> Option<String> {
        self.get(key).map(utils::unescape_attr)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    /// Render as `key="value"` pairs.
    pub fn to_html(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}=\"{}\"", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ---------------------------------------------------------------------------
// Route Entries
// ---------------------------------------------------------------------------

/// One value of a route map: a route triple or anything else.
///
/// `Malformed` entries are skipped by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteEntry<H> {
    Route(RouteDefinition<H>),
    Malformed(Value),
}

impl<H> From<RouteDefinition<H>> for RouteEntry<H> {
    fn from(route: RouteDefinition<H>) -> Self {
        RouteEntry::Route(route)
    }
}

impl<H> From<Value> for RouteEntry<H> {
    fn from(value: Value) -> Self {
        RouteEntry::Malformed(value)
    }
}

impl<H> From<&str> for RouteEntry<H> {
    fn from(value: &str) -> Self {
        RouteEntry::Malformed(Value::String(value.to_string()))
    }
}

/// Values accepted as route-map entries by the generator.
pub trait IntoRouteEntry {
    type Handler;

    fn into_route_entry(self) -> RouteEntry<Self::Handler>;
}

impl<H> IntoRouteEntry for RouteDefinition<H> {
    type Handler = H;

    fn into_route_entry(self) -> RouteEntry<H> {
        RouteEntry::Route(self)
    }
}

impl<H> IntoRouteEntry for RouteEntry<H> {
    type Handler = H;

    fn into_route_entry(self) -> RouteEntry<H> {
        self
    }
}

// ---------------------------------------------------------------------------
// Client Binding
// ---------------------------------------------------------------------------

/// Attribute generator for one named route.
#[derive(Debug, Clone)]
pub struct ClientBinding {
    name: String,
    method: Method,
    template: PathTemplate,
    param_names: Vec<String>,
    config: Arc<ClientApiConfig>,
}

impl ClientBinding {
    fn new(name: String, method: Method, path: &str, config: Arc<ClientApiConfig>) -> Self {
        let template = PathTemplate::parse(path);
        let param_names = template.param_names();
        Self {
            name,
            method,
            template,
            param_names,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The path template.
    pub fn path(&self) -> &str {
        self.template.source()
    }

    /// Positional parameter names, in substitution order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Generate the attribute map.
    ///
    /// Missing path parameters are not an error here: their `:name`
    /// placeholders stay in the path and a warning is logged. Use
    /// [`ClientBinding::try_call`] to reject them instead.
    pub fn call<I>(
        &self,
        params: I,
        vals: Option<&Value>,
        options: Option<&BindingOptions>,
    ) -> AttributeMap
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let (attrs, missing) = self.build(params, vals, options);
        if !missing.is_empty() {
            warn!(
                route = %self.name,
                path = %self.path(),
                missing = ?missing,
                "Binding called without all path parameters"
            );
        }
        attrs
    }

    /// Like [`ClientBinding::call`], but fails on missing path parameters.
    pub fn try_call<I>(
        &self,
        params: I,
        vals: Option<&Value>,
        options: Option<&BindingOptions>,
    ) -> Result<AttributeMap, BindingError>
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let (attrs, missing) = self.build(params, vals, options);
        if missing.is_empty() {
            Ok(attrs)
        } else {
            Err(BindingError::MissingParams {
                route: self.name.clone(),
                missing,
            })
        }
    }

    /// Variadic calling convention over JSON values.
    ///
    /// The first N values fill the N path parameters. The next value, unless
    /// null, is the extra-values payload. The one after that, if it is an
    /// object, is read as [`BindingOptions`].
    pub fn call_positional(&self, args: &[Value]) -> AttributeMap {
        let count = self.param_names.len().min(args.len());
        let params: Vec<String> = args[..count].iter().map(utils::param_to_string).collect();

        let vals = args.get(self.param_names.len()).filter(|v| !v.is_null());

        let options = args
            .get(self.param_names.len() + 1)
            .filter(|v| v.is_object())
            .and_then(|v| match serde_json::from_value::<BindingOptions>(v.clone()) {
                Ok(options) => Some(options),
                Err(err) => {
                    warn!(
                        route = %self.name,
                        error = %err,
                        "Ignoring unreadable binding options"
                    );
                    None
                }
            });

        self.call(params, vals, options.as_ref())
    }

    fn build<I>(
        &self,
        params: I,
        vals: Option<&Value>,
        options: Option<&BindingOptions>,
    ) -> (AttributeMap, Vec<String>)
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let config = &self.config;
        let values: Vec<String> = params
            .into_iter()
            .take(self.param_names.len())
            .map(|p| p.to_string())
            .collect();
        let (path, missing) = self.template.render(&values);

        let mut attrs = AttributeMap::new();
        attrs.insert(config.key(self.method.attr_suffix()), path);

        if let Some(vals) = vals {
            attrs.insert(config.key("vals"), utils::serialize_value(vals));
        }

        let target = options
            .and_then(|o| o.target.as_ref())
            .or(config.target.as_ref());
        if let Some(target) = target {
            attrs.insert(config.key("target"), target.clone());
        }

        let swap = options.and_then(|o| o.swap.as_ref()).or(config.swap.as_ref());
        if let Some(swap) = swap {
            attrs.insert(config.key("swap"), swap.clone());
        }

        let mut headers = BTreeMap::from([(
            SAME_ORIGIN_HEADER.to_string(),
            SAME_ORIGIN_VALUE.to_string(),
        )]);
        headers.extend(config.headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        if let Some(extra) = options.and_then(|o| o.headers.as_ref()) {
            headers.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        attrs.insert(config.key("headers"), utils::serialize_headers(&headers));

        (attrs, missing)
    }
}

// ---------------------------------------------------------------------------
// Client API
// ---------------------------------------------------------------------------

/// The named bindings generated from one route map.
#[derive(Debug, Clone)]
pub struct ClientApi {
    bindings: BTreeMap<String, ClientBinding>,
    skipped: Vec<String>,
    config: Arc<ClientApiConfig>,
}

/// Generate bindings with the default configuration.
pub fn generate_client_api<N, E, I>(routes: I) -> ClientApi
where
    I: IntoIterator<Item = (N, E)>,
    N: Into<String>,
    E: IntoRouteEntry,
{
    ClientApi::with_config(ClientApiConfig::default(), routes)
}

impl ClientApi {
    /// Generate bindings for every well-formed entry of `routes`.
    pub fn with_config<N, E, I>(config: ClientApiConfig, routes: I) -> Self
    where
        I: IntoIterator<Item = (N, E)>,
        N: Into<String>,
        E: IntoRouteEntry,
    {
        let config = Arc::new(config);
        let mut bindings = BTreeMap::new();
        let mut skipped = Vec::new();

        for (name, entry) in routes {
            let name = name.into();
            match entry.into_route_entry() {
                RouteEntry::Route(route) => {
                    let binding = ClientBinding::new(
                        name.clone(),
                        route.method(),
                        route.path(),
                        Arc::clone(&config),
                    );
                    bindings.insert(name, binding);
                }
                RouteEntry::Malformed(value) => {
                    debug!(route = %name, entry = %value, "Skipping malformed route entry");
                    skipped.push(name);
                }
            }
        }

        Self {
            bindings,
            skipped,
            config,
        }
    }

    /// Load a JSON route manifest: an object of `name → {method, path, handler}`.
    pub fn from_manifest_json(json: &str, config: ClientApiConfig) -> Result<Self, RouteError> {
        let routes: BTreeMap<String, RouteEntry<Value>> = serde_json::from_str(json)?;
        Ok(Self::with_config(config, routes))
    }

    /// Read and load a JSON route manifest file.
    pub fn from_manifest_path(
        path: impl AsRef<Path>,
        config: ClientApiConfig,
    ) -> Result<Self, RouteError> {
        let json = fs::read_to_string(path)?;
        Self::from_manifest_json(&json, config)
    }

    pub fn get(&self, name: &str) -> Option<&ClientBinding> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Look up `name` and call it.
    pub fn call<I>(
        &self,
        name: &str,
        params: I,
        vals: Option<&Value>,
        options: Option<&BindingOptions>,
    ) -> Result<AttributeMap, BindingError>
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        self.get(name)
            .map(|binding| binding.call(params, vals, options))
            .ok_or_else(|| BindingError::UnknownRoute(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClientBinding)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Names of entries that were not route triples.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn config(&self) -> &ClientApiConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{del, get, patch, post};
    use serde_json::json;

    fn todo_api() -> ClientApi {
        generate_client_api([
            ("list", get("/api/todos", "list")),
            ("toggle", patch("/api/todos/:id/toggle", "toggle")),
            ("remove", del("/api/todos/:id", "remove")),
        ])
    }

    #[test]
    fn test_substitutes_path_param() {
        let api = todo_api();
        let attrs = api.get("toggle").unwrap().call(["123"], None, None);
        assert_eq!(attrs.get("hx-patch"), Some("/api/todos/123/toggle"));
    }

    #[test]
    fn test_numeric_params_use_string_form() {
        let api = todo_api();
        let attrs = api.get("remove").unwrap().call([7], None, None);
        assert_eq!(attrs.get("hx-delete"), Some("/api/todos/7"));
    }

    #[test]
    fn test_default_headers_only() {
        let api = todo_api();
        let attrs = api.get("list").unwrap().call(Vec::<String>::new(), None, None);
        assert_eq!(attrs.get("hx-get"), Some("/api/todos"));
        assert_eq!(
            attrs.get_decoded("hx-headers").as_deref(),
            Some(r#"{"X-Requested-With":"XMLHttpRequest"}"#)
        );
        assert!(!attrs.contains_key("hx-vals"));
        assert!(!attrs.contains_key("hx-target"));
        assert!(!attrs.contains_key("hx-swap"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn test_vals_serialized() {
        let api = todo_api();
        let vals = json!({"done": true});
        let attrs = api.get("toggle").unwrap().call(["1"], Some(&vals), None);
        assert_eq!(attrs.get("hx-vals"), Some("{&quot;done&quot;:true}"));
        assert_eq!(attrs.get_decoded("hx-vals").as_deref(), Some(r#"{"done":true}"#));
    }

    #[test]
    fn test_options_override_and_merge() {
        let config = ClientApiConfig::default()
            .with_target("#main")
            .with_swap("innerHTML");
        let api = ClientApi::with_config(config, [("toggle", patch("/t/:id", ()))]);
        let options = BindingOptions::new()
            .target("#row-1")
            .header("X-Test", "1")
            .header(SAME_ORIGIN_HEADER, "custom");

        let attrs = api.get("toggle").unwrap().call(["1"], None, Some(&options));
        assert_eq!(attrs.get("hx-target"), Some("#row-1"));
        assert_eq!(attrs.get("hx-swap"), Some("innerHTML"));
        assert_eq!(
            attrs.get_decoded("hx-headers").as_deref(),
            Some(r#"{"X-Requested-With":"custom","X-Test":"1"}"#)
        );
    }

    #[test]
    fn test_custom_prefix() {
        let api = ClientApi::with_config(
            ClientApiConfig::default().with_prefix("data-zx"),
            [("save", post("/save", ()))],
        );
        let attrs = api.get("save").unwrap().call(Vec::<String>::new(), None, None);
        assert_eq!(attrs.get("data-zx-post"), Some("/save"));
        assert!(attrs.contains_key("data-zx-headers"));
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let api = generate_client_api([
            ("good", RouteEntry::Route(get("/ok", "h"))),
            ("bad", RouteEntry::Malformed(json!("just a string"))),
            ("worse", RouteEntry::Malformed(json!({"method": "GET"}))),
        ]);
        assert!(api.contains("good"));
        assert!(!api.contains("bad"));
        assert!(!api.contains("worse"));
        assert_eq!(api.skipped(), &["bad".to_string(), "worse".to_string()]);
    }

    #[test]
    fn test_missing_param_kept_literal() {
        let api = todo_api();
        let attrs = api.get("toggle").unwrap().call(Vec::<String>::new(), None, None);
        assert_eq!(attrs.get("hx-patch"), Some("/api/todos/:id/toggle"));
    }

    #[test]
    fn test_try_call_rejects_missing_param() {
        let api = todo_api();
        let err = api
            .get("toggle")
            .unwrap()
            .try_call(Vec::<String>::new(), None, None)
            .unwrap_err();
        assert_eq!(
            err,
            BindingError::MissingParams {
                route: "toggle".into(),
                missing: vec!["id".into()]
            }
        );
    }

    #[test]
    fn test_extra_params_ignored() {
        let api = todo_api();
        let attrs = api.get("remove").unwrap().call(["1", "2"], None, None);
        assert_eq!(attrs.get("hx-delete"), Some("/api/todos/1"));
    }

    #[test]
    fn test_call_positional() {
        let api = todo_api();
        let binding = api.get("toggle").unwrap();
        let attrs = binding.call_positional(&[
            json!(5),
            json!({"done": false}),
            json!({"swap": "outerHTML"}),
        ]);
        assert_eq!(attrs.get("hx-patch"), Some("/api/todos/5/toggle"));
        assert_eq!(attrs.get_decoded("hx-vals").as_deref(), Some(r#"{"done":false}"#));
        assert_eq!(attrs.get("hx-swap"), Some("outerHTML"));
    }

    #[test]
    fn test_call_positional_scalar_header_values() {
        let api = todo_api();
        let binding = api.get("toggle").unwrap();
        let attrs = binding.call_positional(&[
            json!(5),
            Value::Null,
            json!({"target": "#row-5", "headers": {"X-Count": 1}}),
        ]);
        assert_eq!(attrs.get("hx-target"), Some("#row-5"));
        assert_eq!(
            attrs.get_decoded("hx-headers").as_deref(),
            Some(r#"{"X-Count":"1","X-Requested-With":"XMLHttpRequest"}"#)
        );
    }

    #[test]
    fn test_call_positional_null_vals_omitted() {
        let api = todo_api();
        let binding = api.get("toggle").unwrap();
        let attrs = binding.call_positional(&[json!("5"), Value::Null, json!({"target": "#x"})]);
        assert!(!attrs.contains_key("hx-vals"));
        assert_eq!(attrs.get("hx-target"), Some("#x"));
    }

    #[test]
    fn test_api_call_unknown_route() {
        let api = todo_api();
        assert_eq!(
            api.call("nope", Vec::<String>::new(), None, None).unwrap_err(),
            BindingError::UnknownRoute("nope".into())
        );
    }

    #[test]
    fn test_to_html_escapes_values() {
        let api = todo_api();
        let vals = json!({"title": "<b>\"hi\"</b>"});
        let attrs = api.get("toggle").unwrap().call(["1"], Some(&vals), None);
        let html = attrs.to_html();
        assert!(html.contains(r#"hx-patch="/api/todos/1/toggle""#));
        assert!(html.contains("hx-vals=\"{&quot;title&quot;:&quot;&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_returned_map_is_attribute_safe() {
        let api = todo_api();
        let vals = json!({"t": "\"><script>x</script>"});
        let options = BindingOptions::new().target("[data-role=\"x\"]");
        let attrs = api.get("toggle").unwrap().call(["1"], Some(&vals), Some(&options));

        for (_, value) in attrs.iter() {
            assert!(!value.contains('<'));
            assert!(!value.contains('"'));
        }
        assert_eq!(attrs.get("hx-target"), Some("[data-role=&quot;x&quot;]"));
        let decoded: Value = serde_json::from_str(&attrs.get_decoded("hx-vals").unwrap()).unwrap();
        assert_eq!(decoded, vals);

        let serialized = serde_json::to_string(&attrs).unwrap();
        assert!(!serialized.contains("<script>"));
    }

    #[test]
    fn test_manifest_json() {
        let json = r#"{
            "toggle": {"method": "patch", "path": "/api/todos/:id/toggle", "handler": "todos.toggle"},
            "broken": "oops",
            "partial": {"method": "GET", "path": "/x"}
        }"#;
        let api = ClientApi::from_manifest_json(json, ClientApiConfig::default()).unwrap();
        assert_eq!(api.names().collect::<Vec<_>>(), vec!["toggle"]);
        assert_eq!(api.get("toggle").unwrap().param_names(), &["id".to_string()]);
        assert_eq!(api.skipped().len(), 2);
    }

    #[test]
    fn test_manifest_must_be_object() {
        let result = ClientApi::from_manifest_json("[1, 2]", ClientApiConfig::default());
        assert!(matches!(result, Err(RouteError::Manifest(_))));
    }

    #[test]
    fn test_config_headers_keep_same_origin_marker() {
        let config: ClientApiConfig =
            serde_json::from_value(json!({"headers": {"X-Csrf": "t", "X-Version": 2}})).unwrap();
        assert!(!config.headers.contains_key(SAME_ORIGIN_HEADER));

        let api = ClientApi::with_config(config, [("list", get("/items", ()))]);
        let attrs = api.get("list").unwrap().call(Vec::<String>::new(), None, None);
        assert_eq!(
            attrs.get_decoded("hx-headers").as_deref(),
            Some(r#"{"X-Csrf":"t","X-Requested-With":"XMLHttpRequest","X-Version":"2"}"#)
        );
    }

    #[test]
    fn test_config_can_override_same_origin_value() {
        let mut config = ClientApiConfig::default();
        config.headers.clear();
        config.headers.insert(SAME_ORIGIN_HEADER.into(), "fetch".into());
        let api = ClientApi::with_config(config, [("list", get("/items", ()))]);
        let attrs = api.get("list").unwrap().call(Vec::<String>::new(), None, None);
        assert_eq!(
            attrs.get_decoded("hx-headers").as_deref(),
            Some(r#"{"X-Requested-With":"fetch"}"#)
        );
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ClientApiConfig = serde_json::from_value(json!({"swap": "outerHTML"})).unwrap();
        assert_eq!(config.prefix, "hx");
        assert_eq!(config.swap.as_deref(), Some("outerHTML"));
        assert_eq!(
            config.headers.get(SAME_ORIGIN_HEADER).map(String::as_str),
            Some(SAME_ORIGIN_VALUE)
        );
    }
}
