//! Route table and matcher.
//!
//! Routes are registered once at startup and matched many times. Matching is
//! a linear scan: the first route whose method and pattern both match wins,
//! so specific templates must be registered before overlapping general ones.

use std::collections::BTreeMap;

use tracing::debug;

use crate::route::template::{PathPattern, PathTemplate};
use crate::route::{Method, RouteDefinition};
use crate::utils;
use crate::RouteError;

/// A registered route with its compiled matcher.
#[derive(Debug, Clone)]
pub struct CompiledRoute<H> {
    method: Method,
    path: String,
    pattern: PathPattern,
    handler: H,
}

impl<H> CompiledRoute<H> {
    pub fn compile(definition: RouteDefinition<H>) -> Result<Self, RouteError> {
        let (method, path, handler) = definition.into_parts();
        let pattern = PathPattern::compile(&PathTemplate::parse(&path))?;
        Ok(Self {
            method,
            path,
            pattern,
            handler,
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The original template.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn param_names(&self) -> &[String] {
        self.pattern.param_names()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// A successful match.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub route: &'a CompiledRoute<H>,
    pub handler: &'a H,
    pub params: BTreeMap<String, String>,
}

/// Ordered, append-only list of compiled routes.
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<CompiledRoute<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from definitions, preserving their order.
    pub fn from_definitions<I>(definitions: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = RouteDefinition<H>>,
    {
        let mut table = Self::new();
        for definition in definitions {
            table.add(definition)?;
        }
        Ok(table)
    }

    /// Compile and append a route.
    pub fn register(
        &mut self,
        method: Method,
        path: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError> {
        self.add(RouteDefinition::new(method, path, handler))
    }

    /// Compile and append a route definition.
    pub fn add(&mut self, definition: RouteDefinition<H>) -> Result<&mut Self, RouteError> {
        let route = CompiledRoute::compile(definition)?;
        debug!(
            method = %route.method,
            path = %route.path,
            params = route.param_names().len(),
            "Registered route"
        );
        self.routes.push(route);
        Ok(self)
    }

    /// Find the first route matching `method` and `path`.
    ///
    /// The method is compared case-insensitively; an unknown verb matches
    /// nothing. Any query string or fragment on `path` is ignored.
    pub fn match_request(&self, method: &str, path: &str) -> Option<RouteMatch<'_, H>> {
        let method: Method = method.parse().ok()?;
        let path = utils::request_path(path);

        self.routes
            .iter()
            .filter(|route| route.method == method)
            .find_map(|route| {
                let params = route.pattern.extract(path)?;
                Some(RouteMatch {
                    route,
                    handler: &route.handler,
                    params,
                })
            })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledRoute<H>> {
        self.routes.iter()
    }
}
