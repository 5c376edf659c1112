//! Route definitions.
//!
//! A [`RouteDefinition`] is the single source of truth for one endpoint. The
//! server compiles it into a [`table::CompiledRoute`]; the client binding
//! generator turns it into a [`crate::ClientBinding`]. Both derive parameter
//! order from the same [`template::PathTemplate`] scan.

pub mod table;
pub mod template;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::RouteError;

// ---------------------------------------------------------------------------
// Method
// ---------------------------------------------------------------------------

/// HTTP verbs a route can be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
    ];

    /// Upper-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Lower-case suffix of the transport attribute (`hx-<suffix>`).
    pub fn attr_suffix(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Patch => "patch",
            Method::Delete => "delete",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = RouteError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == normalized)
            .ok_or_else(|| RouteError::UnknownMethod(s.to_string()))
    }
}

impl TryFrom<String> for Method {
    type Error = RouteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// Route Definition
// ---------------------------------------------------------------------------

/// `{ method, path, handler }` for one endpoint.
///
/// The handler is opaque here; binding generation never looks at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDefinition<H> {
    method: Method,
    path: String,
    handler: H,
}

impl<H> RouteDefinition<H> {
    pub fn new(method: Method, path: impl Into<String>, handler: H) -> Self {
        Self {
            method,
            path: path.into(),
            handler,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The path template, e.g. `/api/todos/:id/toggle`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_parts(self) -> (Method, String, H) {
        (self.method, self.path, self.handler)
    }
}

/// `GET` route.
pub fn get<H>(path: impl Into<String>, handler: H) -> RouteDefinition<H> {
    RouteDefinition::new(Method::Get, path, handler)
}

/// `POST` route.
pub fn post<H>(path: impl Into<String>, handler: H) -> RouteDefinition<H> {
    RouteDefinition::new(Method::Post, path, handler)
}

/// `PUT` route.
pub fn put<H>(path: impl Into<String>, handler: H) -> RouteDefinition<H> {
    RouteDefinition::new(Method::Put, path, handler)
}

/// `PATCH` route.
pub fn patch<H>(path: impl Into<String>, handler: H) -> RouteDefinition<H> {
    RouteDefinition::new(Method::Patch, path, handler)
}

/// `DELETE` route. Named `del` to mirror the other helpers' brevity.
pub fn del<H>(path: impl Into<String>, handler: H) -> RouteDefinition<H> {
    RouteDefinition::new(Method::Delete, path, handler)
}
