//! A single registered route.
//!
//! # Responsibilities
//! - Bind a method and a path pattern to a handler
//! - Decide whether a request matches (method first, then path)
//! - Invoke the handler
//!
//! # Design Decisions
//! - Method comparison is ASCII case-insensitive
//! - Only the path is matched; the query string never affects routing
//! - Immutable once built

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::http::{Request, Response};
use crate::routing::pattern::PathPattern;
use crate::routing::RoutingError;

/// Shared, thread-safe request handler.
pub type Handler = Arc<dyn Fn(&Request) -> Response + Send + Sync>;

/// A (method, path pattern, handler) binding.
#[derive(Clone)]
pub struct Route {
    method: String,
    path: String,
    pattern: PathPattern,
    handler: Handler,
}

impl Route {
    /// Build a route, compiling its path pattern.
    pub fn new<F>(method: impl Into<String>, path: impl Into<String>, handler: F) -> Result<Self, RoutingError>
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        Self::with_handler(method, path, Arc::new(handler))
    }

    /// Build a route from an already shared handler.
    pub fn with_handler(
        method: impl Into<String>,
        path: impl Into<String>,
        handler: Handler,
    ) -> Result<Self, RoutingError> {
        let path = path.into();
        let pattern = PathPattern::compile(&path)?;
        Ok(Self {
            method: method.into(),
            path,
            pattern,
            handler,
        })
    }

    /// Method as registered.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Path pattern as registered.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    /// True when the method matches (ignoring ASCII case) and the request
    /// path matches the compiled pattern.
    pub fn matches(&self, request: &Request) -> bool {
        if !self.method.eq_ignore_ascii_case(request.method()) {
            return false;
        }
        self.pattern.is_match(request.path())
    }

    /// Path-only test, ignoring the method.
    pub fn matches_path(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }

    /// Exact registration key comparison.
    pub fn is(&self, method: &str, path: &str) -> bool {
        self.method == method && self.path == path
    }

    /// Named path segments of `request`; empty when the path does not match.
    pub fn path_params(&self, request: &Request) -> BTreeMap<String, String> {
        self.pattern.captures(request.path()).unwrap_or_default()
    }

    /// Invoke the handler.
    pub fn handle(&self, request: &Request) -> Response {
        (self.handler)(request)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}
