//! Request dispatch.
//!
//! # Responsibilities
//! - Own the route collection and the dispatch policy
//! - Invoke the first matching route's handler
//! - Synthesize 404, or 405 when enabled and only the method is wrong
//!
//! # Design Decisions
//! - Not internally synchronized: register everything, then share read-only
//! - Explicit fallback responses rather than errors on no-match

use crate::config::{DuplicatePolicy, RouterConfig};
use crate::http::{Request, Response};
use crate::routing::collection::RouteCollection;
use crate::routing::route::Route;
use crate::routing::RoutingError;

/// Ordered router with a configurable fallback policy.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: RouteCollection,
    config: RouterConfig,
}

impl Router {
    /// Router with the default policy (shadow duplicates, 404 only).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            routes: RouteCollection::new(),
            config,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Register a route. Under [`DuplicatePolicy::Replace`] routes with the
    /// same method and path are removed first.
    pub fn add_route<F>(&mut self, method: &str, path: &str, handler: F) -> Result<(), RoutingError>
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        let route = Route::new(method, path, handler)?;
        self.insert(route);
        Ok(())
    }

    /// Register an already built route, honouring the duplicate policy.
    pub fn insert(&mut self, route: Route) {
        if self.config.duplicate_policy == DuplicatePolicy::Replace {
            let replaced = self.routes.remove_route(route.method(), route.path());
            if replaced > 0 {
                tracing::info!(
                    method = %route.method(),
                    path = %route.path(),
                    replaced,
                    "Replacing existing route"
                );
            }
        }
        self.routes.push(route);
    }

    pub fn remove_route(&mut self, method: &str, path: &str) -> usize {
        self.routes.remove_route(method, path)
    }

    pub fn get_route(&self, method: &str, path: &str) -> Result<&Route, RoutingError> {
        self.routes.get_route(method, path)
    }

    pub fn routes(&self) -> &RouteCollection {
        &self.routes
    }

    /// Dispatch a request.
    pub fn handle(&self, request: &Request) -> Response {
        if let Some(route) = self.routes.find(request) {
            tracing::debug!(
                method = %request.method(),
                uri = %request.uri(),
                route = %route.path(),
                "Route matched"
            );
            return route.handle(request);
        }

        if self.config.method_not_allowed {
            let allowed = self.routes.allowed_methods(request.path());
            if !allowed.is_empty() {
                tracing::debug!(
                    method = %request.method(),
                    path = %request.path(),
                    allowed = ?allowed,
                    "Method not allowed"
                );
                return Response::method_not_allowed(&allowed);
            }
        }

        tracing::debug!(method = %request.method(), uri = %request.uri(), "No route matched");
        Response::not_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::NOT_FOUND_BODY;
    use crate::http::HeaderMap;

    fn get_handler(_: &Request) -> Response {
        Response::text(200, "OK", "GET response")
    }

    fn post_handler(_: &Request) -> Response {
        Response::text(200, "OK", "POST response")
    }

    fn request(method: &str, uri: &str) -> Request {
        Request::new(method, uri, "HTTP/1.1", "", HeaderMap::new())
    }

    #[test]
    fn test_add_and_handle_single_route() {
        let mut router = Router::new();
        router.add_route("GET", "/sample", get_handler).unwrap();

        let response = router.handle(&request("GET", "/sample"));
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body(), "GET response");
    }

    #[test]
    fn test_no_routes_configured() {
        let router = Router::new();
        let response = router.handle(&request("GET", "/sample"));

        assert_eq!(response.status_code(), 404);
        assert_eq!(response.status_message(), "Not Found");
        assert_eq!(response.body(), NOT_FOUND_BODY);
        assert_eq!(response.header("Content-Type"), "text/plain");
    }

    #[test]
    fn test_different_methods_same_path() {
        let mut router = Router::new();
        router.add_route("GET", "/sample", get_handler).unwrap();
        router.add_route("POST", "/sample", post_handler).unwrap();

        assert_eq!(router.handle(&request("GET", "/sample")).body(), "GET response");
        assert_eq!(router.handle(&request("POST", "/sample")).body(), "POST response");
    }

    #[test]
    fn test_case_insensitive_method() {
        let mut router = Router::new();
        router.add_route("GET", "/sample", get_handler).unwrap();
        assert_eq!(router.handle(&request("get", "/sample")).body(), "GET response");
    }

    #[test]
    fn test_duplicate_shadowed_by_default() {
        let mut router = Router::new();
        router.add_route("GET", "/sample", get_handler).unwrap();
        router.add_route("GET", "/sample", post_handler).unwrap();

        assert_eq!(router.routes().len(), 2);
        assert_eq!(router.handle(&request("GET", "/sample")).body(), "GET response");
    }

    #[test]
    fn test_duplicate_replaced_when_configured() {
        let mut router = Router::with_config(RouterConfig {
            duplicate_policy: DuplicatePolicy::Replace,
            ..RouterConfig::default()
        });
        router.add_route("GET", "/sample", get_handler).unwrap();
        router.add_route("GET", "/sample", post_handler).unwrap();

        assert_eq!(router.routes().len(), 1);
        assert_eq!(router.handle(&request("GET", "/sample")).body(), "POST response");
    }

    #[test]
    fn test_wrong_method_is_404_by_default() {
        let mut router = Router::new();
        router.add_route("GET", "/sample", get_handler).unwrap();
        assert_eq!(router.handle(&request("POST", "/sample")).status_code(), 404);
    }

    #[test]
    fn test_wrong_method_is_405_when_enabled() {
        let mut router = Router::with_config(RouterConfig {
            method_not_allowed: true,
            ..RouterConfig::default()
        });
        router.add_route("GET", "/item/:id", get_handler).unwrap();
        router.add_route("PUT", "/item/:id", get_handler).unwrap();

        let response = router.handle(&request("DELETE", "/item/7"));
        assert_eq!(response.status_code(), 405);
        assert_eq!(response.status_message(), "Method Not Allowed");
        assert_eq!(response.header("Allow"), "GET, PUT");

        // Unknown paths still get 404.
        assert_eq!(router.handle(&request("DELETE", "/nothing")).status_code(), 404);
    }

    #[test]
    fn test_remove_then_get_route() {
        let mut router = Router::new();
        router.add_route("GET", "/sample", get_handler).unwrap();
        assert!(router.get_route("GET", "/sample").is_ok());

        assert_eq!(router.remove_route("GET", "/sample"), 1);
        assert!(router.get_route("GET", "/sample").is_err());
    }
}
