//! Ordered route registry.
//!
//! # Responsibilities
//! - Keep routes in registration order (= match priority)
//! - Exact (method, path) lookup and removal
//! - First-match search for a request
//!
//! # Design Decisions
//! - No uniqueness constraint: a repeated registration is shadowed by the first
//! - Lookup and removal compare raw strings, not pattern equivalence

use crate::http::{Request, Response};
use crate::routing::route::Route;
use crate::routing::RoutingError;

/// Routes in priority order.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    routes: Vec<Route>,
}

impl RouteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route built from its parts.
    pub fn add_route<F>(&mut self, method: &str, path: &str, handler: F) -> Result<(), RoutingError>
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.push(Route::new(method, path, handler)?);
        Ok(())
    }

    /// Append an already built route.
    pub fn push(&mut self, route: Route) {
        tracing::debug!(
            method = %route.method(),
            path = %route.path(),
            position = self.routes.len(),
            "Route registered"
        );
        self.routes.push(route);
    }

    /// First route registered under exactly `method` and `path`.
    pub fn get_route(&self, method: &str, path: &str) -> Result<&Route, RoutingError> {
        self.routes
            .iter()
            .find(|route| route.is(method, path))
            .ok_or_else(|| RoutingError::RouteNotFound {
                method: method.to_string(),
                path: path.to_string(),
            })
    }

    /// Remove every route registered under exactly `method` and `path`.
    /// Returns how many were removed.
    pub fn remove_route(&mut self, method: &str, path: &str) -> usize {
        let before = self.routes.len();
        self.routes.retain(|route| !route.is(method, path));
        let removed = before - self.routes.len();
        tracing::debug!(method = %method, path = %path, removed, "Routes removed");
        removed
    }

    /// First route matching the request.
    pub fn find(&self, request: &Request) -> Option<&Route> {
        self.routes.iter().find(|route| route.matches(request))
    }

    /// Methods of every route whose pattern matches `path`, in registration
    /// order, without duplicates (compared ignoring ASCII case).
    pub fn allowed_methods(&self, path: &str) -> Vec<String> {
        let mut methods: Vec<String> = Vec::new();
        for route in self.routes.iter().filter(|r| r.matches_path(path)) {
            if !methods.iter().any(|m| m.eq_ignore_ascii_case(route.method())) {
                methods.push(route.method().to_string());
            }
        }
        methods
    }

    /// Dispatch to the first matching route, or answer 404.
    pub fn handle_request(&self, request: &Request) -> Response {
        match self.find(request) {
            Some(route) => route.handle(request),
            None => Response::not_found(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteCollection {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HeaderMap;

    fn sample_handler(_: &Request) -> Response {
        Response::text(200, "OK", "Sample response")
    }

    fn collection() -> RouteCollection {
        let mut collection = RouteCollection::new();
        collection.add_route("GET", "/sample", sample_handler).unwrap();
        collection
    }

    fn request(method: &str, uri: &str, body: &str) -> Request {
        Request::new(method, uri, "HTTP/1.1", body, HeaderMap::new())
    }

    #[test]
    fn test_add_and_retrieve_route() {
        let collection = collection();
        let route = collection.get_route("GET", "/sample").unwrap();
        assert_eq!(route.method(), "GET");
        assert_eq!(route.path(), "/sample");
    }

    #[test]
    fn test_get_route_is_exact() {
        let collection = collection();
        assert!(matches!(
            collection.get_route("get", "/sample"),
            Err(RoutingError::RouteNotFound { .. })
        ));
        assert!(collection.get_route("GET", "/sample/").is_err());
    }

    #[test]
    fn test_handle_existing_route() {
        let response = collection().handle_request(&request("GET", "/sample", ""));
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body(), "Sample response");
    }

    #[test]
    fn test_handle_nonexistent_route() {
        let response = collection().handle_request(&request("GET", "/nonexistent", ""));
        assert_eq!(response.status_code(), 404);
        assert_eq!(response.status_message(), "Not Found");
    }

    #[test]
    fn test_handle_multiple_routes() {
        let mut collection = collection();
        collection.add_route("POST", "/submit", sample_handler).unwrap();

        let get = collection.handle_request(&request("GET", "/sample", ""));
        assert_eq!(get.status_code(), 200);
        let post = collection.handle_request(&request("POST", "/submit", "body=data"));
        assert_eq!(post.status_code(), 200);
    }

    #[test]
    fn test_query_parameters_do_not_block_match() {
        let response = collection().handle_request(&request("GET", "/sample?query=test", ""));
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn test_remove_route() {
        let mut collection = collection();
        collection.add_route("GET", "/sample", sample_handler).unwrap();
        collection.add_route("POST", "/sample", sample_handler).unwrap();

        assert_eq!(collection.remove_route("GET", "/sample"), 2);
        assert_eq!(collection.len(), 1);

        let response = collection.handle_request(&request("GET", "/sample", ""));
        assert_eq!(response.status_code(), 404);
    }

    #[test]
    fn test_remove_route_compares_raw_strings() {
        let mut collection = RouteCollection::new();
        collection.add_route("GET", "/item/:id", sample_handler).unwrap();

        assert_eq!(collection.remove_route("GET", "/item/:key"), 0);
        assert_eq!(collection.remove_route("GET", "/item/:id"), 1);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_allowed_methods() {
        let mut collection = collection();
        collection.add_route("post", "/sample", sample_handler).unwrap();
        collection.add_route("POST", "/sample", sample_handler).unwrap();
        collection.add_route("DELETE", "/other", sample_handler).unwrap();

        assert_eq!(collection.allowed_methods("/sample/"), vec!["GET", "post"]);
        assert!(collection.allowed_methods("/none").is_empty());
    }
}
