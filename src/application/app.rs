//! Application object: owns the router and accepts route registrations.

use crate::config::{AppConfig, RouteConfig, RouterConfig};
use crate::http::{HeaderMap, Request, Response};
use crate::routing::{Router, RoutingError};

/// Owns the [`Router`]; routes are registered here before serving.
#[derive(Debug, Clone, Default)]
pub struct App {
    router: Router,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            router: Router::with_config(config),
        }
    }

    /// Build an app with the configured policy and static routes.
    pub fn from_config(config: &AppConfig) -> Result<Self, RoutingError> {
        let mut app = Self::with_config(config.router.clone());
        for route in &config.routes {
            app.register_static(route)?;
        }
        tracing::info!(routes = app.router.routes().len(), "Routes registered from configuration");
        Ok(app)
    }

    /// Register a handler for `method` and `path`.
    pub fn register_route<F>(&mut self, method: &str, path: &str, handler: F) -> Result<(), RoutingError>
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.router.add_route(method, path, handler)
    }

    /// Register a route answering with the fixed response described by `route`.
    pub fn register_static(&mut self, route: &RouteConfig) -> Result<(), RoutingError> {
        let response = Response::new(
            route.status,
            route.message.clone(),
            route.body.clone(),
            HeaderMap::from([("Content-Type", route.content_type.clone())]),
        );
        self.register_route(&route.method, &route.path, move |_: &Request| response.clone())
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }
}
