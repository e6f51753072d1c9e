//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files, and
//! every section has defaults so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration for the `serve` command.
    pub listener: ListenerConfig,

    /// Dispatch policy.
    pub router: RouterConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Static routes registered at startup, in priority order.
    pub routes: Vec<RouteConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,

    /// Largest request accepted, header block plus body, in bytes.
    pub max_request_bytes: usize,

    /// Time allowed to read a full request, in seconds.
    pub read_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            max_connections: 1024,
            max_request_bytes: 1024 * 1024, // 1MB
            read_timeout_secs: 30,
        }
    }
}

/// What happens when a (method, path) pair is registered twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Append; the earlier route keeps winning.
    #[default]
    Shadow,
    /// Remove the earlier route(s) first.
    Replace,
}

/// Router dispatch policy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Answer 405 instead of 404 when the path matches under another method.
    pub method_not_allowed: bool,

    /// Behaviour on repeated registration.
    pub duplicate_policy: DuplicatePolicy,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// A static route answering with a fixed response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// HTTP method (matched case-insensitively).
    pub method: String,

    /// Path pattern, e.g. `/item/:id`.
    pub path: String,

    #[serde(default = "default_status")]
    pub status: u16,

    #[serde(default = "default_message")]
    pub message: String,

    #[serde(default)]
    pub body: String,

    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_status() -> u16 {
    200
}

fn default_message() -> String {
    "OK".to_string()
}

fn default_content_type() -> String {
    "text/plain".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert!(!config.router.method_not_allowed);
        assert_eq!(config.router.duplicate_policy, DuplicatePolicy::Shadow);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_full_document() {
        let config: AppConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "0.0.0.0:9000"
            max_connections = 16

            [router]
            method_not_allowed = true
            duplicate_policy = "replace"

            [[routes]]
            method = "GET"
            path = "/home"
            body = "Welcome to the home page!"

            [[routes]]
            method = "POST"
            path = "/submit"
            status = 201
            message = "Created"
            content_type = "application/json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "0.0.0.0:9000");
        assert_eq!(config.listener.max_connections, 16);
        assert_eq!(config.listener.read_timeout_secs, 30);
        assert!(config.router.method_not_allowed);
        assert_eq!(config.router.duplicate_policy, DuplicatePolicy::Replace);

        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].status, 200);
        assert_eq!(config.routes[0].message, "OK");
        assert_eq!(config.routes[0].content_type, "text/plain");
        assert_eq!(config.routes[1].status, 201);
        assert_eq!(config.routes[1].body, "");
    }
}
