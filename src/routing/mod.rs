//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration:
//!     (method, "/item/:id", handler)
//!     → pattern.rs (compile to ^/item/([^/]+?)/?$)
//!     → route.rs (bind method + matcher + handler)
//!     → collection.rs (append; order = priority)
//!
//! Incoming Request:
//!     → router.rs (scan routes in order)
//!     → route.rs (method check, then path check)
//!     → handler(request) | 405 | 404
//! ```
//!
//! # Design Decisions
//! - Patterns compiled at registration, never per request
//! - First match wins
//! - Query strings are ignored by matching

use thiserror::Error;

pub mod collection;
pub mod pattern;
pub mod route;
pub mod router;

pub use collection::RouteCollection;
pub use pattern::PathPattern;
pub use route::{Handler, Route};
pub use router::Router;

/// Errors raised by route registration and exact lookup.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No route registered under exactly this method and path.
    #[error("Route not found: {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// The compiled pattern was rejected by the regex engine.
    #[error("Invalid path pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
