//! Minimal HTTP message model and request router.

pub mod application;
pub mod config;
pub mod http;
pub mod net;
pub mod observability;
pub mod routing;

pub use application::{App, Kernel};
pub use config::AppConfig;
pub use http::{HeaderMap, Request, Response};
pub use routing::{Route, Router, RoutingError};
