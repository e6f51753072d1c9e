//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (status codes, connection caps)
//! - Reject route entries that can never be dispatched
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::{AppConfig, RouteConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address must not be empty")]
    EmptyBindAddress,

    #[error("listener.{0} must be greater than zero")]
    ZeroLimit(&'static str),

    #[error("routes[{index}]: method {method:?} is not a single token")]
    InvalidMethod { index: usize, method: String },

    #[error("routes[{index}]: path {path:?} must start with '/'")]
    InvalidPath { index: usize, path: String },

    #[error("routes[{index}]: status {status} is outside 100..=599")]
    InvalidStatus { index: usize, status: u16 },
}

/// Check a parsed configuration, collecting every error.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroLimit("max_connections"));
    }
    if config.listener.max_request_bytes == 0 {
        errors.push(ValidationError::ZeroLimit("max_request_bytes"));
    }

    for (index, route) in config.routes.iter().enumerate() {
        validate_route(index, route, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(index: usize, route: &RouteConfig, errors: &mut Vec<ValidationError>) {
    if route.method.is_empty() || route.method.chars().any(|c| c.is_whitespace()) {
        errors.push(ValidationError::InvalidMethod {
            index,
            method: route.method.clone(),
        });
    }
    if !route.path.starts_with('/') {
        errors.push(ValidationError::InvalidPath {
            index,
            path: route.path.clone(),
        });
    }
    if !(100..=599).contains(&route.status) {
        errors.push(ValidationError::InvalidStatus {
            index,
            status: route.status,
        });
    }
}
