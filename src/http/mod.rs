//! HTTP message model.
//!
//! # Data Flow
//! ```text
//! raw request text
//!     → message.rs (split start line / headers / body)
//!     → request.rs (method, uri, version; derived path & params)
//!     → [routing layer picks a handler]
//!     → response.rs (status line, headers, body)
//!     → raw response text
//! ```
//!
//! # Design Decisions
//! - Parsing is permissive: malformed lines are skipped, never fatal
//! - Headers serialize in ascending key order for deterministic output
//! - No chunked encoding, header folding or streaming bodies

pub mod headers;
pub mod message;
pub mod request;
pub mod response;

pub use headers::HeaderMap;
pub use request::Request;
pub use response::Response;
