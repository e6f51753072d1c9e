//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields (method, uri, status)
//!     → spans per request in the kernel
//!
//! Consumers:
//!     → logging.rs (fmt layer on stderr, filtered by RUST_LOG / config)
//! ```

pub mod logging;
