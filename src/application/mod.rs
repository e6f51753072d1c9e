//! Orchestration layer.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     AppConfig → App::from_config (register routes) → Kernel::new(app)
//!
//! Per request:
//!     raw text → Kernel::handle_raw → Request::parse → Router::handle → Response
//! ```
//!
//! # Design Decisions
//! - One Router value owned by the App, no process-wide registry
//! - The Kernel takes the App by value; mutation ends before serving starts

pub mod app;
pub mod kernel;

pub use app::App;
pub use kernel::Kernel;
