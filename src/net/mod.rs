//! Network layer subsystem.
//!
//! Sits outside the routing core: it only moves bytes between sockets and
//! [`Kernel::handle_raw`](crate::application::Kernel::handle_raw).
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept, connection limits)
//!     → connection.rs (read header block + Content-Length body)
//!     → server.rs (dispatch through the kernel, write, close)
//! ```
//!
//! # Design Decisions
//! - Bounded accept prevents resource exhaustion
//! - No keep-alive: one request per connection
//! - Each connection tracked for graceful shutdown

pub mod connection;
pub mod listener;
pub mod server;

pub use listener::{Listener, ListenerError};
pub use server::Server;
