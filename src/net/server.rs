//! Accept loop feeding raw requests to the kernel.
//!
//! # Responsibilities
//! - Accept connections under the listener's limit
//! - Read one request per connection, dispatch, write, close
//! - Stop accepting on shutdown and drain live connections

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::Instrument;

use crate::application::Kernel;
use crate::config::ListenerConfig;
use crate::net::connection::{read_request, ConnectionTracker, ReadError};
use crate::net::listener::{Listener, ListenerError};

/// Serves a [`Kernel`] over plain TCP.
pub struct Server {
    kernel: Arc<Kernel>,
    config: ListenerConfig,
    tracker: ConnectionTracker,
}

impl Server {
    pub fn new(kernel: Kernel, config: ListenerConfig) -> Self {
        Self {
            kernel: Arc::new(kernel),
            config,
            tracker: ConnectionTracker::new(),
        }
    }

    /// Run until `shutdown` resolves, then wait for live connections.
    pub async fn run<F>(self, listener: Listener, shutdown: F) -> Result<(), ListenerError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!(active = self.tracker.active_count(), "Shutdown signal received, draining");
                    break;
                }
                accepted = listener.accept() => {
                    let (stream, addr, permit) = match accepted {
                        Ok(conn) => conn,
                        Err(ListenerError::Accept(e)) => {
                            tracing::warn!(error = %e, "Accept failed");
                            continue;
                        }
                        Err(e) => return Err(e),
                    };

                    let guard = self.tracker.track();
                    let kernel = Arc::clone(&self.kernel);
                    let config = self.config.clone();
                    let span = tracing::debug_span!("connection", id = %guard.id(), peer = %addr);

                    tokio::spawn(
                        async move {
                            serve_connection(stream, addr, &kernel, &config).await;
                            drop(permit);
                            drop(guard);
                        }
                        .instrument(span),
                    );
                }
            }
        }

        self.tracker.wait_idle().await;
        tracing::info!("All connections closed");
        Ok(())
    }
}

/// Handle a single connection: one request, one response.
pub async fn serve_connection(mut stream: TcpStream, addr: SocketAddr, kernel: &Kernel, config: &ListenerConfig) {
    let timeout = Duration::from_secs(config.read_timeout_secs);
    let read = tokio::time::timeout(timeout, read_request(&mut stream, config.max_request_bytes)).await;

    let output = match read {
        Ok(Ok(raw)) => kernel.handle_raw(&raw),
        Ok(Err(e)) => {
            tracing::warn!(peer = %addr, error = %e, "Failed to read request");
            match e.to_response() {
                Some(response) => response.to_string(),
                None => return,
            }
        }
        Err(_) => {
            tracing::warn!(peer = %addr, "Timed out reading request");
            match ReadError::Timeout.to_response() {
                Some(response) => response.to_string(),
                None => return,
            }
        }
    };

    if let Err(e) = stream.write_all(output.as_bytes()).await {
        tracing::warn!(peer = %addr, error = %e, "Failed to write response");
        return;
    }
    let _ = stream.shutdown().await;
}
