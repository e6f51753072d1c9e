//! Per-connection request reading and lifecycle tracking.
//!
//! # Responsibilities
//! - Read one complete request: header block, then `Content-Length` bytes
//! - Track live connections so shutdown can drain them
//!
//! # Design Decisions
//! - One request per connection; the socket is closed after the response
//! - Request size is bounded before anything is dispatched

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::watch;

use crate::http::Response;

static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn next() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Failure while reading a request off the wire.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Connection closed before a full request arrived")]
    Incomplete,

    #[error("Timed out reading request")]
    Timeout,
}

impl ReadError {
    /// Response to send back, if the peer can still receive one.
    pub fn to_response(&self) -> Option<Response> {
        match self {
            ReadError::TooLarge { .. } => Some(Response::text(
                413,
                "Payload Too Large",
                "The request is larger than the server is willing to process.",
            )),
            ReadError::Timeout => Some(Response::text(
                408,
                "Request Timeout",
                "The server timed out waiting for the request.",
            )),
            ReadError::Io(_) | ReadError::Incomplete => None,
        }
    }
}

/// Read one request: everything up to the blank line ending the header
/// block, then as many body bytes as `Content-Length` announces.
pub async fn read_request<R>(reader: &mut R, limit: usize) -> Result<String, ReadError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(end) = find_header_end(&buf) {
            break end;
        }
        if buf.len() > limit {
            return Err(ReadError::TooLarge { limit });
        }
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            if buf.is_empty() {
                return Err(ReadError::Incomplete);
            }
            // Peer closed without a blank line: take what arrived.
            return Ok(String::from_utf8_lossy(&buf).into_owned());
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let content_length = content_length(&buf[..header_end]);
    let total = header_end.saturating_add(content_length);
    if total > limit {
        return Err(ReadError::TooLarge { limit });
    }

    while buf.len() < total {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Err(ReadError::Incomplete);
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    buf.truncate(total);

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Index just past the blank line (`\r\n\r\n` or `\n\n`) ending the headers.
fn find_header_end(buf: &[u8]) -> Option<usize> {
    let crlf = buf.windows(4).position(|w| w == b"\r\n\r\n").map(|i| i + 4);
    let lf = buf.windows(2).position(|w| w == b"\n\n").map(|i| i + 2);
    match (crlf, lf) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// `Content-Length` from the header block, matched case-insensitively; 0 if absent.
fn content_length(head: &[u8]) -> usize {
    String::from_utf8_lossy(head)
        .lines()
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Counts live connections and signals when the count drops to zero.
#[derive(Debug, Clone)]
pub struct ConnectionTracker {
    active: Arc<AtomicU64>,
    idle_tx: Arc<watch::Sender<()>>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        let (idle_tx, _) = watch::channel(());
        Self {
            active: Arc::new(AtomicU64::new(0)),
            idle_tx: Arc::new(idle_tx),
        }
    }

    /// Record a new connection. The count drops when the guard is dropped.
    pub fn track(&self) -> ConnectionGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        ConnectionGuard {
            tracker: self.clone(),
            id: ConnectionId::next(),
        }
    }

    pub fn active_count(&self) -> u64 {
        self.active.load(Ordering::SeqCst)
    }

    /// Resolve once no connection is live.
    pub async fn wait_idle(&self) {
        let mut idle_rx = self.idle_tx.subscribe();
        while self.active_count() > 0 {
            if idle_rx.changed().await.is_err() {
                break;
            }
        }
    }
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Live-connection marker handed out by [`ConnectionTracker::track`].
#[derive(Debug)]
pub struct ConnectionGuard {
    tracker: ConnectionTracker,
    id: ConnectionId,
}

impl ConnectionGuard {
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if self.tracker.active.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.tracker.idle_tx.send_replace(());
        }
        tracing::trace!(connection_id = %self.id, "Connection closed");
    }
}
