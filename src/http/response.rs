//! Response model, parsing and serialization.
//!
//! # Design Decisions
//! - The status line is always written as `HTTP/1.1`; a parsed version is discarded
//! - The status message keeps internal spacing; only one leading space and a
//!   trailing `\r` are removed when parsing

use std::fmt;

use crate::http::headers::HeaderMap;
use crate::http::message::{write_message, RawMessage};

/// Version token written on every status line.
pub const HTTP_VERSION: &str = "HTTP/1.1";

pub const NOT_FOUND_BODY: &str = "The requested URL was not found on this server.";
pub const METHOD_NOT_ALLOWED_BODY: &str = "The requested method is not allowed for this URL.";

/// An HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    status_message: String,
    headers: HeaderMap,
    body: String,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            status_code: 200,
            status_message: "OK".to_string(),
            headers: HeaderMap::new(),
            body: String::new(),
        }
    }
}

impl Response {
    pub fn new(
        status_code: u16,
        status_message: impl Into<String>,
        body: impl Into<String>,
        headers: HeaderMap,
    ) -> Self {
        Self {
            status_code,
            status_message: status_message.into(),
            headers,
            body: body.into(),
        }
    }

    /// A `text/plain` response.
    pub fn text(status_code: u16, status_message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(
            status_code,
            status_message,
            body,
            HeaderMap::from([("Content-Type", "text/plain")]),
        )
    }

    /// The response sent when no route matches.
    pub fn not_found() -> Self {
        Self::text(404, "Not Found", NOT_FOUND_BODY)
    }

    /// The response sent when the path matches under other methods only.
    pub fn method_not_allowed(allowed: &[String]) -> Self {
        Self::text(405, "Method Not Allowed", METHOD_NOT_ALLOWED_BODY)
            .with_header("Allow", allowed.join(", "))
    }

    /// Build a response by parsing raw text into a default one.
    pub fn parsed(raw: &str) -> Self {
        let mut response = Self::default();
        response.parse(raw);
        response
    }

    /// Parse raw text into this response.
    ///
    /// Never fails: a missing or non-numeric status code leaves the stored
    /// one untouched, and malformed header lines are skipped.
    pub fn parse(&mut self, raw: &str) {
        let message = RawMessage::parse(raw);

        if let Some(line) = message.start_line {
            self.parse_status_line(line);
        }

        self.headers.extend(message.headers);
        self.body = message.body;
    }

    fn parse_status_line(&mut self, line: &str) {
        // Skip the version token.
        let rest = line.trim_start();
        let rest = match rest.find(char::is_whitespace) {
            Some(end) => &rest[end..],
            None => return,
        };

        let rest = rest.trim_start();
        let (code, message) = match rest.find(char::is_whitespace) {
            Some(end) => rest.split_at(end),
            None => (rest, ""),
        };

        match code.parse::<u16>() {
            Ok(code) => self.status_code = code,
            Err(_) => {
                tracing::debug!(status = %code, "Unparseable status code");
                return;
            }
        }

        let message = message.strip_prefix(' ').unwrap_or(message);
        let message = message.strip_suffix('\r').unwrap_or(message);
        self.status_message = message.to_string();
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value, or an empty string when absent.
    pub fn header(&self, key: &str) -> &str {
        self.headers.get(key).unwrap_or_default()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_status_code(&mut self, status_code: u16) {
        self.status_code = status_code;
    }

    pub fn set_status_message(&mut self, status_message: impl Into<String>) {
        self.status_message = status_message.into();
    }

    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(key, value);
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(key, value);
        self
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_message(
            f,
            format_args!("{} {} {}", HTTP_VERSION, self.status_code, self.status_message),
            &self.headers,
            &self.body,
        )
    }
}
