//! Request model, parsing and serialization.
//!
//! # Responsibilities
//! - Parse `METHOD URI VERSION`, headers and body from raw text
//! - Serialize back to wire format with sorted headers
//! - Derive path, query parameters and body ("input") parameters
//!
//! # Design Decisions
//! - Method is stored verbatim; routing compares it case-insensitively
//! - Derived views are recomputed on each call, never cached
//! - No percent-decoding: `a%20b` and `a+b` come back as written

use std::collections::BTreeMap;
use std::fmt;

use crate::http::headers::HeaderMap;
use crate::http::message::{write_message, RawMessage};

/// An HTTP request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    method: String,
    uri: String,
    version: String,
    headers: HeaderMap,
    body: String,
}

impl Request {
    pub fn new(
        method: impl Into<String>,
        uri: impl Into<String>,
        version: impl Into<String>,
        body: impl Into<String>,
        headers: HeaderMap,
    ) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            version: version.into(),
            headers,
            body: body.into(),
        }
    }

    /// Build a request by parsing raw text into an empty one.
    pub fn parsed(raw: &str) -> Self {
        let mut request = Self::default();
        request.parse(raw);
        request
    }

    /// Parse raw text into this request.
    ///
    /// Start line tokens that are present overwrite the stored fields, parsed
    /// headers are merged into the existing ones and the body is replaced.
    /// Malformed input never fails; it leaves fields partially populated.
    pub fn parse(&mut self, raw: &str) {
        let message = RawMessage::parse(raw);

        if let Some(line) = message.start_line {
            let mut tokens = line.split_whitespace();
            if let Some(method) = tokens.next() {
                self.method = method.to_string();
            }
            if let Some(uri) = tokens.next() {
                self.uri = uri.to_string();
            }
            if let Some(version) = tokens.next() {
                self.version = version.to_string();
            }
        }

        self.headers.extend(message.headers);
        self.body = message.body;
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value, or an empty string when absent.
    pub fn header(&self, key: &str) -> &str {
        self.headers.get(key).unwrap_or_default()
    }

    pub fn set_method(&mut self, method: impl Into<String>) {
        self.method = method.into();
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) {
        self.uri = uri.into();
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    pub fn set_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(key, value);
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// URI up to, not including, the first `?`.
    pub fn path(&self) -> &str {
        match self.uri.split_once('?') {
            Some((path, _)) => path,
            None => &self.uri,
        }
    }

    /// Pairs from the query string; empty when the URI has no `?`.
    pub fn query_parameters(&self) -> BTreeMap<String, String> {
        match self.uri.split_once('?') {
            Some((_, query)) => parse_pairs(query),
            None => BTreeMap::new(),
        }
    }

    /// Query parameter value, or an empty string when absent.
    pub fn query_parameter(&self, key: &str) -> String {
        self.query_parameters().remove(key).unwrap_or_default()
    }

    /// Pairs from the body, whatever the content type.
    pub fn input_parameters(&self) -> BTreeMap<String, String> {
        parse_pairs(&self.body)
    }

    /// Input parameter value, or an empty string when absent.
    pub fn input_parameter(&self, key: &str) -> String {
        self.input_parameters().remove(key).unwrap_or_default()
    }
}

/// Parse `key=value&key=value`. Pairs without `=` are skipped, later keys win.
fn parse_pairs(input: &str) -> BTreeMap<String, String> {
    input
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_message(
            f,
            format_args!("{} {} {}", self.method, self.uri, self.version),
            &self.headers,
            &self.body,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_request() -> &'static str {
        "POST /submit?x=1 HTTP/1.1\r\n\
         Host: example.com\r\n\
         Content-Type: application/x-www-form-urlencoded\r\n\
         \r\n\
         body_content"
    }

    #[test]
    fn test_parse_start_line_and_headers() {
        let request = Request::parsed(raw_request());

        assert_eq!(request.method(), "POST");
        assert_eq!(request.uri(), "/submit?x=1");
        assert_eq!(request.version(), "HTTP/1.1");
        assert_eq!(request.header("Host"), "example.com");
        assert_eq!(
            request.header("Content-Type"),
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn test_parse_body_gets_one_newline_per_line() {
        let request = Request::parsed(raw_request());
        assert_eq!(request.body(), "body_content\n");
    }

    #[test]
    fn test_parse_preserves_method_case() {
        let request = Request::parsed("get /x HTTP/1.1\r\n\r\n");
        assert_eq!(request.method(), "get");
    }

    #[test]
    fn test_parse_short_start_line_is_partial() {
        let request = Request::parsed("GET\r\n\r\n");
        assert_eq!(request.method(), "GET");
        assert_eq!(request.uri(), "");
        assert_eq!(request.version(), "");
    }

    #[test]
    fn test_parse_merges_into_existing_headers() {
        let mut request = Request::default();
        request.set_header("X-Existing", "1");
        request.set_header("Host", "old");
        request.parse("GET / HTTP/1.1\r\nHost: new\r\n\r\n");

        assert_eq!(request.header("X-Existing"), "1");
        assert_eq!(request.header("Host"), "new");
    }

    #[test]
    fn test_missing_header_is_empty() {
        let request = Request::default();
        assert_eq!(request.header("Missing"), "");
    }

    #[test]
    fn test_to_string_sorts_headers() {
        let mut request = Request::new("GET", "/home", "HTTP/1.1", "", HeaderMap::new());
        request.set_header("User-Agent", "test");
        request.set_header("Accept", "*/*");
        request.set_header("Host", "example.com");

        assert_eq!(
            request.to_string(),
            "GET /home HTTP/1.1\r\n\
             Accept: */*\r\n\
             Host: example.com\r\n\
             User-Agent: test\r\n\
             \r\n"
        );
    }

    #[test]
    fn test_to_string_body_verbatim() {
        let request = Request::new("POST", "/submit", "HTTP/1.1", "a=1", HeaderMap::new());
        assert!(request.to_string().ends_with("\r\n\r\na=1"));
    }

    #[test]
    fn test_path_strips_query() {
        let mut request = Request::default();
        request.set_uri("/search?q=example&lang=en");
        assert_eq!(request.path(), "/search");

        request.set_uri("/plain");
        assert_eq!(request.path(), "/plain");
    }

    #[test]
    fn test_query_parameters() {
        let mut request = Request::default();
        request.set_uri("/search?q=example&lang=en");

        let params = request.query_parameters();
        assert_eq!(params.len(), 2);
        assert_eq!(params["q"], "example");
        assert_eq!(params["lang"], "en");
        assert_eq!(request.query_parameter("q"), "example");
        assert_eq!(request.query_parameter("missing"), "");
    }

    #[test]
    fn test_query_parameters_without_query() {
        let mut request = Request::default();
        request.set_uri("/search");
        assert!(request.query_parameters().is_empty());
    }

    #[test]
    fn test_query_pair_without_equals_skipped() {
        let mut request = Request::default();
        request.set_uri("/s?flag&k=v=w&&k2=");

        let params = request.query_parameters();
        assert_eq!(params.len(), 2);
        assert_eq!(params["k"], "v=w");
        assert_eq!(params["k2"], "");
    }

    #[test]
    fn test_input_parameters() {
        let mut request = Request::default();
        request.set_body("name=John&age=30");

        let params = request.input_parameters();
        assert_eq!(params["name"], "John");
        assert_eq!(params["age"], "30");
        assert_eq!(request.input_parameter("name"), "John");
        assert_eq!(request.input_parameter("missing"), "");
    }

    #[test]
    fn test_input_parameters_not_decoded() {
        let mut request = Request::default();
        request.set_body("q=a%20b+c");
        assert_eq!(request.input_parameter("q"), "a%20b+c");
    }
}
