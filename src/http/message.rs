//! Shared wire handling for requests and responses.
//!
//! # Responsibilities
//! - Split raw text into start line, header block and body
//! - Write start line, sorted headers and body back out
//!
//! # Design Decisions
//! - Parsing is best-effort: malformed header lines are skipped, never fatal
//! - The body is reassembled one line at a time with `\n` after every line,
//!   so a parsed body always ends in `\n` when non-empty
//! - Output does not add anything to the body

use std::fmt;

use crate::http::headers::HeaderMap;

/// Delimiter between header name and value.
const HEADER_DELIMITER: &str = ": ";

/// A message split into its three sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMessage<'a> {
    /// First line, trailing `\r` included if present.
    pub start_line: Option<&'a str>,
    /// Headers parsed from the header block.
    pub headers: HeaderMap,
    /// Reassembled body.
    pub body: String,
}

impl<'a> RawMessage<'a> {
    /// Split `raw` into start line, headers and body.
    pub fn parse(raw: &'a str) -> Self {
        let mut lines = raw.split_terminator('\n');
        let start_line = lines.next();

        let mut headers = HeaderMap::new();
        for line in lines.by_ref() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                break;
            }
            match line.split_once(HEADER_DELIMITER) {
                Some((key, value)) => {
                    headers.insert(key, value);
                }
                None => {
                    tracing::debug!(line = %line, "Skipping malformed header line");
                }
            }
        }

        let mut body = String::new();
        for line in lines {
            body.push_str(line);
            body.push('\n');
        }

        Self {
            start_line,
            headers,
            body,
        }
    }
}

/// Write a full message: start line, headers, blank line, body.
pub fn write_message(
    f: &mut fmt::Formatter<'_>,
    start_line: fmt::Arguments<'_>,
    headers: &HeaderMap,
    body: &str,
) -> fmt::Result {
    write!(f, "{}\r\n", start_line)?;
    write!(f, "{}", headers)?;
    f.write_str("\r\n")?;
    f.write_str(body)
}
