//! Path pattern compilation.
//!
//! # Responsibilities
//! - Turn `/item/:id` style patterns into an anchored regex
//! - Remember placeholder names in order for parameter extraction
//!
//! # Design Decisions
//! - Compiled once, when the route is registered
//! - Literal characters are regex-escaped, so `.` only matches a dot
//! - One optional trailing slash is always accepted

use std::collections::BTreeMap;

use regex::Regex;

use crate::routing::RoutingError;

/// Regex emitted in place of each `:name` placeholder.
const SEGMENT: &str = "([^/]+?)";

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    regex: Regex,
    param_names: Vec<String>,
}

impl PathPattern {
    /// Compile a pattern such as `/users/:id/posts/:post_id`.
    pub fn compile(pattern: &str) -> Result<Self, RoutingError> {
        let (source, param_names) = pattern_to_regex(pattern);
        let regex = Regex::new(&source).map_err(|source| RoutingError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        tracing::trace!(pattern = %pattern, regex = %regex, "Compiled path pattern");

        Ok(Self { regex, param_names })
    }

    /// Full-string match against a path.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Named segments captured from `path`.
    ///
    /// Returns `None` when the path does not match. A name used twice keeps
    /// the later value; placeholders without a name are not reported.
    pub fn captures(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let caps = self.regex.captures(path)?;
        let mut params = BTreeMap::new();
        for (i, name) in self.param_names.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            if let Some(value) = caps.get(i + 1) {
                params.insert(name.clone(), value.as_str().to_string());
            }
        }
        Some(params)
    }

    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Translate a pattern into regex source plus the placeholder names.
fn pattern_to_regex(pattern: &str) -> (String, Vec<String>) {
    let mut source = String::with_capacity(pattern.len() + 8);
    let mut names = Vec::new();
    let mut chars = pattern.chars().peekable();

    source.push('^');
    while let Some(c) = chars.next() {
        match c {
            ':' => {
                let mut name = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                source.push_str(SEGMENT);
                names.push(name);
            }
            '/' => source.push('/'),
            other => {
                let mut buf = [0u8; 4];
                source.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }
    source.push_str("/?$");

    (source, names)
}
