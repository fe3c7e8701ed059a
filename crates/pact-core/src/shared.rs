//! Shared location and key types
//!
//! These types are used by every layer of the core: guards carry public keys,
//! diagnostics and module references carry source locations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wrapper for public key text as it appears inside a keyset
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKeyText(pub String);

impl PublicKeyText {
    /// Create a new public key text wrapper
    pub fn new<S: Into<String>>(key: S) -> Self {
        PublicKeyText(key.into())
    }

    /// Get the underlying key string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublicKeyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PublicKeyText {
    fn from(s: &str) -> Self {
        PublicKeyText(s.to_string())
    }
}

impl From<String> for PublicKeyText {
    fn from(s: String) -> Self {
        PublicKeyText(s)
    }
}

/// Source position information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpanInfo {
    /// Start line number (1-based)
    pub start_line: usize,
    /// Start column number (0-based)
    pub start_column: usize,
    /// End line number (1-based)
    pub end_line: usize,
    /// End column number (0-based)
    pub end_column: usize,
}

impl SpanInfo {
    /// Create a new span info with line/column information
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        SpanInfo {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// A zero-width span at a single point
    pub fn point(line: usize, column: usize) -> Self {
        SpanInfo::new(line, column, line, column)
    }

    /// Combine two spans to create a larger span
    pub fn combine(start: SpanInfo, end: SpanInfo) -> Self {
        SpanInfo {
            start_line: start.start_line,
            start_column: start.start_column,
            end_line: end.end_line,
            end_column: end.end_column,
        }
    }
}

/// Name under which locations without a file are rendered
pub const INTERACTIVE_SOURCE: &str = "<interactive>";

/// Optional source location attached to errors, stack frames and module references.
///
/// The default value carries no location and renders as the empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Info(pub Option<SpanInfo>);

impl Info {
    /// Location at the given span
    pub fn at(span: SpanInfo) -> Self {
        Info(Some(span))
    }

    /// Whether this is the location-less default
    pub fn is_default(&self) -> bool {
        self.0.is_none()
    }

    /// Render as `<interactive>:line:column`, or `""` for the default
    pub fn render(&self) -> String {
        match &self.0 {
            Some(span) => {
                format!("{}:{}:{}", INTERACTIVE_SOURCE, span.start_line, span.start_column)
            }
            None => String::new(),
        }
    }

    /// Parse the output of [`Info::render`].
    ///
    /// Only the start position survives rendering, so the result is a point span.
    pub fn parse_rendered(text: &str) -> Option<Info> {
        if text.is_empty() {
            return Some(Info::default());
        }
        let mut parts = text.rsplitn(3, ':');
        let column = parts.next()?.parse::<usize>().ok()?;
        let line = parts.next()?.parse::<usize>().ok()?;
        let source = parts.next()?;
        if source.is_empty() {
            return None;
        }
        Some(Info::at(SpanInfo::point(line, column)))
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<SpanInfo> for Info {
    fn from(span: SpanInfo) -> Self {
        Info::at(span)
    }
}
