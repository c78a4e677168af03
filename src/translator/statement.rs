//! Immutable statement text produced by the translator.

use std::fmt;
use std::sync::Arc;

/// Rendered statement text. Immutable once built; clones share the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    text: Arc<str>,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::from(text.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Statement {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for Statement {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Statement {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
