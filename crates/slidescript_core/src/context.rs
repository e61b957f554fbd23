use std::fmt;

use serde::{Deserialize, Serialize};

/// Rendered grounding context: consecutive `### Slide N:\n\n{body}\n\n` blocks.
///
/// Produced by [`crate::aggregate`]. Embedded verbatim in the prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextDocument(String);

impl ContextDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ContextDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContextDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ContextDocument {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for ContextDocument {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}
