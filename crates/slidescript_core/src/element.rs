//! Extracted document elements and their boundary validation.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PipelineError, Result};

/// Metadata key carrying the slide number in extractor output.
pub const PAGE_NUMBER_KEY: &str = "page_number";

/// One validated text fragment from a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedElement {
    pub page_number: NonZeroU32,
    pub text: String,
}

impl ExtractedElement {
    pub fn new(page_number: NonZeroU32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }

    /// `None` when `page_number` is zero.
    pub fn on_page(page_number: u32, text: impl Into<String>) -> Option<Self> {
        NonZeroU32::new(page_number).map(|page| Self::new(page, text))
    }
}

/// An element as an extractor hands it over: text plus a loose attribute bag.
///
/// Serialized form: `{"text": "...", "metadata": {"page_number": 3, ...}}`.
/// Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl RawElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_page(mut self, page_number: u32) -> Self {
        self.metadata
            .insert(PAGE_NUMBER_KEY.to_string(), Value::from(page_number));
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Convert into an [`ExtractedElement`]. `index` is the element's position in its
    /// sequence and is only used for error reporting.
    pub fn validate(self, index: usize) -> Result<ExtractedElement> {
        let value = match self.metadata.get(PAGE_NUMBER_KEY) {
            None | Some(Value::Null) => return Err(PipelineError::MissingPageIdentifier { index }),
            Some(v) => v,
        };

        let page = value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .and_then(NonZeroU32::new)
            .ok_or_else(|| PipelineError::InvalidPageIdentifier {
                index,
                value: value.to_string(),
            })?;

        Ok(ExtractedElement::new(page, self.text))
    }
}

impl From<ExtractedElement> for RawElement {
    fn from(element: ExtractedElement) -> Self {
        RawElement::new(element.text).with_page(element.page_number.get())
    }
}
