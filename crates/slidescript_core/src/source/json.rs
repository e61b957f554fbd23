use std::path::Path;

use crate::element::RawElement;
use crate::error::{PipelineError, Result};

use super::ElementSource;

/// Serialized extractor output: a JSON array of `{text, metadata}` records.
#[derive(Debug, Clone)]
pub struct JsonElementsSource {
    name: String,
    body: String,
}

impl JsonElementsSource {
    pub fn open(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path)?;
        Ok(Self {
            name: path.display().to_string(),
            body,
        })
    }

    pub fn from_json(body: impl Into<String>) -> Self {
        Self {
            name: "<inline json>".to_string(),
            body: body.into(),
        }
    }
}

impl ElementSource for JsonElementsSource {
    fn elements(&self) -> Result<Vec<RawElement>> {
        serde_json::from_str(&self.body).map_err(|e| {
            PipelineError::extraction(format!("{} is not an element array: {e}", self.name))
        })
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_records_in_order() {
        let source = JsonElementsSource::from_json(
            r#"[
                {"type": "Title", "text": "Intro", "metadata": {"page_number": 1}},
                {"type": "NarrativeText", "text": "Agenda", "metadata": {"page_number": 2}},
                {"text": "no page"}
            ]"#,
        );
        let elements = source.elements().unwrap();

        assert_eq!(elements.len(), 3);
        assert_eq!(elements[1].text, "Agenda");
        assert!(elements[2].metadata.is_empty());
    }

    #[test]
    fn test_rejects_non_array() {
        let err = JsonElementsSource::from_json(r#"{"text": "x"}"#)
            .elements()
            .unwrap_err();
        assert!(matches!(err, PipelineError::Extraction(_)));
    }
}
