//! Element sources: where `(page_number, text)` fragments come from.

mod json;
mod pptx;

use std::path::Path;

pub use json::JsonElementsSource;
pub use pptx::PptxSource;

use crate::element::RawElement;
use crate::error::{PipelineError, Result};

/// Produces the flat element stream for one deck.
pub trait ElementSource: Send + Sync {
    fn elements(&self) -> Result<Vec<RawElement>>;

    /// Short label for logs and error messages.
    fn describe(&self) -> String;
}

/// Open `path` with the source matching its extension (`.pptx` or `.json`).
pub fn open_source(path: &Path) -> Result<Box<dyn ElementSource>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pptx" => Ok(Box::new(PptxSource::open(path)?)),
        "json" => Ok(Box::new(JsonElementsSource::open(path)?)),
        _ => Err(PipelineError::extraction(format!(
            "unsupported deck format for {}: expected .pptx or .json",
            path.display()
        ))),
    }
}
