//! slidescript-core: turn a slide deck into a grounded speaker script.
//!
//! The pipeline has two stages that run strictly one after the other:
//!
//! 1. [`aggregate`] groups extracted text fragments by slide into an ordered
//!    [`ContextDocument`] of `### Slide N:` blocks.
//! 2. [`GroundedGenerator`] wraps that document in a fixed grounding prompt and makes
//!    exactly one call to a [`slidescript_llms::Provider`].
//!
//! [`ScriptPipeline`] chains both; [`source`] supplies elements from `.pptx` files or
//! serialized extractor output.

pub mod aggregate;
pub mod config;
pub mod context;
pub mod element;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod prompt;
pub mod source;

#[cfg(test)]
mod tests;

pub use aggregate::{SlideContext, aggregate, aggregate_raw};
pub use config::{LlmProvider, ScriptConfig, build_provider};
pub use context::ContextDocument;
pub use element::{ExtractedElement, RawElement};
pub use error::{PipelineError, Result};
pub use generator::{GenerationResult, GroundedGenerator};
pub use pipeline::ScriptPipeline;
pub use prompt::PromptRequest;
pub use source::{ElementSource, JsonElementsSource, PptxSource, open_source};
