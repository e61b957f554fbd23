//! Extract → aggregate → generate, strictly in sequence.

use slidescript_observability::{record_duration, record_error, stage_span};

use crate::aggregate::SlideContext;
use crate::config::{ScriptConfig, build_provider};
use crate::context::ContextDocument;
use crate::element::RawElement;
use crate::error::Result;
use crate::generator::{GenerationResult, GroundedGenerator};
use crate::source::ElementSource;

#[derive(Debug)]
pub struct ScriptPipeline {
    generator: GroundedGenerator,
}

impl ScriptPipeline {
    pub fn new(generator: GroundedGenerator) -> Self {
        Self { generator }
    }

    /// Build the backend from `config` and wrap it.
    pub fn from_config(config: &ScriptConfig) -> Result<Self> {
        let backend = build_provider(config)?;
        let generator = GroundedGenerator::new(backend, config.model.clone())
            .with_options(config.generate_options());
        Ok(Self::new(generator))
    }

    pub fn generator(&self) -> &GroundedGenerator {
        &self.generator
    }

    /// Aggregate `elements` and generate a script from the result.
    ///
    /// Element validation fails before the backend is contacted.
    pub async fn run(&self, elements: Vec<RawElement>) -> Result<GenerationResult> {
        let context = build_context(elements)?;
        self.generator.generate_script(context).await
    }

    pub async fn run_source(&self, source: &dyn ElementSource) -> Result<GenerationResult> {
        let elements = extract(source)?;
        self.run(elements).await
    }
}

/// Extraction stage, traced.
pub fn extract(source: &dyn ElementSource) -> Result<Vec<RawElement>> {
    let span = stage_span!("extract");
    let _guard = span.enter();
    let started = std::time::Instant::now();

    let elements = source.elements().inspect_err(|e| record_error(e))?;
    record_duration("duration_ms", started.elapsed());
    tracing::info!(source = %source.describe(), elements = elements.len(), "Extracted elements");
    Ok(elements)
}

/// Aggregation stage, traced.
pub fn build_context(elements: Vec<RawElement>) -> Result<ContextDocument> {
    let span = stage_span!("aggregate");
    let _guard = span.enter();
    let started = std::time::Instant::now();
    let count = elements.len();

    let slides = SlideContext::from_raw(elements).inspect_err(|e| record_error(e))?;
    let context = slides.render();
    record_duration("duration_ms", started.elapsed());
    tracing::info!(
        elements = count,
        slides = slides.len(),
        context_len = context.len(),
        "Built slide context"
    );
    Ok(context)
}
