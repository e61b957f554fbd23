//! Grounded generation: one backend call per context document.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use slidescript_llms::{
    FinishReason, FinishReasonKind, GenerateOptions, GenerateRequest, Provider, Usage,
};
use slidescript_observability::{backend_span, record_duration, record_error};
use tracing::Instrument;

use crate::context::ContextDocument;
use crate::error::{PipelineError, Result};
use crate::prompt::PromptRequest;

/// The backend's text, untouched, plus what the backend reported about producing it.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub text: String,
    pub model: Option<String>,
    pub finish_reason: FinishReason,
    pub usage: Usage,
}

impl GenerationResult {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// True when the backend stopped at its token limit.
    pub fn is_truncated(&self) -> bool {
        self.finish_reason.unified == FinishReasonKind::Length
    }
}

pub struct GroundedGenerator {
    backend: Arc<dyn Provider>,
    model: String,
    options: GenerateOptions,
}

impl GroundedGenerator {
    pub fn new(backend: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            options: GenerateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn backend_id(&self) -> &str {
        self.backend.provider_id()
    }

    /// Ask the backend for a speaker script covering every slide in `context`.
    ///
    /// An empty context is still sent.
    pub async fn generate_script(&self, context: ContextDocument) -> Result<GenerationResult> {
        self.generate(&PromptRequest::speaker_script(context)).await
    }

    /// Send `prompt` to the backend once. Failures surface as
    /// [`PipelineError::BackendUnavailable`] or [`PipelineError::BackendRejected`].
    pub async fn generate(&self, prompt: &PromptRequest) -> Result<GenerationResult> {
        let request = self.build_request(prompt);
        let span = backend_span!(self.backend.provider_id(), self.model.as_str());

        async move {
            tracing::info!(
                context_len = prompt.grounding_context.len(),
                "Requesting speaker script"
            );
            let started = Instant::now();
            let outcome = self.backend.generate(request).await;
            record_duration("duration_ms", started.elapsed());

            let response = match outcome {
                Ok(response) => response,
                Err(e) => {
                    let err = PipelineError::from(e);
                    record_error(&err);
                    return Err(err);
                }
            };

            let result = GenerationResult {
                model: response.model().map(str::to_string),
                finish_reason: response.finish_reason.clone(),
                usage: response.usage.clone(),
                text: response.into_text(),
            };

            if result.is_truncated() {
                tracing::warn!(
                    completion_tokens = result.usage.completion_tokens,
                    "Backend stopped at its token limit; script may be incomplete"
                );
            }
            tracing::info!(
                finish_reason = ?result.finish_reason.unified,
                total_tokens = result.usage.total_tokens,
                script_len = result.text.len(),
                "Speaker script received"
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }

    pub fn build_request(&self, prompt: &PromptRequest) -> GenerateRequest {
        GenerateRequest::new(self.model.clone(), prompt.to_messages())
            .with_options(self.options.clone())
    }
}

impl std::fmt::Debug for GroundedGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroundedGenerator")
            .field("backend", &self.backend.provider_id())
            .field("model", &self.model)
            .field("options", &self.options)
            .finish()
    }
}
