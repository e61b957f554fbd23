use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateResponse, Headers};

/// A generation backend: one blocking-until-complete chat completion per call.
///
/// Implementations must not retry on their own; callers decide what a failure means.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier (e.g. `"groq"`, `"openai"`).
    fn provider_id(&self) -> &str;

    /// Headers sent with every request, merged with per-request custom headers.
    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers;

    /// Models this provider is known to serve.
    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// Submit the full message sequence and wait for the complete response.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}
