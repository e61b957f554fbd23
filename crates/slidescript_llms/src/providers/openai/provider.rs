//! OpenAI-compatible provider implementation

use super::convert::{error_message, from_openai_response, to_openai_request};
use super::types::{OpenAIConfig, OpenAIResponse};
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateResponse, Headers};
use async_trait::async_trait;
use reqwest::Client;

/// Chat-completions provider. One HTTP request per `generate` call, no retries.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Environment variable for the OpenAI API key
    pub const API_KEY_ENV: &'static str = "OPENAI_API_KEY";
    /// Environment variable for the Groq API key
    pub const GROQ_API_KEY_ENV: &'static str = "GROQ_API_KEY";

    /// Create a new provider
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey(config.provider_id.clone()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    /// OpenAI with the given key
    pub fn openai(api_key: impl Into<String>) -> Result<Self> {
        Self::new(OpenAIConfig::new(api_key))
    }

    /// Groq with the given key
    pub fn groq(api_key: impl Into<String>) -> Result<Self> {
        Self::new(OpenAIConfig::groq(api_key))
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::from_status(
            &self.config.provider_id,
            status,
            error_message(&body),
        ))
    }
}

#[async_trait]
impl Provider for OpenAIProvider {
    fn provider_id(&self) -> &str {
        &self.config.provider_id
    }

    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        let mut headers = Headers::new();

        headers.insert("Authorization", format!("Bearer {}", self.config.api_key));
        headers.insert("Content-Type", "application/json");

        if let Some(custom) = custom_headers {
            headers.merge_with(custom);
        }

        headers
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/models", self.config.base_url);
        let headers = self.build_headers(None);

        let response = self
            .client
            .get(&url)
            .headers(headers.to_reqwest_headers())
            .send()
            .await?;
        let response = self.check_status(response).await?;

        let resp: serde_json::Value = response.json().await?;

        // { "data": [{ "id": "model-id", ... }, ...] }
        let models = resp
            .get("data")
            .and_then(|d| d.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|m| m.get("id").and_then(|id| id.as_str()))
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();

        Ok(models)
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let wire_request = to_openai_request(&request);
        let headers = self.build_headers(request.options.headers.as_ref());

        tracing::debug!(
            provider = %self.config.provider_id,
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion"
        );

        let response = self
            .client
            .post(&url)
            .headers(headers.to_reqwest_headers())
            .json(&wire_request)
            .send()
            .await?;
        let response = self.check_status(response).await?;

        let body = response.text().await?;
        let wire_response: OpenAIResponse = serde_json::from_str(&body)
            .map_err(|e| Error::invalid_response(format!("malformed completion body: {e}")))?;
        from_openai_response(wire_response)
    }
}
