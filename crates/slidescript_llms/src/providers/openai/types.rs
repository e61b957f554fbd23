//! Chat-completions wire types

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Configuration for an OpenAI-compatible provider
#[derive(Clone)]
pub struct OpenAIConfig {
    /// Identifier reported by `Provider::provider_id`
    pub provider_id: String,
    /// API key for authentication
    pub api_key: String,
    /// Base URL (default: https://api.openai.com/v1)
    pub base_url: String,
    /// Whole-request timeout; `None` keeps the client default (no timeout)
    pub timeout: Option<Duration>,
}

impl OpenAIConfig {
    /// Create new OpenAI config with API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            provider_id: "openai".to_string(),
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Groq exposes the same wire format under its own base URL
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self {
            provider_id: "groq".to_string(),
            base_url: GROQ_BASE_URL.to_string(),
            ..Self::new(api_key)
        }
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        // Accept a full endpoint URL as well as a base
        if let Some(stripped) = url.strip_suffix('/') {
            url = stripped.to_string();
        }
        if let Some(stripped) = url.strip_suffix("/chat/completions") {
            url = stripped.to_string();
        }
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl std::fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("provider_id", &self.provider_id)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Chat completion request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Request message
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: String,
}

/// Chat completion response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<OpenAIChoice>,
    #[serde(default)]
    pub usage: Option<OpenAIUsage>,
}

/// Response choice
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct OpenAIChoice {
    #[serde(default)]
    pub index: u32,
    pub message: OpenAIResponseMessage,
    pub finish_reason: Option<String>,
}

/// Response message; `content` is null for refusals on some backends
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct OpenAIResponseMessage {
    pub role: Option<String>,
    pub content: Option<String>,
}

/// Usage statistics
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct OpenAIUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// Error envelope: `{"error": {"message": ..., "type": ...}}`
#[derive(Debug, Deserialize)]
pub struct OpenAIErrorEnvelope {
    pub error: OpenAIError,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct OpenAIError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}
