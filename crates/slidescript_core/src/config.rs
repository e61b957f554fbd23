//! Backend configuration for the script pipeline

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use slidescript_llms::{GenerateOptions, OpenAIConfig, OpenAIProvider, Provider};

use crate::error::{PipelineError, Result};

pub const PROVIDER_ENV: &str = "SLIDESCRIPT_PROVIDER";
pub const MODEL_ENV: &str = "SLIDESCRIPT_MODEL";
pub const BASE_URL_ENV: &str = "SLIDESCRIPT_BASE_URL";
pub const TEMPERATURE_ENV: &str = "SLIDESCRIPT_TEMPERATURE";
pub const MAX_TOKENS_ENV: &str = "SLIDESCRIPT_MAX_TOKENS";
pub const TIMEOUT_ENV: &str = "SLIDESCRIPT_TIMEOUT_SECS";

/// Generation backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    #[default]
    Groq,
    OpenAI,
}

impl LlmProvider {
    pub const ALL: [LlmProvider; 2] = [LlmProvider::Groq, LlmProvider::OpenAI];

    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Groq => "groq",
            LlmProvider::OpenAI => "openai",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Groq => "llama-3.3-70b-versatile",
            LlmProvider::OpenAI => "gpt-4o-mini",
        }
    }

    pub fn api_key_env(&self) -> &'static str {
        match self {
            LlmProvider::Groq => OpenAIProvider::GROQ_API_KEY_ENV,
            LlmProvider::OpenAI => OpenAIProvider::API_KEY_ENV,
        }
    }
}

impl FromStr for LlmProvider {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(LlmProvider::Groq),
            "openai" => Ok(LlmProvider::OpenAI),
            other => Err(PipelineError::Config(format!(
                "unknown provider '{other}' (expected groq or openai)"
            ))),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything needed to build a generation backend
#[derive(Clone)]
pub struct ScriptConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub api_key: Option<String>,
    /// Override for OpenAI-compatible endpoints
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout: Option<Duration>,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self::new(LlmProvider::default())
    }
}

impl ScriptConfig {
    pub fn new(provider: LlmProvider) -> Self {
        Self {
            provider,
            model: provider.default_model().to_string(),
            api_key: None,
            base_url: None,
            temperature: None,
            max_tokens: None,
            timeout: None,
        }
    }

    /// Switch provider. A model still at the old provider's default follows along.
    pub fn with_provider(mut self, provider: LlmProvider) -> Self {
        if self.model == self.provider.default_model() {
            self.model = provider.default_model().to_string();
        }
        self.provider = provider;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps variable names to values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match get(PROVIDER_ENV) {
            Some(name) => name.parse::<LlmProvider>()?,
            // No explicit provider: use whichever key is present
            None => LlmProvider::ALL
                .into_iter()
                .find(|p| get(p.api_key_env()).is_some())
                .unwrap_or_default(),
        };

        let mut config = Self::new(provider);
        config.api_key = get(provider.api_key_env());

        if let Some(model) = get(MODEL_ENV) {
            config.model = model;
        }
        config.base_url = get(BASE_URL_ENV);

        if let Some(raw) = get(TEMPERATURE_ENV) {
            config.temperature = Some(parse_var(TEMPERATURE_ENV, &raw)?);
        }
        if let Some(raw) = get(MAX_TOKENS_ENV) {
            config.max_tokens = Some(parse_var(MAX_TOKENS_ENV, &raw)?);
        }
        if let Some(raw) = get(TIMEOUT_ENV) {
            config.timeout = Some(Duration::from_secs(parse_var(TIMEOUT_ENV, &raw)?));
        }

        Ok(config)
    }

    pub fn generate_options(&self) -> GenerateOptions {
        let mut options = GenerateOptions::default();
        if let Some(temperature) = self.temperature {
            options = options.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }
        options
    }
}

impl std::fmt::Debug for ScriptConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| PipelineError::Config(format!("{key} has an invalid value: '{raw}'")))
}

/// Build the backend described by `config`.
///
/// A missing key is reported before any network activity.
pub fn build_provider(config: &ScriptConfig) -> Result<Arc<dyn Provider>> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        PipelineError::Config(format!(
            "no API key for {}: set {}",
            config.provider,
            config.provider.api_key_env()
        ))
    })?;

    let mut wire = match config.provider {
        LlmProvider::Groq => OpenAIConfig::groq(api_key),
        LlmProvider::OpenAI => OpenAIConfig::new(api_key),
    };
    if let Some(ref base_url) = config.base_url {
        wire = wire.with_base_url(base_url.as_str());
    }
    if let Some(timeout) = config.timeout {
        wire = wire.with_timeout(timeout);
    }

    tracing::debug!(provider = %config.provider, base_url = %wire.base_url, "Building backend");
    let provider = OpenAIProvider::new(wire)?;
    Ok(Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_llm_provider_parse() {
        assert_eq!("groq".parse::<LlmProvider>().unwrap(), LlmProvider::Groq);
        assert_eq!(" OpenAI ".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAI);
        assert!("anthropic".parse::<LlmProvider>().is_err());
    }

    #[test]
    fn test_defaults_to_groq() {
        let config = ScriptConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.provider, LlmProvider::Groq);
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert!(config.api_key.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_provider_inferred_from_key() {
        let config = ScriptConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-1")])).unwrap();
        assert_eq!(config.provider, LlmProvider::OpenAI);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_key.as_deref(), Some("sk-1"));

        let both = ScriptConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-1"),
            ("GROQ_API_KEY", "gsk-2"),
        ]))
        .unwrap();
        assert_eq!(both.provider, LlmProvider::Groq);
        assert_eq!(both.api_key.as_deref(), Some("gsk-2"));
    }

    #[test]
    fn test_explicit_settings() {
        let config = ScriptConfig::from_lookup(lookup(&[
            (PROVIDER_ENV, "openai"),
            (MODEL_ENV, "gpt-4.1"),
            (BASE_URL_ENV, "http://localhost:8080/v1"),
            (TEMPERATURE_ENV, "0.2"),
            (MAX_TOKENS_ENV, "4096"),
            (TIMEOUT_ENV, "90"),
            ("OPENAI_API_KEY", "sk-1"),
            ("GROQ_API_KEY", "gsk-2"),
        ]))
        .unwrap();

        assert_eq!(config.provider, LlmProvider::OpenAI);
        assert_eq!(config.model, "gpt-4.1");
        assert_eq!(config.api_key.as_deref(), Some("sk-1"));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.max_tokens, Some(4096));
        assert_eq!(config.timeout, Some(Duration::from_secs(90)));

        let options = config.generate_options();
        assert_eq!(options.max_tokens, Some(4096));
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = ScriptConfig::from_lookup(lookup(&[(PROVIDER_ENV, "bard")])).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));

        let err = ScriptConfig::from_lookup(lookup(&[(MAX_TOKENS_ENV, "lots")])).unwrap_err();
        assert!(err.to_string().contains(MAX_TOKENS_ENV));
    }

    #[test]
    fn test_with_provider_moves_default_model() {
        let config = ScriptConfig::default().with_provider(LlmProvider::OpenAI);
        assert_eq!(config.model, "gpt-4o-mini");

        let pinned = ScriptConfig::default()
            .with_model("mixtral-8x7b")
            .with_provider(LlmProvider::OpenAI);
        assert_eq!(pinned.model, "mixtral-8x7b");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ScriptConfig::default().with_api_key("gsk-secret");
        let printed = format!("{config:?}");
        assert!(!printed.contains("gsk-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_build_provider_requires_key() {
        let err = build_provider(&ScriptConfig::default()).err().unwrap();
        assert!(matches!(err, PipelineError::Config(_)));
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_build_provider_uses_provider_id() {
        let provider = build_provider(&ScriptConfig::default().with_api_key("gsk-1")).unwrap();
        assert_eq!(provider.provider_id(), "groq");

        let provider = build_provider(
            &ScriptConfig::new(LlmProvider::OpenAI)
                .with_api_key("sk-1")
                .with_timeout(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(provider.provider_id(), "openai");
    }
}
