use crate::error::Error;
use crate::provider::{Provider, ProviderRegistry};
use crate::types::{GenerateRequest, GenerateResponse, Headers};
use async_trait::async_trait;

/// Mock provider for testing
struct MockProvider {
    id: &'static str,
}

#[async_trait]
impl Provider for MockProvider {
    fn provider_id(&self) -> &str {
        self.id
    }

    fn build_headers(&self, _custom_headers: Option<&Headers>) -> Headers {
        Headers::new()
    }

    async fn generate(&self, _request: GenerateRequest) -> crate::error::Result<GenerateResponse> {
        Err(Error::invalid_response("mock"))
    }
}

#[test]
fn test_register_and_get_provider() {
    let registry = ProviderRegistry::new().register("test", MockProvider { id: "test" });

    let provider = registry.get_provider("test");
    assert!(provider.is_ok());
    assert_eq!(provider.unwrap().provider_id(), "test");
}

#[test]
fn test_provider_not_found() {
    let registry = ProviderRegistry::new();
    let result = registry.get_provider("nonexistent");
    assert!(matches!(result, Err(Error::ProviderNotFound(id)) if id == "nonexistent"));
}

#[test]
fn test_list_providers() {
    let registry = ProviderRegistry::new()
        .register("groq", MockProvider { id: "groq" })
        .register("openai", MockProvider { id: "openai" });

    let mut ids = registry.list_providers();
    ids.sort();
    assert_eq!(ids, vec!["groq", "openai"]);
}

#[test]
fn test_register_shared_keeps_same_instance() {
    let shared: std::sync::Arc<dyn Provider> = std::sync::Arc::new(MockProvider { id: "groq" });
    let registry = ProviderRegistry::new().register_shared("groq", shared.clone());

    let found = registry.get_provider("groq").unwrap();
    assert!(std::sync::Arc::ptr_eq(&found, &shared));
}

#[test]
fn test_default_list_models_is_empty() {
    let provider = MockProvider { id: "test" };
    let models = tokio_test::block_on(provider.list_models()).unwrap();
    assert!(models.is_empty());
}

#[test]
fn test_headers_merge_overrides() {
    let mut base = Headers::new();
    base.insert("Authorization", "Bearer a");
    base.insert("Content-Type", "application/json");

    let mut custom = Headers::new();
    custom.insert("Authorization", "Bearer b");
    custom.insert("X-Trace", "1");

    base.merge_with(&custom);
    assert_eq!(base.len(), 3);
    assert_eq!(base.get("Authorization"), Some("Bearer b"));

    let map = base.to_reqwest_headers();
    assert_eq!(map.get("x-trace").unwrap(), "1");
}
