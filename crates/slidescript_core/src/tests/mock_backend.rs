//! Recording backend for pipeline tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use slidescript_llms::{
    FinishReason, FinishReasonKind, GenerateRequest, GenerateResponse, Headers, Provider, Usage,
};

type Reply = Box<dyn Fn() -> slidescript_llms::Result<GenerateResponse> + Send + Sync>;

pub(crate) struct MockBackend {
    reply: Reply,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl MockBackend {
    /// Answers every call with `text`.
    pub(crate) fn replying(text: &'static str) -> Arc<Self> {
        Self::with_reply(move || {
            Ok(GenerateResponse {
                content: text.to_string(),
                usage: Usage {
                    prompt_tokens: 100,
                    completion_tokens: 50,
                    total_tokens: 150,
                },
                finish_reason: FinishReason::with_raw(FinishReasonKind::Stop, "stop"),
                metadata: None,
            })
        })
    }

    pub(crate) fn failing(
        make_error: impl Fn() -> slidescript_llms::Error + Send + Sync + 'static,
    ) -> Arc<Self> {
        Self::with_reply(move || Err(make_error()))
    }

    pub(crate) fn with_reply(
        reply: impl Fn() -> slidescript_llms::Result<GenerateResponse> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            reply: Box::new(reply),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn last_request(&self) -> GenerateRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Provider for MockBackend {
    fn provider_id(&self) -> &str {
        "mock"
    }

    fn build_headers(&self, _custom_headers: Option<&Headers>) -> Headers {
        Headers::new()
    }

    async fn generate(&self, request: GenerateRequest) -> slidescript_llms::Result<GenerateResponse> {
        self.requests.lock().unwrap().push(request);
        (self.reply)()
    }
}
