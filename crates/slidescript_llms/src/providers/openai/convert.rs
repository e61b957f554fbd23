//! Conversion between unified types and chat-completions wire types

use super::types::{OpenAIErrorEnvelope, OpenAIMessage, OpenAIRequest, OpenAIResponse};
use crate::error::{Error, Result};
use crate::types::{
    FinishReason, FinishReasonKind, GenerateRequest, GenerateResponse, Message, Usage,
};
use serde_json::json;

/// Convert unified request to wire request
pub fn to_openai_request(req: &GenerateRequest) -> OpenAIRequest {
    OpenAIRequest {
        model: req.model.clone(),
        messages: req.messages.iter().map(to_openai_message).collect(),
        temperature: req.options.temperature,
        max_tokens: req.options.max_tokens,
    }
}

fn to_openai_message(msg: &Message) -> OpenAIMessage {
    OpenAIMessage {
        role: msg.role.as_str().to_string(),
        content: msg.content.clone(),
    }
}

/// Convert wire response to unified response. The message text is passed through as-is.
pub fn from_openai_response(resp: OpenAIResponse) -> Result<GenerateResponse> {
    let choice = resp
        .choices
        .first()
        .ok_or_else(|| Error::invalid_response("No choices in response"))?;

    let content = choice
        .message
        .content
        .clone()
        .ok_or_else(|| Error::invalid_response("No content in response"))?;

    let finish_reason = parse_finish_reason(&choice.finish_reason);

    let usage = resp
        .usage
        .as_ref()
        .map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
        .unwrap_or_default();

    Ok(GenerateResponse {
        content,
        usage,
        finish_reason,
        metadata: Some(json!({
            "id": resp.id,
            "model": resp.model,
        })),
    })
}

/// Parse finish reason to unified finish reason
pub fn parse_finish_reason(reason: &Option<String>) -> FinishReason {
    match reason.as_deref() {
        Some("stop") => FinishReason::with_raw(FinishReasonKind::Stop, "stop"),
        Some("length") => FinishReason::with_raw(FinishReasonKind::Length, "length"),
        Some("content_filter") => {
            FinishReason::with_raw(FinishReasonKind::ContentFilter, "content_filter")
        }
        Some(raw) => FinishReason::with_raw(FinishReasonKind::Other, raw),
        None => FinishReason::other(),
    }
}

/// Pull the human-readable message out of an error body, or return the body unchanged.
pub fn error_message(body: &str) -> String {
    serde_json::from_str::<OpenAIErrorEnvelope>(body)
        .map(|env| env.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenerateOptions;

    #[test]
    fn test_parse_finish_reason() {
        assert_eq!(
            parse_finish_reason(&Some("stop".to_string())).unified,
            FinishReasonKind::Stop
        );
        assert_eq!(
            parse_finish_reason(&Some("length".to_string())).unified,
            FinishReasonKind::Length
        );
        assert_eq!(
            parse_finish_reason(&Some("content_filter".to_string())).unified,
            FinishReasonKind::ContentFilter
        );
        let odd = parse_finish_reason(&Some("eos".to_string()));
        assert_eq!(odd.unified, FinishReasonKind::Other);
        assert_eq!(odd.raw.as_deref(), Some("eos"));
        assert_eq!(parse_finish_reason(&None).unified, FinishReasonKind::Other);
    }

    #[test]
    fn test_to_openai_request_keeps_message_order_and_options() {
        let req = GenerateRequest::new(
            "llama-3.3-70b-versatile",
            vec![Message::system("sys"), Message::user("hi")],
        )
        .with_options(GenerateOptions::default().with_temperature(0.2));

        let wire = to_openai_request(&req);
        let value = serde_json::to_value(&wire).unwrap();

        assert_eq!(value["model"], "llama-3.3-70b-versatile");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert!(value.get("max_tokens").is_none());
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 3, "unexpected wire fields: {keys:?}");
        assert!((value["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_from_openai_response_passes_text_through() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "model": "llama-3.3-70b-versatile",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "  Slide 1 script\n"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }"#;
        let resp: OpenAIResponse = serde_json::from_str(raw).unwrap();
        let unified = from_openai_response(resp).unwrap();

        assert_eq!(unified.text(), "  Slide 1 script\n");
        assert_eq!(unified.usage.total_tokens, 15);
        assert_eq!(unified.model(), Some("llama-3.3-70b-versatile"));
    }

    #[test]
    fn test_from_openai_response_rejects_empty_choices() {
        let resp: OpenAIResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            from_openai_response(resp),
            Err(Error::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_error_message_extracts_envelope() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error", "code": "invalid_api_key"}}"#;
        assert_eq!(error_message(body), "Invalid API Key");
        assert_eq!(error_message("plain failure\n"), "plain failure");
    }
}
