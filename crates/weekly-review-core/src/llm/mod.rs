//! Chat-completion client
//!
//! [`call_llm`] posts a single user message to an Ollama-style `/api/chat`
//! endpoint through an [`HttpTransport`]. Transport failures (the request
//! never completed) are retried once; a completed response with an error
//! status or an unexpected body fails immediately.

mod transport;

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::bail_llm;
use crate::config::LlmConfig;
use crate::error::{ReviewError, Result};

pub use transport::UreqTransport;

/// Total attempts for one call: the first try plus one retry
pub const MAX_ATTEMPTS: u32 = 2;

/// An outbound HTTP request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    /// Enforced by the transport, not by the client
    pub timeout: Duration,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A completed HTTP exchange, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub text: String,
}

impl HttpResponse {
    /// Body parsed as JSON, if it is JSON
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.text).ok()
    }
}

/// The request could not be completed (DNS, connect, TLS, timeout, broken body)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// HTTP capability used by the chat client.
///
/// Implementations report HTTP error statuses through [`HttpResponse::status`]
/// and only return `Err` when no response was obtained.
pub trait HttpTransport {
    fn send(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatOptions {
    temperature: f64,
    num_predict: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
    options: ChatOptions,
}

/// Build the chat request for `prompt`
pub fn build_chat_request(config: &LlmConfig, prompt: &str) -> Result<HttpRequest> {
    let body = serde_json::to_string(&ChatRequest {
        model: &config.model,
        messages: [ChatMessage {
            role: "user",
            content: prompt,
        }],
        stream: false,
        options: ChatOptions {
            temperature: config.temperature,
            num_predict: config.max_tokens,
        },
    })?;

    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
    if let (Some(name), Some(value)) = (
        config.api_key_header_name.as_deref().filter(|n| !n.is_empty()),
        config.api_key_header_value.as_deref().filter(|v| !v.is_empty()),
    ) {
        headers.push((name.to_string(), value.to_string()));
    }

    Ok(HttpRequest {
        url: format!("{}{}", config.base_url, config.endpoint_path),
        method: "POST".to_string(),
        headers,
        body,
        timeout: Duration::from_secs(config.timeout_seconds),
    })
}

/// Extract `message.content` from a completed response
fn parse_chat_response(response: &HttpResponse) -> Result<String> {
    if response.status >= 400 {
        bail_llm!("LLM request failed: {}", response.status);
    }

    let Some(data) = response.json() else {
        bail_llm!("failed to parse LLM response as JSON");
    };

    data.pointer("/message/content")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ReviewError::Llm("unexpected response format: missing message content".to_string())
        })
}

/// Send `prompt` to the configured chat endpoint and return the reply text.
#[tracing::instrument(skip_all, fields(model = %config.model, prompt_chars = prompt.len()))]
pub fn call_llm(config: &LlmConfig, transport: &dyn HttpTransport, prompt: &str) -> Result<String> {
    let request = build_chat_request(config, prompt)?;
    let mut last_error = None;

    for attempt in 1..=MAX_ATTEMPTS {
        match transport.send(&request) {
            Ok(response) => {
                debug!(attempt, status = response.status, "chat response");
                return parse_chat_response(&response);
            }
            Err(e) => {
                warn!(attempt, error = %e, url = %request.url, "chat request failed");
                last_error = Some(e);
            }
        }
    }

    let reason = last_error.map(|e| e.0).unwrap_or_default();
    bail_llm!("network error after retry: {}", reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays scripted outcomes and records every request it sees
    struct ScriptedTransport {
        outcomes: RefCell<VecDeque<std::result::Result<HttpResponse, TransportError>>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn new(
            outcomes: impl IntoIterator<Item = std::result::Result<HttpResponse, TransportError>>,
        ) -> Self {
            Self {
                outcomes: RefCell::new(outcomes.into_iter().collect()),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.seen.borrow().len()
        }
    }

    impl HttpTransport for ScriptedTransport {
        fn send(&self, request: &HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
            self.seen.borrow_mut().push(request.clone());
            self.outcomes
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError("script exhausted".to_string())))
        }
    }

    fn ok(body: &str) -> std::result::Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 200,
            text: body.to_string(),
        })
    }

    fn network(msg: &str) -> std::result::Result<HttpResponse, TransportError> {
        Err(TransportError(msg.to_string()))
    }

    fn config() -> LlmConfig {
        LlmConfig {
            base_url: "http://localhost:11434".to_string(),
            endpoint_path: "/api/chat".to_string(),
            model: "llama3.1".to_string(),
            temperature: 0.3,
            max_tokens: 2000,
            timeout_seconds: 90,
            api_key_header_name: None,
            api_key_header_value: None,
        }
    }

    const REPLY: &str = r###"{"message":{"role":"assistant","content":"## Summary\nDone."}}"###;

    #[test]
    fn test_returns_message_content() {
        let transport = ScriptedTransport::new([ok(REPLY)]);
        let reply = call_llm(&config(), &transport, "hello").unwrap();
        assert_eq!(reply, "## Summary\nDone.");
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_request_shape() {
        let transport = ScriptedTransport::new([ok(REPLY)]);
        call_llm(&config(), &transport, "the prompt").unwrap();

        let seen = transport.seen.borrow();
        let request = &seen[0];
        assert_eq!(request.url, "http://localhost:11434/api/chat");
        assert_eq!(request.method, "POST");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.timeout, Duration::from_secs(90));

        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "llama3.1",
                "messages": [{"role": "user", "content": "the prompt"}],
                "stream": false,
                "options": {"temperature": 0.3, "num_predict": 2000}
            })
        );
    }

    #[test]
    fn test_api_key_header_needs_name_and_value() {
        let mut cfg = config();
        cfg.api_key_header_name = Some("Authorization".to_string());
        cfg.api_key_header_value = Some("Bearer secret".to_string());
        let request = build_chat_request(&cfg, "p").unwrap();
        assert_eq!(request.header("Authorization"), Some("Bearer secret"));

        cfg.api_key_header_value = Some(String::new());
        let request = build_chat_request(&cfg, "p").unwrap();
        assert_eq!(request.headers.len(), 1);

        cfg.api_key_header_value = Some("x".to_string());
        cfg.api_key_header_name = None;
        let request = build_chat_request(&cfg, "p").unwrap();
        assert_eq!(request.headers.len(), 1);
    }

    #[test]
    fn test_retries_once_after_transport_failure() {
        let transport = ScriptedTransport::new([network("connection refused"), ok(REPLY)]);
        let reply = call_llm(&config(), &transport, "p").unwrap();
        assert_eq!(reply, "## Summary\nDone.");
        assert_eq!(transport.calls(), 2);
    }

    #[test]
    fn test_gives_up_after_second_transport_failure() {
        let transport = ScriptedTransport::new([
            network("dns failure"),
            network("connection reset"),
            ok(REPLY),
        ]);
        let err = call_llm(&config(), &transport, "p").unwrap_err();
        assert!(matches!(err, ReviewError::Llm(_)));
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(transport.calls(), 2);
    }

    #[test]
    fn test_http_error_status_is_not_retried() {
        let transport = ScriptedTransport::new([
            Ok(HttpResponse {
                status: 503,
                text: "busy".to_string(),
            }),
            ok(REPLY),
        ]);
        let err = call_llm(&config(), &transport, "p").unwrap_err();
        assert!(err.to_string().contains("503"));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_missing_content_is_not_retried() {
        let transport = ScriptedTransport::new([ok(r#"{"message":{"role":"assistant"}}"#), ok(REPLY)]);
        let err = call_llm(&config(), &transport, "p").unwrap_err();
        assert!(err.to_string().contains("unexpected response format"));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_non_string_content_is_unexpected() {
        let transport = ScriptedTransport::new([ok(r#"{"message":{"content":42}}"#)]);
        let err = call_llm(&config(), &transport, "p").unwrap_err();
        assert!(err.to_string().contains("unexpected response format"));
    }

    #[test]
    fn test_non_json_body_is_not_retried() {
        let transport = ScriptedTransport::new([ok("<html>proxy</html>"), ok(REPLY)]);
        let err = call_llm(&config(), &transport, "p").unwrap_err();
        assert!(matches!(err, ReviewError::Llm(_)));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_empty_content_is_returned_verbatim() {
        let transport = ScriptedTransport::new([ok(r#"{"message":{"content":""}}"#)]);
        assert_eq!(call_llm(&config(), &transport, "p").unwrap(), "");
    }
}
