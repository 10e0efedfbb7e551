//! Relay route handlers: validate, forward, normalize.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use relaychat_types::{DeepSeekRelayRequest, GeminiRelayRequest, OpenAIRelayRequest};
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::error::Category;
use tracing::debug;

use crate::error::RelayError;
use crate::llm::{ChatProvider, ChatRequest, ProviderKind};
use crate::server::AppState;

// ============================================================================
// Fixed provider parameters
// ============================================================================

const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const OPENAI_DEFAULT_TEMPERATURE: f32 = 0.7;
const OPENAI_DEFAULT_MAX_TOKENS: u32 = 1000;

const DEEPSEEK_MODEL: &str = "deepseek-chat";
const DEEPSEEK_TEMPERATURE: f32 = 0.7;
const DEEPSEEK_MAX_TOKENS: u32 = 4000;

const GEMINI_MODEL: &str = "gemini-2.0-flash-lite";

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/chatgpt
///
/// Request body: `{"messages": [...], "model"?, "temperature"?, "max_tokens"?}`.
/// The provider's completion body is returned unchanged.
pub async fn relay_openai(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, RelayError> {
    let req: OpenAIRelayRequest = parse_body(ProviderKind::OpenAI, &body)?;
    if req.messages.is_empty() {
        return Err(RelayError::invalid_request("messages are required"));
    }

    let provider = require(&state, ProviderKind::OpenAI)?;

    let chat_request = ChatRequest {
        model: req
            .model
            .unwrap_or_else(|| OPENAI_DEFAULT_MODEL.to_string()),
        messages: req.messages,
        temperature: Some(req.temperature.unwrap_or(OPENAI_DEFAULT_TEMPERATURE)),
        max_tokens: Some(req.max_tokens.unwrap_or(OPENAI_DEFAULT_MAX_TOKENS)),
    };

    let completion = provider
        .send(chat_request)
        .await
        .map_err(|e| RelayError::from_provider(ProviderKind::OpenAI, e))?;

    if let Some(usage) = completion.get("usage") {
        debug!(%usage, "OpenAI token usage");
    }

    Ok(Json(completion))
}

/// POST /api/deepseek
///
/// Request body: `{"message": "..."}`. The provider's completion body is
/// returned unchanged.
pub async fn relay_deepseek(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, RelayError> {
    let req: DeepSeekRelayRequest = parse_body(ProviderKind::DeepSeek, &body)?;
    if req.message.trim().is_empty() {
        return Err(RelayError::invalid_request("message is required"));
    }

    let provider = require(&state, ProviderKind::DeepSeek)?;

    let mut chat_request = ChatRequest::single_turn(DEEPSEEK_MODEL, req.message);
    chat_request.temperature = Some(DEEPSEEK_TEMPERATURE);
    chat_request.max_tokens = Some(DEEPSEEK_MAX_TOKENS);

    let completion = provider
        .send(chat_request)
        .await
        .map_err(|e| RelayError::from_provider(ProviderKind::DeepSeek, e))?;

    Ok(Json(completion))
}

/// POST /api/gemini
///
/// Request body: `{"prompt": "..."}`. Responds with `{"response": "..."}`.
/// Every provider failure surfaces as an internal error.
pub async fn relay_gemini(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, RelayError> {
    let req: GeminiRelayRequest = parse_body(ProviderKind::Gemini, &body)?;
    if req.prompt.trim().is_empty() {
        return Err(RelayError::invalid_request("prompt is required"));
    }

    let provider = require(&state, ProviderKind::Gemini)?;

    let reply = provider
        .send(ChatRequest::single_turn(GEMINI_MODEL, req.prompt))
        .await
        .map_err(|e| RelayError::internal(ProviderKind::Gemini, e))?;

    Ok(Json(reply))
}

// ============================================================================
// Helpers
// ============================================================================

/// Decode a relay request body.
///
/// A body that is not JSON at all is an internal error; JSON with a missing
/// or mistyped field is the caller's fault.
fn parse_body<T: DeserializeOwned>(kind: ProviderKind, body: &[u8]) -> Result<T, RelayError> {
    serde_json::from_slice(body).map_err(|e| match e.classify() {
        Category::Data => {
            debug!(%kind, error = %e, "Rejected relay request body");
            RelayError::invalid_request("invalid request body")
        }
        _ => RelayError::internal(kind, e),
    })
}

fn require(state: &AppState, kind: ProviderKind) -> Result<Arc<dyn ChatProvider>, RelayError> {
    state
        .providers
        .get(kind)
        .ok_or(RelayError::Misconfigured { provider: kind })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use relaychat_types::{Role, routes};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::llm::{ProviderError, ProviderRegistry};
    use crate::server::build_app;

    enum Reply {
        Body(Value),
        Status(u16, &'static str),
        Garbage,
    }

    struct FakeProvider {
        reply: Reply,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl FakeProvider {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }

        fn last(&self) -> ChatRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl ChatProvider for FakeProvider {
        async fn send(&self, request: ChatRequest) -> Result<Value, ProviderError> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Reply::Body(v) => Ok(v.clone()),
                Reply::Status(status, text) => Err(ProviderError::Api {
                    status: *status,
                    status_text: text.to_string(),
                    body: "upstream said no".to_string(),
                }),
                Reply::Garbage => Err(ProviderError::Decode("expected value".to_string())),
            }
        }
    }

    fn app_with(kind: ProviderKind, provider: Arc<FakeProvider>) -> Router {
        let mut providers = ProviderRegistry::new();
        providers.register(kind, provider);
        build_app(AppState { providers }, None)
    }

    async fn post(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn completion(content: &str) -> Value {
        json!({
            "choices": [{"message": {"content": content, "role": "assistant"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4}
        })
    }

    // --- OpenAI-style ---

    #[tokio::test]
    async fn test_openai_applies_defaults_and_passes_body_through() {
        let provider = FakeProvider::new(Reply::Body(completion("4")));
        let app = app_with(ProviderKind::OpenAI, provider.clone());

        let (status, body) = post(
            app,
            routes::OPENAI,
            r#"{"messages": [{"role": "user", "content": "2+2?"}]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, completion("4"));

        let sent = provider.last();
        assert_eq!(sent.model, "gpt-3.5-turbo");
        assert_eq!(sent.temperature, Some(0.7));
        assert_eq!(sent.max_tokens, Some(1000));
        assert_eq!(sent.messages.len(), 1);
        assert_eq!(sent.messages[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_openai_honours_overrides() {
        let provider = FakeProvider::new(Reply::Body(completion("ok")));
        let app = app_with(ProviderKind::OpenAI, provider.clone());

        let (status, _) = post(
            app,
            routes::OPENAI,
            r#"{"messages": [{"role": "system", "content": "Be terse."}, {"role": "user", "content": "hi"}],
                "model": "gpt-4o-mini", "temperature": 0.2, "max_tokens": 64}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let sent = provider.last();
        assert_eq!(sent.model, "gpt-4o-mini");
        assert_eq!(sent.temperature, Some(0.2));
        assert_eq!(sent.max_tokens, Some(64));
        assert_eq!(sent.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_openai_rejects_missing_or_empty_messages() {
        for body in [
            "{}",
            r#"{"messages": []}"#,
            r#"{"messages": "hello"}"#,
            r#"{"messages": [{"role": "robot", "content": "hi"}]}"#,
        ] {
            let provider = FakeProvider::new(Reply::Body(completion("unused")));
            let app = app_with(ProviderKind::OpenAI, provider.clone());

            let (status, json) = post(app, routes::OPENAI, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert!(json["error"].is_string());
            assert_eq!(provider.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_internal_error() {
        for (kind, uri) in [
            (ProviderKind::OpenAI, routes::OPENAI),
            (ProviderKind::DeepSeek, routes::DEEPSEEK),
            (ProviderKind::Gemini, routes::GEMINI),
        ] {
            for body in ["not json", "", r#"{"message": "hi""#] {
                let provider = FakeProvider::new(Reply::Body(completion("unused")));
                let app = app_with(kind, provider.clone());

                let (status, json) = post(app, uri, body).await;
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri} body: {body:?}");
                assert_eq!(json, json!({"error": "internal server error"}));
                assert_eq!(provider.calls(), 0);
            }
        }
    }

    #[tokio::test]
    async fn test_openai_maps_provider_statuses() {
        let cases = [
            (401, "Unauthorized", StatusCode::UNAUTHORIZED, "invalid API key"),
            (
                429,
                "Too Many Requests",
                StatusCode::TOO_MANY_REQUESTS,
                "rate limit exceeded",
            ),
            (400, "Bad Request", StatusCode::BAD_REQUEST, "invalid request"),
            (
                503,
                "Service Unavailable",
                StatusCode::SERVICE_UNAVAILABLE,
                "OpenAI API error: Service Unavailable",
            ),
        ];

        for (upstream, text, expected_status, expected_error) in cases {
            let provider = FakeProvider::new(Reply::Status(upstream, text));
            let app = app_with(ProviderKind::OpenAI, provider.clone());

            let (status, body) = post(
                app,
                routes::OPENAI,
                r#"{"messages": [{"role": "user", "content": "hi"}]}"#,
            )
            .await;

            assert_eq!(status, expected_status);
            assert_eq!(body, json!({"error": expected_error}));
            assert_eq!(provider.calls(), 1, "provider errors are never retried");
        }
    }

    #[tokio::test]
    async fn test_openai_garbage_reply_is_internal_error() {
        let provider = FakeProvider::new(Reply::Garbage);
        let app = app_with(ProviderKind::OpenAI, provider);

        let (status, body) = post(
            app,
            routes::OPENAI,
            r#"{"messages": [{"role": "user", "content": "hi"}]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "internal server error"}));
    }

    #[tokio::test]
    async fn test_missing_credential_is_misconfigured() {
        let app = build_app(
            AppState {
                providers: ProviderRegistry::new(),
            },
            None,
        );

        let (status, body) = post(
            app,
            routes::OPENAI,
            r#"{"messages": [{"role": "user", "content": "hi"}]}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "OpenAI API key not configured"}));
    }

    #[tokio::test]
    async fn test_validation_runs_before_credential_check() {
        let app = build_app(
            AppState {
                providers: ProviderRegistry::new(),
            },
            None,
        );

        let (status, _) = post(app, routes::DEEPSEEK, r#"{"message": ""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // --- DeepSeek-style ---

    #[tokio::test]
    async fn test_deepseek_sends_fixed_parameters() {
        let provider = FakeProvider::new(Reply::Body(completion("Olá")));
        let app = app_with(ProviderKind::DeepSeek, provider.clone());

        let (status, body) = post(app, routes::DEEPSEEK, r#"{"message": "Oi"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["choices"][0]["message"]["content"], "Olá");

        let sent = provider.last();
        assert_eq!(sent.model, "deepseek-chat");
        assert_eq!(sent.temperature, Some(0.7));
        assert_eq!(sent.max_tokens, Some(4000));
        assert_eq!(sent.messages, vec![relaychat_types::Message::user("Oi")]);
    }

    #[tokio::test]
    async fn test_deepseek_rejects_blank_message() {
        for body in ["{}", r#"{"message": "   "}"#, r#"{"message": 7}"#] {
            let provider = FakeProvider::new(Reply::Body(completion("unused")));
            let app = app_with(ProviderKind::DeepSeek, provider.clone());

            let (status, _) = post(app, routes::DEEPSEEK, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(provider.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_deepseek_rate_limit() {
        let provider = FakeProvider::new(Reply::Status(429, "Too Many Requests"));
        let app = app_with(ProviderKind::DeepSeek, provider);

        let (status, body) = post(app, routes::DEEPSEEK, r#"{"message": "hi"}"#).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, json!({"error": "rate limit exceeded"}));
    }

    // --- Gemini-style ---

    #[tokio::test]
    async fn test_gemini_returns_response_field() {
        let provider = FakeProvider::new(Reply::Body(json!({"response": "Rust is fast."})));
        let app = app_with(ProviderKind::Gemini, provider.clone());

        let (status, body) = post(app, routes::GEMINI, r#"{"prompt": "Explain Rust"}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"response": "Rust is fast."}));
        assert_eq!(provider.last().model, "gemini-2.0-flash-lite");
        assert_eq!(provider.last().temperature, None);
    }

    #[tokio::test]
    async fn test_gemini_provider_failures_are_internal() {
        for reply in [Reply::Status(429, "Too Many Requests"), Reply::Garbage] {
            let provider = FakeProvider::new(reply);
            let app = app_with(ProviderKind::Gemini, provider);

            let (status, body) = post(app, routes::GEMINI, r#"{"prompt": "hi"}"#).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({"error": "internal server error"}));
        }
    }

    #[tokio::test]
    async fn test_gemini_rejects_missing_or_blank_prompt() {
        for body in [
            r#"{"text": "hi"}"#,
            r#"{"prompt": ""}"#,
            r#"{"prompt": "   "}"#,
            r#"{"prompt": "\n\t "}"#,
        ] {
            let provider = FakeProvider::new(Reply::Body(json!({"response": "unused"})));
            let app = app_with(ProviderKind::Gemini, provider.clone());

            let (status, json) = post(app, routes::GEMINI, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json, json!({"error": "prompt is required"}));
            assert_eq!(provider.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_gemini_rejects_mistyped_prompt() {
        let provider = FakeProvider::new(Reply::Body(json!({"response": "unused"})));
        let app = app_with(ProviderKind::Gemini, provider.clone());

        let (status, json) = post(app, routes::GEMINI, r#"{"prompt": 42}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, json!({"error": "invalid request body"}));
        assert_eq!(provider.calls(), 0);
    }
}
