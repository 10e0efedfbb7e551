//! OpenAI-compatible LLM provider.
//!
//! Serves both the OpenAI and DeepSeek routes; only the base URL and the
//! credential differ.

use async_trait::async_trait;
use relaychat_types::Message;
use reqwest::Client;

use super::error::ProviderError;
use super::provider::ChatProvider;
use super::types::ChatRequest;

/// OpenAI-compatible provider (works for OpenAI and DeepSeek).
pub struct OpenAICompatibleProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAICompatibleProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAICompatibleProvider {
    async fn send(&self, request: ChatRequest) -> Result<serde_json::Value, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = CompletionRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        let bytes = response.bytes().await?;
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| ProviderError::Decode(e.to_string()))?;

        if !value.get("choices").is_some_and(|c| c.is_array()) {
            return Err(ProviderError::Decode(
                "completion has no choices array".to_string(),
            ));
        }

        Ok(value)
    }
}

// --- Wire types ---

#[derive(serde::Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}
