//! Request and response bodies for the three relay routes.

use serde::{Deserialize, Serialize};

use crate::message::Message;

// ============================================================================
// OpenAI-style
// ============================================================================

/// `POST /api/chatgpt` body. The overrides are optional; the relay fills in
/// its own defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OpenAIRelayRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// A chat completion body as returned by OpenAI-compatible APIs.
///
/// Only the fields clients read are modelled; the relay itself forwards the
/// provider's body untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatCompletion {
    /// Content of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// A single completion choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    pub message: ChoiceMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// The message inside a completion choice. The role is left as a string since
/// providers are free to report roles the relay does not know about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceMessage {
    pub content: String,
    pub role: String,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ============================================================================
// DeepSeek-style
// ============================================================================

/// `POST /api/deepseek` body. The response is a [`ChatCompletion`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeepSeekRelayRequest {
    #[serde(default)]
    pub message: String,
}

// ============================================================================
// Gemini-style
// ============================================================================

/// `POST /api/gemini` body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeminiRelayRequest {
    #[serde(default)]
    pub prompt: String,
}

/// `POST /api/gemini` success body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeminiRelayResponse {
    pub response: String,
}
