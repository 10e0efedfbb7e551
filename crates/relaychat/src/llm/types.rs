//! Outbound request shared by all providers.

use relaychat_types::Message;

/// A fully resolved chat request, ready to be sent to a provider.
///
/// Every field is fixed by the relay route before the call; providers only
/// translate it into their own wire format.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ChatRequest {
    /// A single-turn request carrying one user message.
    pub fn single_turn(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message::user(content)],
            temperature: None,
            max_tokens: None,
        }
    }
}
