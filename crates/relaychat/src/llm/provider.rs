//! LLM provider trait and provider identifiers.

use std::fmt;

use async_trait::async_trait;

use super::error::ProviderError;
use super::types::ChatRequest;

/// Trait for LLM providers with different API formats.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send one chat request and return the provider-shaped success body.
    async fn send(&self, request: ChatRequest) -> Result<serde_json::Value, ProviderError>;
}

/// The upstream services the relay knows how to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAI,
    DeepSeek,
    Gemini,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAI => write!(f, "OpenAI"),
            ProviderKind::DeepSeek => write!(f, "DeepSeek"),
            ProviderKind::Gemini => write!(f, "Gemini"),
        }
    }
}
