//! LLM provider clients for one-shot chat completions.

mod error;
mod gemini;
mod openai;
mod provider;
mod registry;
mod types;

pub use error::ProviderError;
pub use gemini::GeminiProvider;
pub use openai::OpenAICompatibleProvider;
pub use provider::{ChatProvider, ProviderKind};
pub use registry::ProviderRegistry;
pub use types::ChatRequest;
