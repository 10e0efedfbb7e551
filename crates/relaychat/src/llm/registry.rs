//! Provider registry for managing LLM provider instances.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::gemini::GeminiProvider;
use super::openai::OpenAICompatibleProvider;
use super::provider::{ChatProvider, ProviderKind};
use crate::config::{Credentials, ProvidersConfig};

/// Registry of LLM providers, keyed by provider kind.
///
/// A provider is only present when its credential was configured, so a
/// lookup miss means the server is misconfigured for that route.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Arc<dyn ChatProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build providers from endpoint configuration and resolved credentials.
    pub fn from_config(config: &ProvidersConfig, credentials: &Credentials) -> Self {
        let mut registry = Self::new();

        if let Some(ref api_key) = credentials.openai {
            let provider =
                OpenAICompatibleProvider::new(config.openai.base_url.clone(), api_key.clone());
            registry.register(ProviderKind::OpenAI, Arc::new(provider));
            info!(base_url = %config.openai.base_url, "Registered OpenAI provider");
        } else {
            warn!("OpenAI provider not configured. Set CHATGPT_API_KEY or OPENAI_API_KEY.");
        }

        if let Some(ref api_key) = credentials.deepseek {
            let provider =
                OpenAICompatibleProvider::new(config.deepseek.base_url.clone(), api_key.clone());
            registry.register(ProviderKind::DeepSeek, Arc::new(provider));
            info!(base_url = %config.deepseek.base_url, "Registered DeepSeek provider");
        } else {
            warn!("DeepSeek provider not configured. Set DEEPSEEK_API_KEY.");
        }

        if let Some(ref api_key) = credentials.gemini {
            let provider = GeminiProvider::new(config.gemini.base_url.clone(), api_key.clone());
            registry.register(ProviderKind::Gemini, Arc::new(provider));
            info!(base_url = %config.gemini.base_url, "Registered Gemini provider");
        } else {
            warn!("Gemini provider not configured. Set GEMINI_API_KEY.");
        }

        registry
    }

    /// Register a provider implementation.
    pub fn register(&mut self, kind: ProviderKind, implementation: Arc<dyn ChatProvider>) {
        self.providers.insert(kind, implementation);
    }

    /// Get a provider by kind.
    pub fn get(&self, kind: ProviderKind) -> Option<Arc<dyn ChatProvider>> {
        self.providers.get(&kind).cloned()
    }
}
