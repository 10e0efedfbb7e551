//! Single prompt/reply sessions (DeepSeek-style and Gemini-style routes).

use async_trait::async_trait;
use relaychat_types::{DeepSeekRelayRequest, GeminiRelayRequest, Message};
use tracing::{debug, warn};

use crate::ChatClient;
use crate::conversation::ChatEntry;
use crate::error::ClientError;
use crate::relay::Relay;

/// Which single-exchange route a session talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeProvider {
    DeepSeek,
    Gemini,
}

/// Request produced by [`SingleExchange::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingExchange {
    DeepSeek(DeepSeekRelayRequest),
    Gemini(GeminiRelayRequest),
}

/// Keeps only the latest prompt and its reply.
#[derive(Debug)]
pub struct SingleExchange {
    provider: ExchangeProvider,
    input: String,
    /// `[prompt, reply]` of the last successful exchange.
    exchange: Vec<ChatEntry>,
    last_error: Option<String>,
    /// Prompt of the call in flight. Cleared by `clear`, which makes
    /// `complete` discard a stale result.
    pending: Option<String>,
    loading: bool,
}

impl SingleExchange {
    pub fn new(provider: ExchangeProvider) -> Self {
        Self {
            provider,
            input: String::new(),
            exchange: Vec::new(),
            last_error: None,
            pending: None,
            loading: false,
        }
    }

    pub fn provider(&self) -> ExchangeProvider {
        self.provider
    }

    /// Text of the latest reply.
    pub fn response(&self) -> Option<&str> {
        self.exchange.get(1).map(|e| e.message.content.as_str())
    }

    /// Validate the input and build the request. The previous exchange is
    /// dropped; the input stays in place until the reply arrives.
    pub fn begin_submit(&mut self) -> Result<PendingExchange, ClientError> {
        if self.loading {
            return Err(ClientError::Busy);
        }
        if self.input.trim().is_empty() {
            let err = ClientError::EmptyInput;
            self.last_error = Some(err.to_string());
            return Err(err);
        }

        self.loading = true;
        self.exchange.clear();
        self.last_error = None;

        let text = self.input.clone();
        self.pending = Some(text.clone());
        Ok(match self.provider {
            ExchangeProvider::DeepSeek => {
                PendingExchange::DeepSeek(DeepSeekRelayRequest { message: text })
            }
            ExchangeProvider::Gemini => {
                PendingExchange::Gemini(GeminiRelayRequest { prompt: text })
            }
        })
    }

    /// Finish the exchange with the reply text (or the failure).
    pub fn complete(&mut self, result: Result<String, ClientError>) -> Result<String, ClientError> {
        self.loading = false;

        let Some(prompt) = self.pending.take() else {
            debug!(
                provider = ?self.provider,
                "Session cleared while the call was in flight; dropping result"
            );
            return Err(ClientError::Cleared);
        };

        match result {
            Ok(text) => {
                self.exchange = vec![
                    ChatEntry::new(Message::user(prompt)),
                    ChatEntry::new(Message::assistant(text.clone())),
                ];
                self.input.clear();
                self.last_error = None;
                Ok(text)
            }
            Err(err) => {
                warn!(provider = ?self.provider, error = %err, "Exchange failed");
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

async fn send(relay: &dyn Relay, pending: &PendingExchange) -> Result<String, ClientError> {
    match pending {
        PendingExchange::DeepSeek(request) => relay
            .deepseek(request)
            .await?
            .first_content()
            .map(str::to_string)
            .ok_or(ClientError::MalformedBody),
        PendingExchange::Gemini(request) => Ok(relay.gemini(request).await?.response),
    }
}

#[async_trait]
impl ChatClient for SingleExchange {
    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn input(&self) -> &str {
        &self.input
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn entries(&self) -> Vec<&ChatEntry> {
        self.exchange.iter().collect()
    }

    fn clear(&mut self) {
        self.input.clear();
        self.exchange.clear();
        self.last_error = None;
        self.pending = None;
    }

    async fn submit(&mut self, relay: &dyn Relay) -> Result<String, ClientError> {
        let pending = self.begin_submit()?;
        let result = send(relay, &pending).await;
        self.complete(result)
    }
}
