//! Multi-turn conversation with optimistic append (OpenAI-style route).

use async_trait::async_trait;
use chrono::{DateTime, Local};
use relaychat_types::{ChatCompletion, Message, OpenAIRelayRequest};
use tracing::{debug, warn};

use crate::ChatClient;
use crate::error::ClientError;
use crate::relay::Relay;

/// A message as shown in the transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub message: Message,
    pub at: DateTime<Local>,
}

impl ChatEntry {
    pub fn new(message: Message) -> Self {
        Self {
            message,
            at: Local::now(),
        }
    }

    /// Local wall-clock time, `HH:MM`.
    pub fn time_label(&self) -> String {
        self.at.format("%H:%M").to_string()
    }
}

/// Full conversation sent with every turn.
#[derive(Debug, Default)]
pub struct ChatSession {
    entries: Vec<ChatEntry>,
    input: String,
    last_error: Option<String>,
    /// Index of the optimistically appended user entry while a call is out.
    /// Cleared by `clear`, which makes `complete` discard a stale result.
    pending: Option<usize>,
    loading: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a turn: validate, append the user's message, and build the
    /// request carrying the whole conversation.
    pub fn begin_submit(&mut self) -> Result<OpenAIRelayRequest, ClientError> {
        if self.loading {
            return Err(ClientError::Busy);
        }
        if self.input.trim().is_empty() {
            let err = ClientError::EmptyInput;
            self.last_error = Some(err.to_string());
            return Err(err);
        }

        let content = std::mem::take(&mut self.input);
        self.pending = Some(self.entries.len());
        self.entries.push(ChatEntry::new(Message::user(content)));
        self.loading = true;
        self.last_error = None;

        Ok(OpenAIRelayRequest {
            messages: self.entries.iter().map(|e| e.message.clone()).collect(),
            ..Default::default()
        })
    }

    /// Finish a turn with the relay's result.
    ///
    /// On failure the optimistic user entry is removed and its text goes back
    /// into the input (unless the user already typed something new).
    pub fn complete(
        &mut self,
        result: Result<ChatCompletion, ClientError>,
    ) -> Result<String, ClientError> {
        self.loading = false;

        let Some(pending) = self.pending.take() else {
            debug!("Session cleared while the call was in flight; dropping result");
            return Err(ClientError::Cleared);
        };

        let outcome = result.and_then(|completion| {
            completion
                .first_content()
                .map(str::to_string)
                .ok_or(ClientError::MalformedBody)
        });

        match outcome {
            Ok(text) => {
                self.entries.push(ChatEntry::new(Message::assistant(text.clone())));
                self.input.clear();
                self.last_error = None;
                Ok(text)
            }
            Err(err) => {
                warn!(error = %err, "Chat turn failed; rolling back");
                let rolled_back = self.entries.drain(pending..).next();
                if self.input.is_empty()
                    && let Some(entry) = rolled_back
                {
                    self.input = entry.message.content;
                }
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

#[async_trait]
impl ChatClient for ChatSession {
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
        self.entries.iter().collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.input.clear();
        self.last_error = None;
        self.pending = None;
    }

    async fn submit(&mut self, relay: &dyn Relay) -> Result<String, ClientError> {
        let request = self.begin_submit()?;
        let result = relay.openai(&request).await;
        self.complete(result)
    }
}
