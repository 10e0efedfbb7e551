//! Client-side chat sessions for the relaychat routes.
//!
//! Two session shapes exist:
//!
//! - [`ChatSession`] keeps the whole conversation and sends it with every
//!   turn (OpenAI-style route). The user's message is shown before the relay
//!   answers and rolled back if the call fails.
//! - [`SingleExchange`] keeps only the latest prompt and reply (DeepSeek-style
//!   and Gemini-style routes).
//!
//! Both refuse a new submission while a call is outstanding, and neither can
//! cancel one: a call always runs to completion.

mod clipboard;
mod conversation;
mod error;
mod exchange;
mod relay;

#[cfg(test)]
mod testing;

pub use clipboard::{Clipboard, Osc52Clipboard, copy_text};
pub use conversation::{ChatEntry, ChatSession};
pub use error::ClientError;
pub use exchange::{ExchangeProvider, PendingExchange, SingleExchange};
pub use relay::{HttpRelay, Relay};

use async_trait::async_trait;

/// Operations shared by every session shape, so front ends can drive any
/// variant the same way.
#[async_trait]
pub trait ChatClient: Send {
    /// Replace the pending input.
    fn set_input(&mut self, text: &str);

    fn input(&self) -> &str;

    fn is_loading(&self) -> bool;

    /// The last user-visible error, if any.
    fn last_error(&self) -> Option<&str>;

    /// Visible transcript, oldest first.
    fn entries(&self) -> Vec<&ChatEntry>;

    /// Reset to an empty session.
    fn clear(&mut self);

    /// Send the pending input and wait for the reply. Returns the assistant
    /// text on success.
    async fn submit(&mut self, relay: &dyn Relay) -> Result<String, ClientError>;

    /// Copy the text of the entry at `index` (oldest first). Failures are
    /// logged and reported as `false`.
    fn copy_message(&self, index: usize, clipboard: &mut dyn Clipboard) -> bool {
        match self.entries().get(index) {
            Some(entry) => copy_text(clipboard, &entry.message.content),
            None => {
                tracing::warn!(index, "No message to copy");
                false
            }
        }
    }

    /// Copy the latest reply.
    fn copy_response(&self, clipboard: &mut dyn Clipboard) -> bool {
        match self.entries().last() {
            Some(entry) => copy_text(clipboard, &entry.message.content),
            None => {
                tracing::warn!("No response to copy");
                false
            }
        }
    }
}
