//! Wire types shared by the relaychat server and its clients.
//!
//! Each relay route has its own request and response shape. They are kept
//! separate on purpose: a client only ever talks to its paired route.

mod error;
mod message;
mod relay;

pub use error::{ErrorBody, RelayErrorKind};
pub use message::{Message, Role};
pub use relay::{
    ChatCompletion, Choice, ChoiceMessage, DeepSeekRelayRequest, GeminiRelayRequest,
    GeminiRelayResponse, OpenAIRelayRequest, Usage,
};

/// Route paths served by the relay.
pub mod routes {
    pub const OPENAI: &str = "/api/chatgpt";
    pub const DEEPSEEK: &str = "/api/deepseek";
    pub const GEMINI: &str = "/api/gemini";
}
