//! HTTP request handlers.

mod health;
mod relay;

pub use health::{livez, readyz};
pub use relay::{relay_deepseek, relay_gemini, relay_openai};
