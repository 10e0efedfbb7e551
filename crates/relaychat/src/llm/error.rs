//! LLM error types.

use thiserror::Error;

/// Errors that can occur when calling a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("api error (status {status} {status_text})")]
    Api {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Response body was not what the provider is documented to return
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Build an `Api` error by draining a failed response.
    pub(super) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
        let body = response.text().await.unwrap_or_default();
        ProviderError::Api {
            status: status.as_u16(),
            status_text,
            body,
        }
    }
}
