//! Normalized relay errors and their HTTP rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relaychat_types::{ErrorBody, RelayErrorKind};
use thiserror::Error;
use tracing::{error, warn};

use crate::llm::{ProviderError, ProviderKind};

/// Errors a relay route can answer with.
///
/// The `Display` text is what goes on the wire, so no variant may carry
/// credentials or raw provider output.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{provider} API key not configured")]
    Misconfigured { provider: ProviderKind },

    #[error("invalid API key")]
    InvalidCredential,

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("{provider} API error: {status_text}")]
    Provider {
        provider: ProviderKind,
        status: u16,
        status_text: String,
    },

    #[error("internal server error")]
    Internal,
}

impl RelayError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        RelayError::InvalidRequest(message.into())
    }

    /// Normalize a failed provider call.
    ///
    /// Known statuses get their own class; any other status keeps the
    /// provider's code. Transport and decode failures collapse to `Internal`.
    pub fn from_provider(provider: ProviderKind, err: ProviderError) -> Self {
        match err {
            ProviderError::Api {
                status,
                status_text,
                body,
            } => {
                warn!(%provider, status, body = %body, "Provider rejected request");
                match status {
                    401 => RelayError::InvalidCredential,
                    429 => RelayError::RateLimited,
                    400 => RelayError::invalid_request("invalid request"),
                    _ => RelayError::Provider {
                        provider,
                        status,
                        status_text,
                    },
                }
            }
            other => Self::internal(provider, other),
        }
    }

    /// Log the cause and hide it behind a generic `Internal` error.
    pub fn internal(provider: ProviderKind, err: impl std::fmt::Display) -> Self {
        error!(%provider, error = %err, "Relay call failed");
        RelayError::Internal
    }

    pub fn kind(&self) -> RelayErrorKind {
        match self {
            RelayError::InvalidRequest(_) => RelayErrorKind::InvalidRequest,
            RelayError::Misconfigured { .. } => RelayErrorKind::Misconfigured,
            RelayError::InvalidCredential => RelayErrorKind::InvalidCredential,
            RelayError::RateLimited => RelayErrorKind::RateLimited,
            RelayError::Provider { .. } => RelayErrorKind::Provider,
            RelayError::Internal => RelayErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::Misconfigured { .. } | RelayError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::InvalidCredential => StatusCode::UNAUTHORIZED,
            RelayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            RelayError::Provider { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
