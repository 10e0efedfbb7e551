//! Client error types.

use relaychat_types::RelayErrorKind;
use thiserror::Error;

/// Errors a chat session can surface to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input was empty or whitespace; the relay was not called.
    #[error("please enter a message")]
    EmptyInput,

    /// A call is already outstanding.
    #[error("a request is already in progress")]
    Busy,

    /// The relay answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Relay {
        status: u16,
        kind: RelayErrorKind,
        message: String,
    },

    /// The relay could not be reached.
    #[error("could not reach the relay: {0}")]
    Transport(#[from] reqwest::Error),

    /// The relay answered 2xx with a body the client cannot use.
    #[error("invalid response from relay")]
    MalformedBody,

    /// The session was cleared while the call was in flight; its result was
    /// dropped.
    #[error("conversation was cleared")]
    Cleared,
}

impl ClientError {
    /// Build a `Relay` error from a status and the `error` field of the body,
    /// if the relay sent one.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let kind = classify(status);
        ClientError::Relay {
            status,
            kind,
            message: message.unwrap_or_else(|| kind.describe().to_string()),
        }
    }

    /// The normalized error class, when the error came from a relay call.
    pub fn class(&self) -> Option<RelayErrorKind> {
        match self {
            ClientError::EmptyInput => Some(RelayErrorKind::InvalidRequest),
            ClientError::Busy | ClientError::Cleared => None,
            ClientError::Relay { kind, .. } => Some(*kind),
            ClientError::Transport(_) | ClientError::MalformedBody => {
                Some(RelayErrorKind::Internal)
            }
        }
    }
}

fn classify(status: u16) -> RelayErrorKind {
    match status {
        400 => RelayErrorKind::InvalidRequest,
        401 => RelayErrorKind::InvalidCredential,
        429 => RelayErrorKind::RateLimited,
        500 => RelayErrorKind::Internal,
        _ => RelayErrorKind::Provider,
    }
}
