use std::fmt;

use serde::{Deserialize, Serialize};

/// Body returned by every relay route on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// Normalized classes of relay failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RelayErrorKind {
    /// The caller supplied a malformed or empty payload.
    InvalidRequest,
    /// The server has no credential for the provider.
    Misconfigured,
    /// The provider rejected the server's credential.
    InvalidCredential,
    /// The provider is throttling requests.
    RateLimited,
    /// The provider failed with some other status.
    #[serde(rename = "provider_error")]
    Provider,
    /// Anything unexpected: network failure, undecodable provider body.
    #[serde(rename = "internal_error")]
    Internal,
}

impl RelayErrorKind {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Misconfigured => "misconfigured",
            Self::InvalidCredential => "invalid_credential",
            Self::RateLimited => "rate_limited",
            Self::Provider => "provider_error",
            Self::Internal => "internal_error",
        }
    }

    /// Short human-readable description.
    pub fn describe(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid request",
            Self::Misconfigured => "provider API key not configured",
            Self::InvalidCredential => "invalid API key",
            Self::RateLimited => "rate limit exceeded",
            Self::Provider => "provider error",
            Self::Internal => "internal server error",
        }
    }
}

impl fmt::Display for RelayErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
