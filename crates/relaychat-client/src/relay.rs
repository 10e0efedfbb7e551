//! HTTP transport to the relay routes.

use async_trait::async_trait;
use relaychat_types::{
    ChatCompletion, DeepSeekRelayRequest, ErrorBody, GeminiRelayRequest, GeminiRelayResponse,
    OpenAIRelayRequest, routes,
};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ClientError;

/// One call per relay route.
#[async_trait]
pub trait Relay: Send + Sync {
    async fn openai(&self, request: &OpenAIRelayRequest) -> Result<ChatCompletion, ClientError>;

    async fn deepseek(&self, request: &DeepSeekRelayRequest)
    -> Result<ChatCompletion, ClientError>;

    async fn gemini(&self, request: &GeminiRelayRequest)
    -> Result<GeminiRelayResponse, ClientError>;
}

/// [`Relay`] over HTTP against a running relay server.
pub struct HttpRelay {
    client: Client,
    base_url: String,
}

impl HttpRelay {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .map(|b| b.error);
            debug!(status = status.as_u16(), ?message, "Relay call failed");
            return Err(ClientError::from_status(status.as_u16(), message));
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            debug!(error = %e, "Relay body did not decode");
            ClientError::MalformedBody
        })
    }
}

#[async_trait]
impl Relay for HttpRelay {
    async fn openai(&self, request: &OpenAIRelayRequest) -> Result<ChatCompletion, ClientError> {
        self.post(routes::OPENAI, request).await
    }

    async fn deepseek(
        &self,
        request: &DeepSeekRelayRequest,
    ) -> Result<ChatCompletion, ClientError> {
        self.post(routes::DEEPSEEK, request).await
    }

    async fn gemini(
        &self,
        request: &GeminiRelayRequest,
    ) -> Result<GeminiRelayResponse, ClientError> {
        self.post(routes::GEMINI, request).await
    }
}
