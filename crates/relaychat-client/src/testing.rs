//! Scripted relay for session tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use relaychat_types::{
    ChatCompletion, Choice, ChoiceMessage, DeepSeekRelayRequest, GeminiRelayRequest,
    GeminiRelayResponse, OpenAIRelayRequest,
};

use crate::error::ClientError;
use crate::relay::Relay;

pub enum Reply {
    Text(&'static str),
    Status(u16, &'static str),
    NoChoices,
}

#[derive(Default)]
pub struct FakeRelay {
    replies: Mutex<VecDeque<Reply>>,
    pub openai_calls: Mutex<Vec<OpenAIRelayRequest>>,
    pub deepseek_calls: Mutex<Vec<DeepSeekRelayRequest>>,
    pub gemini_calls: Mutex<Vec<GeminiRelayRequest>>,
}

impl FakeRelay {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.openai_calls.lock().unwrap().len()
            + self.deepseek_calls.lock().unwrap().len()
            + self.gemini_calls.lock().unwrap().len()
    }

    fn next(&self) -> Reply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left")
    }

    fn completion(&self) -> Result<ChatCompletion, ClientError> {
        match self.next() {
            Reply::Text(text) => Ok(ChatCompletion {
                choices: vec![Choice {
                    message: ChoiceMessage {
                        content: text.to_string(),
                        role: "assistant".to_string(),
                    },
                    finish_reason: Some("stop".to_string()),
                }],
                usage: None,
            }),
            Reply::Status(status, message) => {
                Err(ClientError::from_status(status, Some(message.to_string())))
            }
            Reply::NoChoices => Ok(ChatCompletion {
                choices: Vec::new(),
                usage: None,
            }),
        }
    }
}

#[async_trait]
impl Relay for FakeRelay {
    async fn openai(&self, request: &OpenAIRelayRequest) -> Result<ChatCompletion, ClientError> {
        self.openai_calls.lock().unwrap().push(request.clone());
        self.completion()
    }

    async fn deepseek(
        &self,
        request: &DeepSeekRelayRequest,
    ) -> Result<ChatCompletion, ClientError> {
        self.deepseek_calls.lock().unwrap().push(request.clone());
        self.completion()
    }

    async fn gemini(
        &self,
        request: &GeminiRelayRequest,
    ) -> Result<GeminiRelayResponse, ClientError> {
        self.gemini_calls.lock().unwrap().push(request.clone());
        match self.next() {
            Reply::Text(text) => Ok(GeminiRelayResponse {
                response: text.to_string(),
            }),
            Reply::Status(status, message) => {
                Err(ClientError::from_status(status, Some(message.to_string())))
            }
            Reply::NoChoices => Err(ClientError::MalformedBody),
        }
    }
}
