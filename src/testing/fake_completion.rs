use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, TokenUsage};
use crate::ports::{CompletionClient, CompletionRequest, CompletionResponse};

/// Scripted completion client. Replies are returned in order and every request is recorded.
#[derive(Clone, Default)]
pub struct FakeCompletionClient {
    replies: Arc<Mutex<VecDeque<Result<String, String>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl FakeCompletionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::new();
        for reply in replies {
            client.push_reply(reply);
        }
        client
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn push_error(&self, message: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Err(message.into()));
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl CompletionClient for FakeCompletionClient {
    fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(content)) => Ok(CompletionResponse {
                content,
                finish_reason: Some("stop".to_string()),
                usage: TokenUsage { prompt_tokens: 80, completion_tokens: 20, total_tokens: 100 },
            }),
            Some(Err(message)) => {
                Err(AppError::Service { status: Some(500), message, retryable: false })
            }
            None => Err(AppError::Service {
                status: None,
                message: "no scripted reply left".to_string(),
                retryable: false,
            }),
        }
    }
}
