//! Completion service port definition.

use serde::Serialize;

use crate::domain::AppError;
use crate::domain::prompt::{Prompt, ResponseSchema};
use crate::domain::usage::TokenUsage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One part of a multimodal message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self { role: Role::System, content: MessageContent::Text(text.into()) }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, content: MessageContent::Text(text.into()) }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self { role: Role::User, content: MessageContent::Parts(parts) }
    }
}

/// A structured completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// When set, the reply must be JSON conforming to this schema.
    pub response_schema: Option<ResponseSchema>,
}

impl CompletionRequest {
    /// System + user text request constrained by the prompt's schema.
    pub fn from_prompt(prompt: Prompt, temperature: f32, max_tokens: u32) -> Self {
        Self {
            messages: vec![ChatMessage::system(prompt.system), ChatMessage::user(prompt.user)],
            temperature,
            max_tokens,
            response_schema: Some(prompt.schema),
        }
    }

    /// Name of the response schema, if any.
    pub fn schema_name(&self) -> Option<&str> {
        self.response_schema.as_ref().map(|s| s.name.as_str())
    }
}

/// Reply from the completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub content: String,
    pub finish_reason: Option<String>,
    pub usage: TokenUsage,
}

/// Port for LLM chat completions.
pub trait CompletionClient {
    fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, AppError>;
}
