//! OpenAI-compatible chat completions client using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::usage::TokenUsage;
use crate::domain::{AppError, LlmConfig};
use crate::ports::{ChatMessage, CompletionClient, CompletionRequest, CompletionResponse};

/// HTTP client for the chat completions endpoint.
#[derive(Clone)]
pub struct HttpCompletionClient {
    api_key: String,
    api_url: Url,
    model: String,
    max_retries: u32,
    retry_delay_ms: u64,
    client: Client,
}

impl std::fmt::Debug for HttpCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCompletionClient")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_retries", &self.max_retries)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpCompletionClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, config: &LlmConfig) -> Result<Self, AppError> {
        if config.insecure_skip_tls_verify {
            tracing::warn!("TLS certificate verification is disabled for {}", config.api_url);
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.insecure_skip_tls_verify)
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
            client,
        })
    }

    /// Create from `OPENAI_API_KEY` with the given configuration.
    pub fn from_env_with_config(config: &LlmConfig) -> Result<Self, AppError> {
        let api_key = crate::domain::configuration::api_key_from_env()?;
        Self::new(api_key, config)
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat<'a>>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    strict: bool,
    schema: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

impl CompletionClient for HttpCompletionClient {
    fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, AppError> {
        let api_request = ApiRequest {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.response_schema.as_ref().map(|schema| ResponseFormat {
                kind: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: &schema.name,
                    strict: true,
                    schema: &schema.schema,
                },
            }),
        };

        let mut last_error = None;
        let max_attempts = self.max_retries.max(1);

        for attempt in 0..max_attempts {
            if attempt > 0 {
                std::thread::sleep(backoff_delay(self.retry_delay_ms, attempt));
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts,
                    "Retrying completion request"
                );
            }

            match self.send_request(&api_request) {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() => {
                    tracing::debug!(error = %e, "Transient completion failure");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::Service {
            status: None,
            message: "Request failed after all retries".into(),
            retryable: false,
        }))
    }
}

/// Upper bound on a single retry sleep.
const MAX_BACKOFF_MS: u64 = 60_000;

/// Exponential backoff before retry `attempt` (1-based): base * 2^(attempt-1), capped.
fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    let factor = 2_u64.checked_pow(attempt.saturating_sub(1));
    let delay = factor.and_then(|f| base_ms.checked_mul(f)).unwrap_or(MAX_BACKOFF_MS);
    Duration::from_millis(delay.min(MAX_BACKOFF_MS))
}

impl HttpCompletionClient {
    fn send_request(&self, request: &ApiRequest<'_>) -> Result<CompletionResponse, AppError> {
        let response = self
            .client
            .post(self.api_url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(|e| AppError::Service {
                status: None,
                message: format!("HTTP request failed: {}", e),
                retryable: e.is_timeout() || e.is_connect(),
            })?;

        let status = response.status();

        if status.is_success() {
            let body = response.text().map_err(|e| AppError::Service {
                status: Some(status.as_u16()),
                message: format!("Failed to read response body: {}", e),
                retryable: e.is_timeout(),
            })?;
            parse_response(&body)
        } else if status.as_u16() == 429 {
            Err(AppError::Service {
                status: Some(429),
                message: "Rate limited (429)".into(),
                retryable: true,
            })
        } else if status.is_server_error() {
            Err(AppError::Service {
                status: Some(status.as_u16()),
                message: format!("Server error ({})", status.as_u16()),
                retryable: true,
            })
        } else {
            let error_text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            Err(AppError::Service {
                status: Some(status.as_u16()),
                message: format!("API error ({}): {}", status.as_u16(), error_text),
                retryable: false,
            })
        }
    }
}

fn parse_response(body: &str) -> Result<CompletionResponse, AppError> {
    let api_response: ApiResponse =
        serde_json::from_str(body).map_err(|e| AppError::parse_error("completion response", e))?;

    let choice = api_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AppError::parse_error("completion response", "no choices returned"))?;

    let content = match (choice.message.content, choice.message.refusal) {
        (Some(content), _) if !content.is_empty() => content,
        (_, Some(refusal)) => {
            return Err(AppError::parse_error("completion response", format!("refused: {refusal}")));
        }
        _ => return Err(AppError::parse_error("completion response", "empty message content")),
    };

    Ok(CompletionResponse {
        content,
        finish_reason: choice.finish_reason,
        usage: api_response.usage.unwrap_or_default(),
    })
}
