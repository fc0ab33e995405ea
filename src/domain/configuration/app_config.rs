//! Application configuration loaded from `slidegen.toml`.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;
use crate::domain::usage::DEFAULT_COST_PER_MILLION_TOKENS;

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Completion service settings.
    #[serde(default)]
    pub llm: LlmConfig,
    /// Per-stage generation settings.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Slide image export settings.
    #[serde(default)]
    pub render: RenderConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.llm.validate()?;
        self.generation.validate()?;
        self.render.validate()?;
        Ok(())
    }
}

/// OpenAI-compatible completion endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Chat completions endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Overall request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum attempts per request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Base delay between retries in milliseconds.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure_skip_tls_verify: bool,
    #[serde(default = "default_cost_per_million_tokens")]
    pub cost_per_million_tokens: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            insecure_skip_tls_verify: false,
            cost_per_million_tokens: default_cost_per_million_tokens(),
        }
    }
}

impl LlmConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.model.trim().is_empty() {
            return Err(AppError::InvalidConfig("model must not be empty".to_string()));
        }
        if self.connect_timeout_secs == 0 {
            return Err(AppError::InvalidConfig(
                "connect_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::InvalidConfig("timeout_secs must be greater than 0".to_string()));
        }
        if self.max_retries == 0 {
            return Err(AppError::InvalidConfig("max_retries must be greater than 0".to_string()));
        }
        if self.retry_delay_ms == 0 {
            return Err(AppError::InvalidConfig(
                "retry_delay_ms must be greater than 0".to_string(),
            ));
        }
        if !self.cost_per_million_tokens.is_finite() || self.cost_per_million_tokens < 0.0 {
            return Err(AppError::InvalidConfig(
                "cost_per_million_tokens must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.openai.com/v1/chat/completions").expect("Default API URL must be valid")
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_timeout() -> u64 {
    300
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_cost_per_million_tokens() -> f64 {
    DEFAULT_COST_PER_MILLION_TOKENS
}

/// Sampling and prompt-size settings for the three LLM stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    #[serde(default = "default_outline_temperature")]
    pub outline_temperature: f32,
    #[serde(default = "default_outline_max_tokens")]
    pub outline_max_tokens: u32,
    #[serde(default = "default_content_temperature")]
    pub content_temperature: f32,
    #[serde(default = "default_content_max_tokens")]
    pub content_max_tokens: u32,
    #[serde(default = "default_review_temperature")]
    pub review_temperature: f32,
    #[serde(default = "default_review_max_tokens")]
    pub review_max_tokens: u32,
    /// Layout used when a planned layout name cannot be resolved.
    #[serde(default = "default_layout")]
    pub default_layout: String,
    /// Layout index used when assembly cannot find a layout by name.
    #[serde(default = "default_fallback_layout_index")]
    pub fallback_layout_index: usize,
    /// Characters of source text sent with each content request.
    #[serde(default = "default_content_context_chars")]
    pub content_context_chars: usize,
    /// Characters of source text sent with the review request.
    #[serde(default = "default_review_context_chars")]
    pub review_context_chars: usize,
    /// Layouts listed per category in the outline prompt.
    #[serde(default = "default_layouts_per_category")]
    pub layouts_per_category: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            outline_temperature: default_outline_temperature(),
            outline_max_tokens: default_outline_max_tokens(),
            content_temperature: default_content_temperature(),
            content_max_tokens: default_content_max_tokens(),
            review_temperature: default_review_temperature(),
            review_max_tokens: default_review_max_tokens(),
            default_layout: default_layout(),
            fallback_layout_index: default_fallback_layout_index(),
            content_context_chars: default_content_context_chars(),
            review_context_chars: default_review_context_chars(),
            layouts_per_category: default_layouts_per_category(),
        }
    }
}

impl GenerationConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        let temperatures = [
            ("outline_temperature", self.outline_temperature),
            ("content_temperature", self.content_temperature),
            ("review_temperature", self.review_temperature),
        ];
        for (name, value) in temperatures {
            if !(0.0..=2.0).contains(&value) {
                return Err(AppError::InvalidConfig(format!("{name} must be between 0 and 2")));
            }
        }
        let token_limits = [
            ("outline_max_tokens", self.outline_max_tokens),
            ("content_max_tokens", self.content_max_tokens),
            ("review_max_tokens", self.review_max_tokens),
        ];
        for (name, value) in token_limits {
            if value == 0 {
                return Err(AppError::InvalidConfig(format!("{name} must be greater than 0")));
            }
        }
        if self.default_layout.trim().is_empty() {
            return Err(AppError::InvalidConfig("default_layout must not be empty".to_string()));
        }
        if self.layouts_per_category == 0 {
            return Err(AppError::InvalidConfig(
                "layouts_per_category must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_outline_temperature() -> f32 {
    0.7
}

fn default_outline_max_tokens() -> u32 {
    4096
}

fn default_content_temperature() -> f32 {
    0.7
}

fn default_content_max_tokens() -> u32 {
    2000
}

fn default_review_temperature() -> f32 {
    0.3
}

fn default_review_max_tokens() -> u32 {
    4096
}

fn default_layout() -> String {
    "10_Title and Content".to_string()
}

fn default_fallback_layout_index() -> usize {
    3
}

fn default_content_context_chars() -> usize {
    2000
}

fn default_review_context_chars() -> usize {
    3000
}

fn default_layouts_per_category() -> usize {
    5
}

/// External tools used to turn a deck into slide images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default = "default_soffice")]
    pub soffice: String,
    #[serde(default = "default_pdftoppm")]
    pub pdftoppm: String,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { soffice: default_soffice(), pdftoppm: default_pdftoppm(), dpi: default_dpi() }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.soffice.trim().is_empty() || self.pdftoppm.trim().is_empty() {
            return Err(AppError::InvalidConfig("render commands must not be empty".to_string()));
        }
        if self.dpi == 0 {
            return Err(AppError::InvalidConfig("dpi must be greater than 0".to_string()));
        }
        Ok(())
    }
}

fn default_soffice() -> String {
    "soffice".to_string()
}

fn default_pdftoppm() -> String {
    "pdftoppm".to_string()
}

fn default_dpi() -> u32 {
    150
}
