use std::io;

use thiserror::Error;

/// Library-wide error type for slidegen operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Configuration value failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The completion service credential is not available.
    #[error("OPENAI_API_KEY environment variable not set")]
    MissingApiKey,

    /// The completion service rejected or failed a request.
    #[error("Completion service error: {message}")]
    Service { status: Option<u16>, message: String, retryable: bool },

    /// A reply or artifact could not be interpreted.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// JSON serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The presentation template is unusable.
    #[error("Template error: {0}")]
    Template(String),

    /// The presentation package (zip container) could not be read or written.
    #[error("Package error: {0}")]
    Package(#[from] zip::result::ZipError),

    /// Input text could not be decoded with any supported encoding.
    #[error("Could not decode {path} with any supported encoding")]
    Decode { path: String },

    /// A stage was invoked without what it needs to run.
    #[error("{0}")]
    Precondition(String),

    /// Prompt template rendering failed.
    #[error("Prompt rendering failed for '{template}': {reason}")]
    Prompt { template: String, reason: String },

    /// Slide image export failed.
    #[error("Slide rendering failed running '{command}': {details}")]
    Render { command: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn template_error<S: Into<String>>(message: S) -> Self {
        AppError::Template(message.into())
    }

    pub fn parse_error(what: impl Into<String>, details: impl ToString) -> Self {
        AppError::ParseError { what: what.into(), details: details.to_string() }
    }

    /// Whether the completion client should retry after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Service { retryable: true, .. })
    }
}
