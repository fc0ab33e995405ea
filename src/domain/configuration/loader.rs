//! Configuration loading and environment overrides.

use std::path::{Path, PathBuf};

use url::Url;

use crate::domain::{AppConfig, AppError};

pub const CONFIG_FILE_NAME: &str = "slidegen.toml";

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_MODEL: &str = "SLIDEGEN_MODEL";
pub const ENV_API_URL: &str = "SLIDEGEN_API_URL";
pub const ENV_INSECURE_TLS: &str = "SLIDEGEN_INSECURE_TLS";

/// Load configuration from `explicit`, or `slidegen.toml` in the working directory
/// when present, then apply environment overrides.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, AppError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path.to_path_buf())
        }
        None => Some(PathBuf::from(CONFIG_FILE_NAME)).filter(|p| p.exists()),
    };

    let mut config = match &path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration");
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Override file settings with `SLIDEGEN_*` environment values.
pub fn apply_env_overrides(
    config: &mut AppConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(), AppError> {
    if let Some(model) = env(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
        config.llm.model = model;
    }
    if let Some(url) = env(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
        config.llm.api_url = Url::parse(url.trim())
            .map_err(|e| AppError::InvalidConfig(format!("{ENV_API_URL} is not a valid URL: {e}")))?;
    }
    if let Some(flag) = env(ENV_INSECURE_TLS) {
        config.llm.insecure_skip_tls_verify = parse_flag(ENV_INSECURE_TLS, &flag)?;
    }
    Ok(())
}

/// Read the completion service API key.
pub fn api_key_from_env() -> Result<String, AppError> {
    std::env::var(ENV_API_KEY)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or(AppError::MissingApiKey)
}

fn parse_flag(name: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::InvalidConfig(format!("{name} must be a boolean, got '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn app_config_parses_from_toml() {
        let toml = r#"
[llm]
api_url = "https://example.com/v1/chat/completions"
model = "gpt-test"
max_retries = 1
retry_delay_ms = 250

[generation]
default_layout = "Title and Content"
fallback_layout_index = 1

[render]
dpi = 96
"#;
        let config = parse_config_content(toml).unwrap();

        assert_eq!(config.llm.api_url.as_str(), "https://example.com/v1/chat/completions");
        assert_eq!(config.llm.model, "gpt-test");
        assert_eq!(config.llm.max_retries, 1);
        assert_eq!(config.generation.default_layout, "Title and Content");
        assert_eq!(config.generation.fallback_layout_index, 1);
        assert_eq!(config.render.dpi, 96);
        assert_eq!(config.render.soffice, "soffice");
    }

    #[test]
    fn app_config_uses_defaults_for_missing_sections() {
        let config = parse_config_content("").unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.generation.layouts_per_category, 5);
    }

    #[test]
    fn app_config_rejects_unknown_fields() {
        let err = parse_config_content("[llm]\nunknown = 1\n").unwrap_err();
        assert!(matches!(err, AppError::TomlParseError(_)));
    }

    #[test]
    fn app_config_rejects_invalid_values() {
        let err = parse_config_content("[llm]\nmax_retries = 0\n").unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig(msg) if msg.contains("max_retries")));
    }

    #[test]
    fn env_overrides_replace_model_url_and_tls() {
        let mut config = AppConfig::default();
        apply_env_overrides(
            &mut config,
            env_of(&[
                (ENV_MODEL, "local-model"),
                (ENV_API_URL, "http://127.0.0.1:8080/v1/chat/completions"),
                (ENV_INSECURE_TLS, "true"),
            ]),
        )
        .unwrap();
        assert_eq!(config.llm.model, "local-model");
        assert_eq!(config.llm.api_url.as_str(), "http://127.0.0.1:8080/v1/chat/completions");
        assert!(config.llm.insecure_skip_tls_verify);
    }

    #[test]
    fn env_overrides_reject_bad_values() {
        let mut config = AppConfig::default();
        assert!(apply_env_overrides(&mut config, env_of(&[(ENV_API_URL, "not a url")])).is_err());
        assert!(
            apply_env_overrides(&mut config, env_of(&[(ENV_INSECURE_TLS, "maybe")])).is_err()
        );
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = AppConfig::default();
        apply_env_overrides(&mut config, env_of(&[(ENV_MODEL, " ")])).unwrap();
        assert_eq!(config.llm.model, "gpt-4o");
    }
}
