pub mod app_config;
pub mod loader;

pub use app_config::{AppConfig, GenerationConfig, LlmConfig, RenderConfig};
pub use loader::{
    CONFIG_FILE_NAME, ENV_API_KEY, ENV_API_URL, ENV_INSECURE_TLS, ENV_MODEL, api_key_from_env,
    apply_env_overrides, load_config, parse_config_content,
};
