//! Prompt construction for the outline, content and review stages.
//!
//! Each builder is pure: it formats a request from domain records and returns the
//! prompt text together with the JSON schema the reply must satisfy.

mod content;
mod outline;
mod review;
pub mod schemas;

use include_dir::{Dir, include_dir};
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

use crate::domain::AppError;

pub use content::content_prompt;
pub use outline::outline_prompt;
pub use review::review_prompt;

static PROMPTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/prompts");

/// Named JSON schema the completion service must conform to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseSchema {
    pub name: String,
    pub schema: serde_json::Value,
}

/// A system instruction, the user prompt, and the expected reply shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub schema: ResponseSchema,
}

/// Render an embedded prompt template with strict undefined handling.
pub fn render_template<S: Serialize>(name: &str, context: S) -> Result<String, AppError> {
    let source = PROMPTS_DIR
        .get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| AppError::Prompt {
            template: name.to_string(),
            reason: "template not found".to_string(),
        })?;

    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_trim_blocks(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    env.render_str(source, context)
        .map_err(|err| AppError::Prompt { template: name.to_string(), reason: err.to_string() })
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
