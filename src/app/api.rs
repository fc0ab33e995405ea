//! API Facade for the application.
//!
//! This module exposes high-level functions that glue together context creation
//! and command execution.

use std::path::Path;

use crate::app::AppContext;
use crate::app::commands::{generate, inspect, plan, review};
use crate::domain::configuration::load_config;
use crate::services::{HttpCompletionClient, SofficeRenderer};

pub use crate::app::commands::generate::{GenerateOptions, GenerateOutcome};
pub use crate::app::commands::inspect::InspectOutcome;
pub use crate::app::commands::plan::{OutlineOptions, OutlineOutcome};
pub use crate::app::commands::review::{ReviewOptions, ReviewOutcome};
pub use crate::domain::AppError;

/// Create an `AppContext` from configuration and the `OPENAI_API_KEY` credential.
fn create_context(
    config_path: Option<&Path>,
) -> Result<AppContext<HttpCompletionClient, SofficeRenderer>, AppError> {
    let config = load_config(config_path)?;
    let client = HttpCompletionClient::from_env_with_config(&config.llm)?;
    let renderer = SofficeRenderer::new(config.render.clone());
    Ok(AppContext::new(config, client, renderer))
}

/// Build the layout schema catalog of a template and write it as JSON.
pub fn inspect(template: &Path, output: Option<&Path>) -> Result<InspectOutcome, AppError> {
    inspect::execute(template, output)
}

/// Plan a slide outline for an input file.
pub fn outline(
    config_path: Option<&Path>,
    options: &OutlineOptions,
) -> Result<OutlineOutcome, AppError> {
    let ctx = create_context(config_path)?;
    plan::execute(&ctx, options)
}

/// Run the full pipeline: outline, content, deck and optional review.
pub fn generate(
    config_path: Option<&Path>,
    options: &GenerateOptions,
) -> Result<GenerateOutcome, AppError> {
    let ctx = create_context(config_path)?;
    generate::execute(&ctx, options)
}

/// Review exported slide images.
pub fn review(
    config_path: Option<&Path>,
    options: &ReviewOptions,
) -> Result<ReviewOutcome, AppError> {
    let ctx = create_context(config_path)?;
    review::execute(&ctx, options)
}

