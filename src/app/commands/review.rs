//! Stage 3: rendered slide images → holistic critique.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::app::AppContext;
use crate::domain::prompt::review_prompt;
use crate::domain::slide_image::{image_subtype, sort_by_slide_number};
use crate::domain::{AppError, GenerationConfig, Outline, ReviewResult, Usage};
use crate::ports::{
    ChatMessage, CompletionClient, CompletionRequest, ContentPart, ImageUrl, SlideRenderer,
};
use crate::services::read_input_text;

use super::inspect::write_json;

const NO_OUTLINE_SUMMARY: &str = "N/A";

#[derive(Debug, Clone, Default)]
pub struct ReviewOptions {
    pub input: PathBuf,
    pub slides_dir: PathBuf,
    pub outline: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ReviewOutcome {
    pub review: ReviewResult,
    pub output: PathBuf,
    pub usage: Usage,
    pub estimated_cost: f64,
}

/// Review already exported slide images against the source text.
pub fn execute<C: CompletionClient, R: SlideRenderer>(
    ctx: &AppContext<C, R>,
    options: &ReviewOptions,
) -> Result<ReviewOutcome, AppError> {
    let text = read_input_text(&options.input)?;
    let outline = match &options.outline {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let outline: Outline = serde_json::from_str(&content)
                .map_err(|e| AppError::parse_error(format!("outline {}", path.display()), e))?;
            Some(outline)
        }
        None => None,
    };
    let images = list_images(&options.slides_dir)?;

    let mut usage = Usage::default();
    let review = review_deck(
        ctx.client(),
        &ctx.config().generation,
        &images,
        &text,
        outline.as_ref(),
        &mut usage,
    )?;

    let output =
        options.output.clone().unwrap_or_else(|| review_path_for_slides_dir(&options.slides_dir));
    write_json(&output, &review)?;
    let estimated_cost = usage.estimated_cost(ctx.config().llm.cost_per_million_tokens);
    Ok(ReviewOutcome { review, output, usage, estimated_cost })
}

/// Review the whole deck from its slide images in one multimodal request.
pub fn review_deck<C: CompletionClient + ?Sized>(
    client: &C,
    config: &GenerationConfig,
    images: &[PathBuf],
    original_text: &str,
    outline: Option<&Outline>,
    usage: &mut Usage,
) -> Result<ReviewResult, AppError> {
    if images.is_empty() {
        return Err(AppError::Precondition("No slide images to review".to_string()));
    }

    let mut ordered = images.to_vec();
    for number in sort_by_slide_number(&mut ordered) {
        tracing::warn!(slide = number, "Several images share a slide number; keeping listing order");
    }

    let summary = outline
        .map(|o| o.presentation_summary.as_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(NO_OUTLINE_SUMMARY);
    let prompt =
        review_prompt(original_text, summary, ordered.len(), config.review_context_chars)?;

    let mut parts = vec![ContentPart::Text { text: prompt.user }];
    for path in &ordered {
        parts.push(ContentPart::ImageUrl { image_url: ImageUrl { url: data_url(path)? } });
    }

    let request = CompletionRequest {
        messages: vec![ChatMessage::system(prompt.system), ChatMessage::user_parts(parts)],
        temperature: config.review_temperature,
        max_tokens: config.review_max_tokens,
        response_schema: Some(prompt.schema),
    };
    let response = client.complete(&request)?;
    usage.record(response.usage);

    let review: ReviewResult = serde_json::from_str(&response.content)
        .map_err(|e| AppError::parse_error("review reply", e))?;
    review.validate()?;
    Ok(review)
}

/// `data:image/...;base64,...` URL for an image file.
pub fn data_url(path: &Path) -> Result<String, AppError> {
    let bytes = fs::read(path).map_err(|e| {
        AppError::Io(io::Error::new(
            e.kind(),
            format!("Cannot read slide image {}: {e}", path.display()),
        ))
    })?;
    let subtype = image_subtype(path).unwrap_or("png");
    Ok(format!("data:image/{subtype};base64,{}", STANDARD.encode(bytes)))
}

/// Image files directly inside `dir`.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && image_subtype(&path).is_some() {
            images.push(path);
        }
    }
    Ok(images)
}

/// `<stem>.review.json` beside the deck.
pub fn review_path_for(deck: &Path) -> PathBuf {
    deck.with_extension("review.json")
}

/// Default review output for a slide image directory: `out/deck_slides` → `out/deck.review.json`.
pub fn review_path_for_slides_dir(dir: &Path) -> PathBuf {
    let name = dir.file_name().and_then(|n| n.to_str()).unwrap_or("slides");
    let stem = name.strip_suffix("_slides").unwrap_or(name);
    dir.with_file_name(format!("{stem}.review.json"))
}
