//! Full pipeline: outline → content → deck → (render → review).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::AppContext;
use crate::domain::{AppError, Outline, ReviewResult, Usage};
use crate::ports::{CompletionClient, SlideRenderer};
use crate::services::read_input_text;

use super::assemble::assemble;
use super::content::generate_all;
use super::inspect::{LoadedTemplate, load_catalog, write_json};
use super::plan::plan_outline;
use super::review::{review_deck, review_path_for};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub template: PathBuf,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub target_slides: Option<usize>,
    pub review: bool,
    pub schemas: Option<PathBuf>,
}

#[derive(Debug)]
pub struct GenerateOutcome {
    pub output: PathBuf,
    pub outline_path: PathBuf,
    pub slide_count: usize,
    pub review: Option<(ReviewResult, PathBuf)>,
    pub usage: Usage,
    pub estimated_cost: f64,
}

pub fn execute<C: CompletionClient, R: SlideRenderer>(
    ctx: &AppContext<C, R>,
    options: &GenerateOptions,
) -> Result<GenerateOutcome, AppError> {
    let config = ctx.config();
    let text = read_input_text(&options.input)?;
    let mut template = LoadedTemplate::open(&options.template)?;
    let catalog = load_catalog(&template, options.schemas.as_deref())?;
    println!("✓ Loaded template with {} layouts", catalog.len());

    let mut usage = Usage::default();
    println!("Planning outline...");
    let outline = plan_outline(
        ctx.client(),
        &config.generation,
        &text,
        &catalog,
        options.target_slides,
        &mut usage,
    )?;
    println!("✓ Planned {} slides", outline.len());

    let output = options.output.clone().unwrap_or_else(default_output_path);
    let outline_path = outline_path_for(&output);
    write_json(&outline_path, &outline)?;

    println!("Generating slide content...");
    let (contents, content_usage) =
        generate_all(ctx.client(), &config.generation, &outline, &catalog, &text);
    usage += content_usage;

    println!("Building {} slides...", contents.len());
    let slide_count =
        assemble(&mut template.deck, &contents, config.generation.fallback_layout_index)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    template.deck.save(&output)?;
    println!("✓ Presentation saved: {}", output.display());

    let review = if options.review {
        run_review(ctx, &output, &text, &outline, &mut usage)?
    } else {
        None
    };

    let estimated_cost = usage.estimated_cost(config.llm.cost_per_million_tokens);
    Ok(GenerateOutcome { output, outline_path, slide_count, review, usage, estimated_cost })
}

/// Render the saved deck and review it. A render failure skips the review.
fn run_review<C: CompletionClient, R: SlideRenderer>(
    ctx: &AppContext<C, R>,
    deck: &Path,
    text: &str,
    outline: &Outline,
    usage: &mut Usage,
) -> Result<Option<(ReviewResult, PathBuf)>, AppError> {
    let slides_dir = slides_dir_for(deck);
    let images = match ctx.renderer().render(deck, &slides_dir) {
        Ok(images) => images,
        Err(e) => {
            tracing::warn!(error = %e, "Slide export failed; skipping review");
            println!("⚠️  Skipping review: {e}");
            return Ok(None);
        }
    };
    println!("✓ Exported {} slides to {}", images.len(), slides_dir.display());

    let review =
        review_deck(ctx.client(), &ctx.config().generation, &images, text, Some(outline), usage)?;
    let review_path = review_path_for(deck);
    write_json(&review_path, &review)?;
    Ok(Some((review, review_path)))
}

fn default_output_path() -> PathBuf {
    PathBuf::from(format!("output/presentation_{}.pptx", Local::now().format("%Y%m%d_%H%M%S")))
}

/// `<stem>.outline.json` beside the deck.
pub fn outline_path_for(deck: &Path) -> PathBuf {
    deck.with_extension("outline.json")
}

/// `<stem>_slides/` beside the deck.
pub fn slides_dir_for(deck: &Path) -> PathBuf {
    let stem = deck.file_stem().and_then(|s| s.to_str()).unwrap_or("presentation");
    deck.with_file_name(format!("{stem}_slides"))
}
