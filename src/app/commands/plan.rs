//! Stage 1: free text → slide outline.

use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::domain::layout_match::resolve;
use crate::domain::prompt::outline_prompt;
use crate::domain::{AppError, GenerationConfig, LayoutCategory, Outline, SchemaCatalog, Usage};
use crate::ports::{CompletionClient, CompletionRequest, SlideRenderer};
use crate::services::read_input_text;

use super::inspect::{LoadedTemplate, load_catalog, write_json};

#[derive(Debug, Clone, Default)]
pub struct OutlineOptions {
    pub template: PathBuf,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub target_slides: Option<usize>,
    pub schemas: Option<PathBuf>,
}

#[derive(Debug)]
pub struct OutlineOutcome {
    pub outline: Outline,
    pub output: PathBuf,
    pub usage: Usage,
    pub estimated_cost: f64,
}

/// Plan an outline for `options.input` and write it as JSON.
pub fn execute<C: CompletionClient, R: SlideRenderer>(
    ctx: &AppContext<C, R>,
    options: &OutlineOptions,
) -> Result<OutlineOutcome, AppError> {
    let text = read_input_text(&options.input)?;
    let template = LoadedTemplate::open(&options.template)?;
    let catalog = load_catalog(&template, options.schemas.as_deref())?;

    let mut usage = Usage::default();
    let outline = plan_outline(
        ctx.client(),
        &ctx.config().generation,
        &text,
        &catalog,
        options.target_slides,
        &mut usage,
    )?;

    let output = options.output.clone().unwrap_or_else(|| default_outline_path(&options.input));
    write_json(&output, &outline)?;
    let estimated_cost = usage.estimated_cost(ctx.config().llm.cost_per_million_tokens);
    Ok(OutlineOutcome { outline, output, usage, estimated_cost })
}

/// `output/<input stem>.outline.json`.
pub fn default_outline_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("presentation");
    Path::new("output").join(format!("{stem}.outline.json"))
}

/// Ask the completion service for an outline and bind every slide to a catalog layout.
pub fn plan_outline<C: CompletionClient + ?Sized>(
    client: &C,
    config: &GenerationConfig,
    text: &str,
    catalog: &SchemaCatalog,
    target_slides: Option<usize>,
    usage: &mut Usage,
) -> Result<Outline, AppError> {
    if catalog.is_empty() {
        return Err(AppError::Precondition(
            "Layout catalog is empty; cannot plan an outline".to_string(),
        ));
    }

    let prompt = outline_prompt(text, catalog, target_slides, config.layouts_per_category)?;
    let request =
        CompletionRequest::from_prompt(prompt, config.outline_temperature, config.outline_max_tokens);
    let response = client.complete(&request)?;
    usage.record(response.usage);

    let mut outline: Outline = serde_json::from_str(&response.content)
        .map_err(|e| AppError::parse_error("outline reply", e))?;
    outline.renumber();
    validate_layouts(&mut outline, catalog, &config.default_layout);
    enforce_single_title_slide(&mut outline, catalog, &config.default_layout);

    tracing::info!(slides = outline.len(), "Outline planned");
    Ok(outline)
}

/// Replace layout names the catalog does not know with the closest match or the default.
///
/// Candidates are tried in template order.
pub fn validate_layouts(outline: &mut Outline, catalog: &SchemaCatalog, default_layout: &str) {
    let candidates: Vec<&str> = catalog.names().collect();
    let fallback = default_layout_name(catalog, default_layout);

    for slide in &mut outline.slides {
        if catalog.contains(&slide.layout_name) {
            continue;
        }
        let replacement = match resolve(&slide.layout_name, &candidates) {
            Some(matched) => matched,
            None => match fallback {
                Some(name) => name,
                None => continue,
            },
        };
        tracing::warn!(
            slide = slide.slide_number,
            proposed = %slide.layout_name,
            using = %replacement,
            "Layout not in template; substituting"
        );
        slide.layout_name = replacement.to_string();
    }
}

/// A title-slide layout may open the deck and appears nowhere else.
///
/// Later title slides move to the default body layout. When the catalog has no
/// layout outside the title-slide category the outline is left as planned.
pub fn enforce_single_title_slide(outline: &mut Outline, catalog: &SchemaCatalog, default_layout: &str) {
    let is_title_slide = |name: &str| {
        catalog.get(name).is_some_and(|schema| schema.category == LayoutCategory::TitleSlide)
    };
    let Some(body) = default_layout_name(catalog, default_layout)
        .filter(|name| !is_title_slide(*name))
        .or_else(|| catalog.names().find(|name| !is_title_slide(*name)))
    else {
        return;
    };

    for slide in outline.slides.iter_mut().skip(1) {
        if is_title_slide(slide.layout_name.as_str()) {
            tracing::warn!(
                slide = slide.slide_number,
                proposed = %slide.layout_name,
                using = %body,
                "Title slide layout only opens the deck; substituting"
            );
            slide.layout_name = body.to_string();
        }
    }
}

/// Configured default when present, else the first text layout, else the first layout.
fn default_layout_name<'a>(catalog: &'a SchemaCatalog, default_layout: &str) -> Option<&'a str> {
    if let Some(schema) = catalog.get(default_layout) {
        return Some(&schema.name);
    }
    catalog
        .iter()
        .find(|schema| schema.category == LayoutCategory::TextContent)
        .or_else(|| catalog.iter().next())
        .map(|schema| schema.name.as_str())
}
