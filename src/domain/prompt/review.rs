use serde::Serialize;

use crate::domain::AppError;

use super::{Prompt, render_template, schemas, truncate_chars};

const SYSTEM: &str = "You are an expert presentation reviewer with a critical eye for quality, \
completeness, and design.";

#[derive(Serialize)]
struct ReviewContext<'a> {
    slide_count: usize,
    source: String,
    outline_summary: &'a str,
}

/// Build the text part of the review request. Slide images are attached by the caller.
pub fn review_prompt(
    original_text: &str,
    outline_summary: &str,
    slide_count: usize,
    context_chars: usize,
) -> Result<Prompt, AppError> {
    let user = render_template(
        "review.j2",
        ReviewContext {
            slide_count,
            source: truncate_chars(original_text, context_chars),
            outline_summary,
        },
    )?;
    Ok(Prompt { system: SYSTEM.to_string(), user, schema: schemas::review_schema() })
}
