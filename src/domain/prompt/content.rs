use serde::Serialize;

use crate::domain::AppError;
use crate::domain::catalog::LayoutSchema;
use crate::domain::outline::SlideSpec;

use super::{Prompt, render_template, schemas, truncate_chars};

const SYSTEM: &str =
    "You are an expert content writer creating detailed, professional slide content.";

#[derive(Serialize)]
struct ContentContext<'a> {
    slide_number: u32,
    purpose: &'a str,
    key_content: &'a [String],
    notes: &'a str,
    layout_name: &'a str,
    category: &'static str,
    complexity: &'static str,
    fields: Vec<FieldRequirement<'a>>,
    detailed_bullets: bool,
    context: String,
}

#[derive(Serialize)]
struct FieldRequirement<'a> {
    name: &'a str,
    kind: &'static str,
    purpose: &'a str,
    max_length: Option<u32>,
    max_bullets: Option<u32>,
    max_bullet_length: Option<u32>,
}

/// Build the per-slide content request for `spec` on `layout`.
pub fn content_prompt(
    spec: &SlideSpec,
    layout: &LayoutSchema,
    full_context: &str,
    context_chars: usize,
) -> Result<Prompt, AppError> {
    let fields = layout
        .fields
        .iter()
        .filter_map(|name| {
            let meta = layout.metadata(name)?;
            Some(FieldRequirement {
                name,
                kind: meta.field_type.as_str(),
                purpose: &meta.purpose,
                max_length: meta.max_length,
                max_bullets: meta.max_bullets,
                max_bullet_length: meta.max_bullet_length,
            })
        })
        .collect();

    let user = render_template(
        "content.j2",
        ContentContext {
            slide_number: spec.slide_number,
            purpose: &spec.purpose,
            key_content: &spec.key_content,
            notes: &spec.notes,
            layout_name: &layout.name,
            category: layout.category.as_str(),
            complexity: layout.complexity.as_str(),
            fields,
            detailed_bullets: !layout.is_divider(),
            context: truncate_chars(full_context, context_chars),
        },
    )?;

    Ok(Prompt { system: SYSTEM.to_string(), user, schema: schemas::content_schema(layout) })
}
