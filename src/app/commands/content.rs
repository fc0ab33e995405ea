//! Stage 2: outline → per-slide content shaped by each layout's schema.

use crate::domain::prompt::content_prompt;
use crate::domain::{
    AppError, GenerationConfig, LayoutSchema, Outline, SchemaCatalog, SlideContent, SlideSpec,
    Usage,
};
use crate::ports::{CompletionClient, CompletionRequest};

/// Generate content for one slide. Any failure yields the fallback record.
pub fn generate_slide_content<C: CompletionClient + ?Sized>(
    client: &C,
    config: &GenerationConfig,
    spec: &SlideSpec,
    schema: &LayoutSchema,
    full_context: &str,
    usage: &mut Usage,
) -> SlideContent {
    match request_content(client, config, spec, schema, full_context, usage) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(slide = spec.slide_number, error = %e, "Content generation failed; using fallback");
            SlideContent::fallback(spec)
        }
    }
}

fn request_content<C: CompletionClient + ?Sized>(
    client: &C,
    config: &GenerationConfig,
    spec: &SlideSpec,
    schema: &LayoutSchema,
    full_context: &str,
    usage: &mut Usage,
) -> Result<SlideContent, AppError> {
    let prompt = content_prompt(spec, schema, full_context, config.content_context_chars)?;
    let request =
        CompletionRequest::from_prompt(prompt, config.content_temperature, config.content_max_tokens);
    let response = client.complete(&request)?;
    usage.record(response.usage);

    let reply: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&response.content)
        .map_err(|e| AppError::parse_error(format!("slide {} content", spec.slide_number), e))?;
    let content = SlideContent::from_reply(spec, schema, &reply);

    let missing = content.missing_required(schema);
    if !missing.is_empty() {
        return Err(AppError::parse_error(
            format!("slide {} content", spec.slide_number),
            format!("required fields empty: {}", missing.join(", ")),
        ));
    }
    Ok(content)
}

/// Generate content for every planned slide, in order.
///
/// Slides whose layout has no schema are skipped. Returns the records and the usage
/// of this stage.
pub fn generate_all<C: CompletionClient + ?Sized>(
    client: &C,
    config: &GenerationConfig,
    outline: &Outline,
    catalog: &SchemaCatalog,
    full_context: &str,
) -> (Vec<SlideContent>, Usage) {
    let mut usage = Usage::default();
    let mut contents = Vec::with_capacity(outline.len());
    let total = outline.len();

    for spec in &outline.slides {
        let Some(schema) = catalog.get(&spec.layout_name) else {
            tracing::warn!(slide = spec.slide_number, layout = %spec.layout_name, "No schema for layout; skipping slide");
            continue;
        };
        println!("  Generating slide {}/{} ({})", spec.slide_number, total, spec.layout_name);
        contents.push(generate_slide_content(client, config, spec, schema, full_context, &mut usage));
    }

    (contents, usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldValue, LayoutDescriptor, PlaceholderInfo};
    use crate::testing::FakeCompletionClient;

    fn catalog() -> SchemaCatalog {
        SchemaCatalog::build(&[LayoutDescriptor {
            index: 0,
            name: "10_Title and Content".to_string(),
            placeholders: vec![
                PlaceholderInfo::new(Some("title"), None, "Title 1"),
                PlaceholderInfo::new(None, Some(1), "Content 2"),
            ],
        }])
    }

    fn spec(number: u32, layout: &str) -> SlideSpec {
        SlideSpec {
            slide_number: number,
            layout_name: layout.to_string(),
            purpose: "Explain results".to_string(),
            key_content: vec!["A".to_string(), "B".to_string()],
            notes: "planned notes".to_string(),
        }
    }

    #[test]
    fn happy_path_fills_required_fields() {
        let client = FakeCompletionClient::with_replies([
            r#"{"title": "Results", "content": ["Up 10%", "Costs flat"], "notes": "Say it"}"#,
        ]);
        let catalog = catalog();
        let schema = catalog.get("10_Title and Content").unwrap();
        let mut usage = Usage::default();

        let content = generate_slide_content(
            &client,
            &GenerationConfig::default(),
            &spec(2, "10_Title and Content"),
            schema,
            "full text",
            &mut usage,
        );

        assert!(content.missing_required(schema).is_empty());
        assert_eq!(content.text("title"), Some("Results"));
        assert_eq!(content.notes, "Say it");
        assert_eq!(usage.calls, 1);
        assert_eq!(client.requests()[0].schema_name(), Some("slide_content"));
    }

    #[test]
    fn empty_required_field_degrades_to_fallback() {
        let client = FakeCompletionClient::with_replies([r#"{"title": "", "content": ["x"], "notes": ""}"#]);
        let catalog = catalog();
        let content = generate_slide_content(
            &client,
            &GenerationConfig::default(),
            &spec(3, "10_Title and Content"),
            catalog.get("10_Title and Content").unwrap(),
            "",
            &mut Usage::default(),
        );
        assert_eq!(content.text("title"), Some("Slide 3"));
        assert_eq!(
            content.fields.get("content"),
            Some(&FieldValue::Bullets(vec!["A".to_string(), "B".to_string()]))
        );
        assert_eq!(content.notes, "planned notes");
    }

    #[test]
    fn service_error_degrades_to_fallback() {
        let client = FakeCompletionClient::new();
        client.push_error("HTTP 500");
        let catalog = catalog();
        let content = generate_slide_content(
            &client,
            &GenerationConfig::default(),
            &spec(1, "10_Title and Content"),
            catalog.get("10_Title and Content").unwrap(),
            "",
            &mut Usage::default(),
        );
        assert_eq!(content, SlideContent::fallback(&spec(1, "10_Title and Content")));
    }

    #[test]
    fn generate_all_skips_layouts_without_schema() {
        let client = FakeCompletionClient::with_replies([
            r#"{"title": "One", "content": ["a"], "notes": ""}"#,
            r#"{"title": "Three", "content": ["c"], "notes": ""}"#,
        ]);
        let outline = Outline {
            presentation_summary: String::new(),
            slides: vec![
                spec(1, "10_Title and Content"),
                spec(2, "Unknown Layout"),
                spec(3, "10_Title and Content"),
            ],
        };

        let (contents, usage) =
            generate_all(&client, &GenerationConfig::default(), &outline, &catalog(), "");
        let numbers: Vec<u32> = contents.iter().map(|c| c.slide_number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(usage.calls, 2);
    }
}
