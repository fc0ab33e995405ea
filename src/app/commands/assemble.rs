//! Writes generated content into the presentation, one slide per record.

use crate::domain::{AppError, LayoutDescriptor, SlideContent, SlideDraft};
use crate::ports::PresentationDocument;

/// Replace the document's slides with one slide per content record, in order.
///
/// A record whose layout name is unknown uses `fallback_layout_index`, clamped to the
/// available layouts. Returns the number of slides appended.
pub fn assemble<D: PresentationDocument + ?Sized>(
    document: &mut D,
    contents: &[SlideContent],
    fallback_layout_index: usize,
) -> Result<usize, AppError> {
    let removed = document.clear_slides()?;
    if removed > 0 {
        println!("  Removed {removed} existing slide(s) from the template");
    }

    let layouts = document.layouts().to_vec();
    if layouts.is_empty() {
        return Err(AppError::template_error("Template has no slide layouts"));
    }

    for content in contents {
        let layout = choose_layout(&layouts, &content.layout_name, fallback_layout_index);
        let draft = SlideDraft::from_content(layout, content);
        document.append_slide(&draft)?;
    }

    Ok(contents.len())
}

fn choose_layout<'a>(
    layouts: &'a [LayoutDescriptor],
    name: &str,
    fallback_index: usize,
) -> &'a LayoutDescriptor {
    if let Some(layout) = layouts.iter().find(|layout| layout.name == name) {
        return layout;
    }
    let index = fallback_index.min(layouts.len() - 1);
    tracing::warn!(layout = %name, fallback = %layouts[index].name, "Layout not found; using fallback");
    &layouts[index]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldValue, PlaceholderInfo, SlideSpec};
    use crate::testing::MemoryPresentation;

    fn layouts() -> Vec<LayoutDescriptor> {
        vec![
            LayoutDescriptor {
                index: 0,
                name: "Title Slide".to_string(),
                placeholders: vec![
                    PlaceholderInfo::new(Some("ctrTitle"), None, "Title 1"),
                    PlaceholderInfo::new(Some("subTitle"), Some(1), "Subtitle 2"),
                ],
            },
            LayoutDescriptor {
                index: 1,
                name: "10_Title and Content".to_string(),
                placeholders: vec![
                    PlaceholderInfo::new(Some("title"), None, "Title 1"),
                    PlaceholderInfo::new(None, Some(1), "Content 2"),
                    PlaceholderInfo::new(Some("dt"), Some(10), "Date 3"),
                ],
            },
        ]
    }

    fn record(number: u32, layout: &str) -> SlideContent {
        let mut content = SlideContent::fallback(&SlideSpec {
            slide_number: number,
            layout_name: layout.to_string(),
            purpose: String::new(),
            key_content: vec![format!("Point {number}")],
            notes: String::new(),
        });
        content.fields.insert("subtitle".to_string(), FieldValue::Text("Sub".to_string()));
        content
    }

    #[test]
    fn n_records_yield_n_slides_in_order() {
        let mut document = MemoryPresentation::new(layouts());
        document.seed_existing_slides(2);
        let contents: Vec<SlideContent> =
            (1..=4).map(|n| record(n, if n == 1 { "Title Slide" } else { "10_Title and Content" })).collect();

        let appended = assemble(&mut document, &contents, 3).unwrap();

        assert_eq!(appended, 4);
        assert_eq!(document.slide_count(), 4);
        let titles: Vec<&str> = document.slides().iter().map(|s| s.text()[0]).collect();
        assert_eq!(titles, vec!["Slide 1", "Slide 2", "Slide 3", "Slide 4"]);
        assert_eq!(document.slides()[0].layout_index, 0);
        assert_eq!(document.slides()[0].text(), vec!["Slide 1", "Sub"]);
    }

    #[test]
    fn unknown_layout_uses_clamped_fallback_index() {
        let mut document = MemoryPresentation::new(layouts());
        assemble(&mut document, &[record(1, "Nope")], 3).unwrap();
        assert_eq!(document.slides()[0].layout_index, 1);
    }

    #[test]
    fn unknown_placeholders_are_not_written() {
        let mut document = MemoryPresentation::new(layouts());
        assemble(&mut document, &[record(1, "10_Title and Content")], 3).unwrap();
        assert_eq!(document.slides()[0].shapes.len(), 2);
    }
}
