//! Slide drafts: generated content bound to a layout's placeholders.

use crate::domain::content::{FieldValue, SlideContent};
use crate::domain::layout::{LayoutDescriptor, PlaceholderInfo, PlaceholderKind};

/// Text written into one placeholder, one entry per paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderFill {
    pub placeholder: PlaceholderInfo,
    pub paragraphs: Vec<String>,
}

/// A slide ready to be appended to a presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideDraft {
    pub layout_index: usize,
    pub shapes: Vec<PlaceholderFill>,
    pub notes: Option<String>,
}

impl SlideDraft {
    /// Bind `content` to the placeholders of `layout`.
    ///
    /// Title and subtitle placeholders take the matching text field; every body
    /// placeholder receives the `content` bullets. Picture, table and chart
    /// placeholders stay empty so the layout prompt shows. Unknown placeholders
    /// (date, footer, slide number) are left to the layout.
    pub fn from_content(layout: &LayoutDescriptor, content: &SlideContent) -> Self {
        let shapes = layout
            .placeholders
            .iter()
            .filter_map(|placeholder| {
                let paragraphs = match placeholder.kind {
                    PlaceholderKind::Title => paragraphs(content, "title"),
                    PlaceholderKind::Subtitle => paragraphs(content, "subtitle"),
                    PlaceholderKind::Body => paragraphs(content, "content"),
                    PlaceholderKind::Picture | PlaceholderKind::Table | PlaceholderKind::Chart => {
                        Vec::new()
                    }
                    PlaceholderKind::Unknown => return None,
                };
                Some(PlaceholderFill { placeholder: placeholder.clone(), paragraphs })
            })
            .collect();

        let notes = Some(content.notes.trim())
            .filter(|notes| !notes.is_empty())
            .map(str::to_string);

        Self { layout_index: layout.index, shapes, notes }
    }

    /// All text on the slide, in shape order.
    pub fn text(&self) -> Vec<&str> {
        self.shapes.iter().flat_map(|s| s.paragraphs.iter().map(String::as_str)).collect()
    }
}

fn paragraphs(content: &SlideContent, field: &str) -> Vec<String> {
    match content.fields.get(field) {
        Some(FieldValue::Text(text)) if !text.trim().is_empty() => vec![text.clone()],
        Some(FieldValue::Bullets(items)) => {
            items.iter().filter(|item| !item.trim().is_empty()).cloned().collect()
        }
        _ => Vec::new(),
    }
}
