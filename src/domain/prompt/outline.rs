use serde::Serialize;

use crate::domain::AppError;
use crate::domain::catalog::SchemaCatalog;

use super::{Prompt, render_template, schemas};

const SYSTEM: &str = "You are an expert presentation designer with extensive experience creating \
professional PowerPoint presentations. You understand visual design, content organization, and \
audience engagement. You always ensure comprehensive content coverage and logical flow.";

#[derive(Serialize)]
struct OutlineContext<'a> {
    content: &'a str,
    categories: Vec<CategoryEntry<'a>>,
    target_slides: Option<usize>,
}

#[derive(Serialize)]
struct CategoryEntry<'a> {
    label: String,
    layouts: Vec<LayoutEntry<'a>>,
    remaining: usize,
}

#[derive(Serialize)]
struct LayoutEntry<'a> {
    name: &'a str,
    supports_images: bool,
}

/// Build the outline request: the source text plus the catalog's layouts grouped by category.
pub fn outline_prompt(
    content: &str,
    catalog: &SchemaCatalog,
    target_slides: Option<usize>,
    layouts_per_category: usize,
) -> Result<Prompt, AppError> {
    let mut groups: Vec<_> = catalog.by_category().into_iter().collect();
    groups.sort_by_key(|(category, _)| category.as_str());

    let categories = groups
        .into_iter()
        .map(|(category, layouts)| CategoryEntry {
            label: category.label(),
            remaining: layouts.len().saturating_sub(layouts_per_category),
            layouts: layouts
                .into_iter()
                .take(layouts_per_category)
                .map(|schema| LayoutEntry {
                    name: &schema.name,
                    supports_images: schema.supports_images,
                })
                .collect(),
        })
        .collect();

    let user = render_template(
        "outline.j2",
        OutlineContext { content, categories, target_slides },
    )?;

    Ok(Prompt { system: SYSTEM.to_string(), user, schema: schemas::outline_schema() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::{LayoutDescriptor, PlaceholderInfo};

    fn catalog(count: usize) -> SchemaCatalog {
        let mut layouts = vec![LayoutDescriptor {
            index: 0,
            name: "Picture Pair".to_string(),
            placeholders: vec![
                PlaceholderInfo::new(Some("pic"), None, "p1"),
                PlaceholderInfo::new(Some("pic"), None, "p2"),
            ],
        }];
        for i in 0..count {
            layouts.push(LayoutDescriptor {
                index: i + 1,
                name: format!("{i}_Title and Content"),
                placeholders: vec![
                    PlaceholderInfo::new(Some("title"), None, "t"),
                    PlaceholderInfo::new(Some("body"), None, "b"),
                ],
            });
        }
        SchemaCatalog::build(&layouts)
    }

    #[test]
    fn lists_categories_sorted_with_overflow_line() {
        let prompt = outline_prompt("Quarterly results", &catalog(7), Some(8), 5).unwrap();
        let user = &prompt.user;

        assert!(user.contains("CONTENT TO ORGANIZE:\nQuarterly results"));
        let image_pos = user.find("IMAGE FOCUSED:").unwrap();
        let text_pos = user.find("TEXT CONTENT:").unwrap();
        assert!(image_pos < text_pos);
        assert!(user.contains("  - Picture Pair (supports images)\n"));
        assert!(user.contains("  - 4_Title and Content\n"));
        assert!(!user.contains("5_Title and Content"));
        assert!(user.contains("  ... and 2 more"));
        assert!(user.contains("Target approximately 8 slides."));
        assert_eq!(prompt.schema.name, "presentation_outline");
    }

    #[test]
    fn omits_target_line_without_slide_count() {
        let prompt = outline_prompt("text", &catalog(1), None, 5).unwrap();
        assert!(!prompt.user.contains("Target approximately"));
        assert!(!prompt.user.contains("more"));
    }
}
