//! Derive layout schemas from template layouts.

use std::collections::BTreeMap;

use crate::domain::layout::{LayoutDescriptor, PlaceholderKind};

use super::schema::{
    Complexity, FieldMetadata, FieldType, LayoutCategory, LayoutSchema, MAX_BULLET_LENGTH,
    MAX_BULLETS, TITLE_MAX_LENGTH, is_image_field,
};

/// Build the schema for a single layout.
///
/// Placeholders whose kind is [`PlaceholderKind::Unknown`] contribute no field;
/// footers, dates and slide numbers never block generation.
pub fn build_layout_schema(layout: &LayoutDescriptor) -> LayoutSchema {
    let mut fields = FieldSet::default();

    for placeholder in &layout.placeholders {
        match placeholder.kind {
            kind if kind.is_title_family() => {
                let name = if !fields.contains("title") {
                    "title"
                } else if !fields.contains("subtitle") {
                    "subtitle"
                } else {
                    continue;
                };
                let purpose = if name == "title" { "Main slide title" } else { "Secondary title" };
                fields.push_required(
                    name,
                    FieldMetadata {
                        field_type: FieldType::Text,
                        placeholder: kind,
                        max_length: Some(TITLE_MAX_LENGTH),
                        max_bullets: None,
                        max_bullet_length: None,
                        purpose: purpose.to_string(),
                    },
                );
            }
            PlaceholderKind::Body => {
                if !fields.contains("content") {
                    fields.push(
                        "content",
                        FieldMetadata {
                            field_type: FieldType::Bullets,
                            placeholder: PlaceholderKind::Body,
                            max_length: None,
                            max_bullets: Some(MAX_BULLETS),
                            max_bullet_length: Some(MAX_BULLET_LENGTH),
                            purpose: "Main slide content".to_string(),
                        },
                    );
                }
            }
            PlaceholderKind::Picture => {
                let number = fields.names.iter().filter(|f| is_image_field(f)).count() + 1;
                fields.push(
                    &format!("image{number}"),
                    advisory(
                        FieldType::Image,
                        PlaceholderKind::Picture,
                        format!("Image placeholder {number}"),
                    ),
                );
            }
            PlaceholderKind::Table => {
                if !fields.contains("table_data") {
                    fields.push(
                        "table_data",
                        advisory(FieldType::Table, PlaceholderKind::Table, "Tabular data".into()),
                    );
                }
            }
            PlaceholderKind::Chart => {
                if !fields.contains("chart_data") {
                    fields.push(
                        "chart_data",
                        advisory(
                            FieldType::Chart,
                            PlaceholderKind::Chart,
                            "Chart/graph data".into(),
                        ),
                    );
                }
            }
            _ => {}
        }
    }

    let category = categorize(&layout.name, &fields.names);
    let complexity = Complexity::from_field_count(fields.names.len());
    let supports_images = fields.names.iter().any(|f| is_image_field(f));
    let supports_tables = fields.contains("table_data");
    let supports_charts = fields.contains("chart_data");

    LayoutSchema {
        name: layout.name.clone(),
        category,
        fields: fields.names,
        field_metadata: fields.metadata,
        required_fields: fields.required,
        complexity,
        placeholder_count: layout.placeholders.len(),
        supports_images,
        supports_tables,
        supports_charts,
    }
}

/// Assign a category using the first matching rule, in priority order.
pub fn categorize(name: &str, fields: &[String]) -> LayoutCategory {
    let name = name.to_lowercase();
    let has = |field: &str| fields.iter().any(|f| f == field);
    let image_count = fields.iter().filter(|f| is_image_field(f)).count();

    if name.contains("title") && has("subtitle") && !has("content") {
        LayoutCategory::TitleSlide
    } else if name.contains("agenda") || name.contains("toc") {
        LayoutCategory::Agenda
    } else if name.contains("section") || (fields.len() == 1 && has("title")) {
        LayoutCategory::SectionHeader
    } else if has("content") && image_count == 0 {
        LayoutCategory::TextContent
    } else if image_count >= 2 {
        LayoutCategory::ImageFocused
    } else if has("content") && image_count > 0 {
        LayoutCategory::MixedContent
    } else if name.contains("two") || name.contains("comparison") {
        LayoutCategory::Comparison
    } else if fields.is_empty() || name.contains("blank") {
        LayoutCategory::Blank
    } else {
        LayoutCategory::General
    }
}

fn advisory(field_type: FieldType, placeholder: PlaceholderKind, purpose: String) -> FieldMetadata {
    FieldMetadata {
        field_type,
        placeholder,
        max_length: None,
        max_bullets: None,
        max_bullet_length: None,
        purpose,
    }
}

#[derive(Default)]
struct FieldSet {
    names: Vec<String>,
    metadata: BTreeMap<String, FieldMetadata>,
    required: Vec<String>,
}

impl FieldSet {
    fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    fn push(&mut self, name: &str, metadata: FieldMetadata) {
        self.names.push(name.to_string());
        self.metadata.insert(name.to_string(), metadata);
    }

    fn push_required(&mut self, name: &str, metadata: FieldMetadata) {
        self.push(name, metadata);
        self.required.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::PlaceholderInfo;
    use proptest::prelude::*;

    fn layout(name: &str, tags: &[Option<&str>]) -> LayoutDescriptor {
        LayoutDescriptor {
            index: 0,
            name: name.to_string(),
            placeholders: tags
                .iter()
                .enumerate()
                .map(|(i, tag)| PlaceholderInfo::new(*tag, Some(i as u32), format!("ph {i}")))
                .collect(),
        }
    }

    #[test]
    fn title_slide_has_title_and_subtitle() {
        let schema = build_layout_schema(&layout("Title Slide", &[Some("ctrTitle"), Some("subTitle")]));
        assert_eq!(schema.fields, vec!["title", "subtitle"]);
        assert_eq!(schema.required_fields, vec!["title", "subtitle"]);
        assert_eq!(schema.category, LayoutCategory::TitleSlide);
        assert_eq!(schema.complexity, Complexity::Simple);
    }

    #[test]
    fn body_becomes_single_bullets_field() {
        let schema =
            build_layout_schema(&layout("Two Content", &[Some("title"), None, Some("body")]));
        assert_eq!(schema.fields, vec!["title", "content"]);
        let content = schema.metadata("content").unwrap();
        assert_eq!(content.field_type, FieldType::Bullets);
        assert_eq!(content.max_bullets, Some(6));
        assert_eq!(content.max_bullet_length, Some(120));
        assert!(!schema.required_fields.iter().any(|f| f == "content"));
        assert_eq!(schema.category, LayoutCategory::TextContent);
    }

    #[test]
    fn pictures_are_numbered_sequentially() {
        let schema = build_layout_schema(&layout(
            "Gallery",
            &[Some("title"), Some("pic"), Some("pic"), Some("pic")],
        ));
        assert_eq!(schema.fields, vec!["title", "image1", "image2", "image3"]);
        assert_eq!(schema.category, LayoutCategory::ImageFocused);
        assert_eq!(schema.complexity, Complexity::Moderate);
        assert!(schema.supports_images);
    }

    #[test]
    fn unknown_placeholders_are_ignored() {
        let schema = build_layout_schema(&layout(
            "Title Only",
            &[Some("title"), Some("dt"), Some("ftr"), Some("sldNum")],
        ));
        assert_eq!(schema.fields, vec!["title"]);
        assert_eq!(schema.placeholder_count, 4);
        assert_eq!(schema.category, LayoutCategory::SectionHeader);
    }

    #[test]
    fn table_and_chart_fields_appear_once() {
        let schema = build_layout_schema(&layout(
            "Data",
            &[Some("title"), Some("tbl"), Some("tbl"), Some("chart"), Some("chart"), None],
        ));
        assert_eq!(schema.fields, vec!["title", "table_data", "chart_data", "content"]);
        assert!(schema.supports_tables);
        assert!(schema.supports_charts);
    }

    #[test]
    fn category_rules_follow_priority() {
        let f = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        assert_eq!(categorize("Agenda", &f(&["title", "content"])), LayoutCategory::Agenda);
        assert_eq!(categorize("Section Header", &f(&["title", "subtitle"])), LayoutCategory::SectionHeader);
        assert_eq!(categorize("Picture with Caption", &f(&["title", "content", "image1"])), LayoutCategory::MixedContent);
        assert_eq!(categorize("Comparison", &f(&["title", "image1"])), LayoutCategory::Comparison);
        assert_eq!(categorize("Blank", &f(&[])), LayoutCategory::Blank);
        assert_eq!(categorize("Custom", &f(&["title", "image1"])), LayoutCategory::General);
    }

    #[test]
    fn empty_layout_is_blank_and_simple() {
        let schema = build_layout_schema(&layout("Custom Layout", &[]));
        assert!(schema.fields.is_empty());
        assert_eq!(schema.category, LayoutCategory::Blank);
        assert_eq!(schema.complexity, Complexity::Simple);
    }

    fn placeholder_tag() -> impl Strategy<Value = Option<&'static str>> {
        prop::sample::select(vec![
            None,
            Some("title"),
            Some("ctrTitle"),
            Some("subTitle"),
            Some("body"),
            Some("pic"),
            Some("tbl"),
            Some("chart"),
            Some("dt"),
            Some("ftr"),
            Some("sldNum"),
        ])
    }

    proptest! {
        #[test]
        fn schema_fields_are_unique_and_described(
            tags in proptest::collection::vec(placeholder_tag(), 0..10),
        ) {
            let schema = build_layout_schema(&layout("Generated", &tags));
            let mut seen = std::collections::HashSet::new();
            for field in &schema.fields {
                prop_assert!(seen.insert(field.clone()), "duplicate field {}", field);
                prop_assert!(schema.field_metadata.contains_key(field));
            }
            for field in &schema.required_fields {
                prop_assert!(schema.has_field(field));
            }
            prop_assert_eq!(schema.placeholder_count, tags.len());
        }
    }
}
