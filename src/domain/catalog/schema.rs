//! Layout schema model.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::layout::PlaceholderKind;

pub const TITLE_MAX_LENGTH: u32 = 80;
pub const MAX_BULLETS: u32 = 6;
pub const MAX_BULLET_LENGTH: u32 = 120;

/// Purpose a layout serves in a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutCategory {
    TitleSlide,
    Agenda,
    SectionHeader,
    TextContent,
    ImageFocused,
    MixedContent,
    Comparison,
    Blank,
    General,
}

impl LayoutCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutCategory::TitleSlide => "title_slide",
            LayoutCategory::Agenda => "agenda",
            LayoutCategory::SectionHeader => "section_header",
            LayoutCategory::TextContent => "text_content",
            LayoutCategory::ImageFocused => "image_focused",
            LayoutCategory::MixedContent => "mixed_content",
            LayoutCategory::Comparison => "comparison",
            LayoutCategory::Blank => "blank",
            LayoutCategory::General => "general",
        }
    }

    /// Upper-case heading used in prompts and console summaries.
    pub fn label(self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl fmt::Display for LayoutCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub fn from_field_count(count: usize) -> Self {
        match count {
            0..=2 => Complexity::Simple,
            3..=4 => Complexity::Moderate,
            _ => Complexity::Complex,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Bullets,
    Image,
    Table,
    Chart,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Bullets => "bullets",
            FieldType::Image => "image",
            FieldType::Table => "table",
            FieldType::Chart => "chart",
        }
    }
}

/// Constraints and intent for one schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMetadata {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub placeholder: PlaceholderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bullets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_bullet_length: Option<u32>,
    pub purpose: String,
}

/// Fields a layout supports, derived from its placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSchema {
    pub name: String,
    pub category: LayoutCategory,
    pub fields: Vec<String>,
    pub field_metadata: BTreeMap<String, FieldMetadata>,
    pub required_fields: Vec<String>,
    pub complexity: Complexity,
    pub placeholder_count: usize,
    pub supports_images: bool,
    pub supports_tables: bool,
    pub supports_charts: bool,
}

impl LayoutSchema {
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    pub fn metadata(&self, field: &str) -> Option<&FieldMetadata> {
        self.field_metadata.get(field)
    }

    /// Title and divider layouts carry at most one field.
    pub fn is_divider(&self) -> bool {
        self.fields.len() <= 1
    }
}

pub(crate) fn is_image_field(field: &str) -> bool {
    field.starts_with("image")
}
