//! Template layout descriptors and placeholder classification.

use serde::{Deserialize, Serialize};

/// Semantic role of a placeholder, resolved once from its OOXML type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    Title,
    Subtitle,
    Body,
    Picture,
    Table,
    Chart,
    Unknown,
}

impl PlaceholderKind {
    /// Classify a `<p:ph type="...">` value. A missing type means `obj`.
    pub fn from_type_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("title") | Some("ctrTitle") => PlaceholderKind::Title,
            Some("subTitle") => PlaceholderKind::Subtitle,
            None | Some("body") | Some("obj") => PlaceholderKind::Body,
            Some("pic") => PlaceholderKind::Picture,
            Some("tbl") => PlaceholderKind::Table,
            Some("chart") => PlaceholderKind::Chart,
            Some(_) => PlaceholderKind::Unknown,
        }
    }

    /// Title and subtitle placeholders both hold a single line of heading text.
    pub fn is_title_family(self) -> bool {
        matches!(self, PlaceholderKind::Title | PlaceholderKind::Subtitle)
    }
}

/// One placeholder on a layout, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderInfo {
    /// Raw `type` attribute, if present.
    pub type_tag: Option<String>,
    /// Raw `idx` attribute, if present.
    pub idx: Option<u32>,
    /// Shape name from `<p:cNvPr name>`.
    pub name: String,
    pub kind: PlaceholderKind,
}

impl PlaceholderInfo {
    pub fn new(type_tag: Option<&str>, idx: Option<u32>, name: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.map(str::to_string),
            idx,
            name: name.into(),
            kind: PlaceholderKind::from_type_tag(type_tag),
        }
    }
}

/// A named slide layout with its placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDescriptor {
    /// Position in master/layout order across the template.
    pub index: usize,
    pub name: String,
    pub placeholders: Vec<PlaceholderInfo>,
}
