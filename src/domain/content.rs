use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::catalog::{FieldType, LayoutSchema};
use crate::domain::outline::SlideSpec;

/// Value written into one schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bullets(Vec<String>),
    Text(String),
}

impl FieldValue {
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Bullets(items) => items.iter().all(|item| item.trim().is_empty()),
        }
    }
}

/// Generated content for one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideContent {
    pub slide_number: u32,
    pub layout_name: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
    #[serde(default)]
    pub notes: String,
}

impl SlideContent {
    /// Minimal record used when generation fails: a numbered title and the planned content.
    pub fn fallback(spec: &SlideSpec) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), FieldValue::Text(format!("Slide {}", spec.slide_number)));
        fields.insert("content".to_string(), FieldValue::Bullets(spec.key_content.clone()));
        Self {
            slide_number: spec.slide_number,
            layout_name: spec.layout_name.clone(),
            fields,
            notes: spec.notes.clone(),
        }
    }

    /// Build a record from a model reply object, keeping only schema fields.
    ///
    /// Values of the wrong shape are coerced: a string for a bullets field becomes
    /// one bullet, an array for a text field is joined by newlines.
    pub fn from_reply(
        spec: &SlideSpec,
        schema: &LayoutSchema,
        reply: &serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        let mut fields = BTreeMap::new();
        for field in &schema.fields {
            let Some(value) = reply.get(field) else { continue };
            let bullets = schema
                .metadata(field)
                .is_some_and(|meta| meta.field_type == FieldType::Bullets);
            if let Some(value) = coerce(value, bullets) {
                fields.insert(field.clone(), value);
            }
        }
        let notes = reply
            .get("notes")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .unwrap_or_default();

        Self {
            slide_number: spec.slide_number,
            layout_name: spec.layout_name.clone(),
            fields,
            notes,
        }
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.fields.get(field)? {
            FieldValue::Text(text) => Some(text),
            FieldValue::Bullets(_) => None,
        }
    }

    pub fn bullets(&self, field: &str) -> Option<&[String]> {
        match self.fields.get(field)? {
            FieldValue::Bullets(items) => Some(items),
            FieldValue::Text(_) => None,
        }
    }

    /// Required schema fields that are absent or blank.
    pub fn missing_required(&self, schema: &LayoutSchema) -> Vec<String> {
        schema
            .required_fields
            .iter()
            .filter(|field| self.fields.get(*field).is_none_or(FieldValue::is_blank))
            .cloned()
            .collect()
    }
}

fn coerce(value: &serde_json::Value, bullets: bool) -> Option<FieldValue> {
    use serde_json::Value;

    match (value, bullets) {
        (Value::Array(items), true) => Some(FieldValue::Bullets(
            items.iter().filter_map(Value::as_str).map(str::to_string).collect(),
        )),
        (Value::String(text), true) => Some(FieldValue::Bullets(vec![text.clone()])),
        (Value::String(text), false) => Some(FieldValue::Text(text.clone())),
        (Value::Array(items), false) => Some(FieldValue::Text(
            items.iter().filter_map(Value::as_str).collect::<Vec<_>>().join("\n"),
        )),
        _ => None,
    }
}
