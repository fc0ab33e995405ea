//! Strict JSON schemas for model replies.

use serde_json::{Map, Value, json};

use crate::domain::catalog::{FieldType, LayoutSchema};

use super::ResponseSchema;

pub const OUTLINE_SCHEMA_NAME: &str = "presentation_outline";
pub const CONTENT_SCHEMA_NAME: &str = "slide_content";
pub const REVIEW_SCHEMA_NAME: &str = "presentation_review";

pub fn outline_schema() -> ResponseSchema {
    ResponseSchema {
        name: OUTLINE_SCHEMA_NAME.to_string(),
        schema: json!({
            "type": "object",
            "properties": {
                "presentation_summary": {
                    "type": "string",
                    "description": "Brief overview of the presentation's narrative and structure"
                },
                "slides": {
                    "type": "array",
                    "description": "Slide plan specifications in presentation order",
                    "items": {
                        "type": "object",
                        "properties": {
                            "slide_number": {
                                "type": "integer",
                                "description": "Sequential slide number starting from 1"
                            },
                            "layout_name": {
                                "type": "string",
                                "description": "Exact layout name from the available layouts"
                            },
                            "purpose": {
                                "type": "string",
                                "description": "What this slide accomplishes"
                            },
                            "key_content": {
                                "type": "array",
                                "description": "Key points or themes to cover on this slide",
                                "items": { "type": "string" }
                            },
                            "notes": {
                                "type": "string",
                                "description": "Design rationale or presenter notes"
                            }
                        },
                        "required": ["slide_number", "layout_name", "purpose", "key_content", "notes"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["presentation_summary", "slides"],
            "additionalProperties": false
        }),
    }
}

/// Schema for one slide's content, derived from the layout's fields.
///
/// Every property is required; strict structured output rejects optional keys.
pub fn content_schema(layout: &LayoutSchema) -> ResponseSchema {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in &layout.fields {
        let Some(meta) = layout.metadata(field) else { continue };
        let property = match meta.field_type {
            FieldType::Bullets => json!({
                "type": "array",
                "description": meta.purpose,
                "items": { "type": "string" },
                "minItems": 1
            }),
            FieldType::Text => {
                let mut text = json!({ "type": "string", "description": meta.purpose });
                if let Some(max) = meta.max_length {
                    text["maxLength"] = json!(max);
                }
                text
            }
            FieldType::Image => json!({
                "type": "string",
                "description": format!("Description of image content for {field}")
            }),
            FieldType::Table => json!({ "type": "string", "description": "Table data description" }),
            FieldType::Chart => json!({ "type": "string", "description": "Chart data description" }),
        };
        properties.insert(field.clone(), property);
        required.push(Value::String(field.clone()));
    }

    properties.insert(
        "notes".to_string(),
        json!({ "type": "string", "description": "Presenter notes or additional context" }),
    );
    required.push(Value::String("notes".to_string()));

    ResponseSchema {
        name: CONTENT_SCHEMA_NAME.to_string(),
        schema: json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false
        }),
    }
}

pub fn review_schema() -> ResponseSchema {
    let score = |description: &str| {
        json!({ "type": "integer", "description": description, "minimum": 0, "maximum": 100 })
    };
    let strings = |description: &str| {
        json!({ "type": "array", "description": description, "items": { "type": "string" } })
    };

    ResponseSchema {
        name: REVIEW_SCHEMA_NAME.to_string(),
        schema: json!({
            "type": "object",
            "properties": {
                "overall_assessment": {
                    "type": "string",
                    "description": "High-level summary of presentation quality"
                },
                "content_coverage_score": score("Score 0-100 for how well all input content is covered"),
                "verbosity_score": score("Score 0-100 for content detail and utilization"),
                "consistency_score": score("Score 0-100 for visual consistency"),
                "flow_score": score("Score 0-100 for logical flow and progression"),
                "overall_score": score("Overall quality score 0-100"),
                "needs_revision": {
                    "type": "boolean",
                    "description": "Whether the presentation needs revisions"
                },
                "critical_issues": {
                    "type": "array",
                    "description": "Issues that must be fixed",
                    "items": {
                        "type": "object",
                        "properties": {
                            "slide_numbers": {
                                "type": "array",
                                "description": "Affected slide numbers",
                                "items": { "type": "integer" }
                            },
                            "issue": { "type": "string", "description": "Description of the issue" },
                            "severity": {
                                "type": "string",
                                "enum": ["critical", "moderate", "minor"],
                                "description": "Issue severity"
                            },
                            "recommendation": { "type": "string", "description": "How to fix this issue" }
                        },
                        "required": ["slide_numbers", "issue", "severity", "recommendation"],
                        "additionalProperties": false
                    }
                },
                "missing_content": strings("Content from the input that is missing in the presentation"),
                "strengths": strings("What the presentation does well"),
                "improvement_suggestions": strings("Optional improvements that are not critical")
            },
            "required": [
                "overall_assessment",
                "content_coverage_score",
                "verbosity_score",
                "consistency_score",
                "flow_score",
                "overall_score",
                "needs_revision",
                "critical_issues",
                "missing_content",
                "strengths",
                "improvement_suggestions"
            ],
            "additionalProperties": false
        }),
    }
}
