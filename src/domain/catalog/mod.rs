//! Layout schema catalog: what each template layout can hold.

mod builder;
mod report;
mod schema;

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::layout::LayoutDescriptor;

pub use builder::{build_layout_schema, categorize};
pub use report::{CatalogReport, CatalogStatistics, template_digest};
pub use schema::{
    Complexity, FieldMetadata, FieldType, LayoutCategory, LayoutSchema, MAX_BULLET_LENGTH,
    MAX_BULLETS, TITLE_MAX_LENGTH,
};

/// Immutable layout name → schema mapping, in template order.
///
/// Serializes as a JSON object keyed by layout name; keys keep template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaCatalog {
    schemas: Vec<LayoutSchema>,
}

impl SchemaCatalog {
    /// Build the catalog from introspected layouts.
    pub fn build(layouts: &[LayoutDescriptor]) -> Self {
        Self::from_schemas(layouts.iter().map(build_layout_schema))
    }

    /// Collect schemas, keeping the first schema seen for a duplicated name.
    pub fn from_schemas(schemas: impl IntoIterator<Item = LayoutSchema>) -> Self {
        let mut kept: Vec<LayoutSchema> = Vec::new();
        for schema in schemas {
            if kept.iter().any(|existing| existing.name == schema.name) {
                tracing::debug!(layout = %schema.name, "Duplicate layout name; keeping first");
                continue;
            }
            kept.push(schema);
        }
        Self { schemas: kept }
    }

    pub fn get(&self, name: &str) -> Option<&LayoutSchema> {
        self.schemas.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayoutSchema> {
        self.schemas.iter()
    }

    /// Layout names in template order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Schemas grouped by category; each group keeps template order.
    pub fn by_category(&self) -> BTreeMap<LayoutCategory, Vec<&LayoutSchema>> {
        let mut groups: BTreeMap<LayoutCategory, Vec<&LayoutSchema>> = BTreeMap::new();
        for schema in &self.schemas {
            groups.entry(schema.category).or_default().push(schema);
        }
        groups
    }
}

impl Serialize for SchemaCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.schemas.len()))?;
        for schema in &self.schemas {
            map.serialize_entry(&schema.name, schema)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SchemaCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = SchemaCatalog;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of layout name to layout schema")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut schemas = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, mut schema)) = access.next_entry::<String, LayoutSchema>()? {
            // The key is authoritative when it disagrees with the embedded name.
            schema.name = name;
            schemas.push(schema);
        }
        Ok(SchemaCatalog::from_schemas(schemas))
    }
}
