use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::SchemaCatalog;

/// Serialized form of a catalog, as written by `inspect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogReport {
    pub template_path: String,
    pub template_sha256: String,
    pub total_layouts: usize,
    pub schemas: SchemaCatalog,
    /// Layout names sharing the same (sorted fields, category) signature.
    pub schema_groups: BTreeMap<String, Vec<String>>,
    pub unique_schema_count: usize,
    pub statistics: CatalogStatistics,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStatistics {
    pub by_category: BTreeMap<String, usize>,
    pub with_images: usize,
    pub with_charts: usize,
    pub with_tables: usize,
    pub complexity_distribution: BTreeMap<String, usize>,
}

impl CatalogReport {
    pub fn new(template_path: impl Into<String>, template_sha256: String, catalog: SchemaCatalog) -> Self {
        let mut schema_groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut statistics = CatalogStatistics::default();

        for schema in catalog.iter() {
            let mut fields: Vec<&str> = schema.fields.iter().map(String::as_str).collect();
            fields.sort_unstable();
            let signature = format!("{}|{}", fields.join(","), schema.category);
            schema_groups.entry(signature).or_default().push(schema.name.clone());

            *statistics.by_category.entry(schema.category.to_string()).or_default() += 1;
            *statistics
                .complexity_distribution
                .entry(schema.complexity.as_str().to_string())
                .or_default() += 1;
            statistics.with_images += usize::from(schema.supports_images);
            statistics.with_charts += usize::from(schema.supports_charts);
            statistics.with_tables += usize::from(schema.supports_tables);
        }

        Self {
            template_path: template_path.into(),
            template_sha256,
            total_layouts: catalog.len(),
            unique_schema_count: schema_groups.len(),
            schemas: catalog,
            schema_groups,
            statistics,
        }
    }

    /// Whether this report was produced from a template with the given digest.
    pub fn matches_digest(&self, digest: &str) -> bool {
        self.template_sha256.eq_ignore_ascii_case(digest)
    }
}

/// Hex-encoded SHA-256 of the template bytes.
pub fn template_digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
