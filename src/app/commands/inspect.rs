//! Template introspection: layouts → schema catalog report.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::catalog::template_digest;
use crate::domain::{AppError, CatalogReport, LayoutDescriptor, SchemaCatalog};
use crate::ports::PresentationDocument;
use crate::services::PptxDeck;

pub const DEFAULT_REPORT_PATH: &str = "config/template_schemas.json";

/// A template opened for generation, with the digest of its bytes.
pub struct LoadedTemplate {
    pub deck: PptxDeck,
    pub digest: String,
}

impl LoadedTemplate {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let bytes = fs::read(path).map_err(|e| {
            AppError::template_error(format!("Cannot read template {}: {e}", path.display()))
        })?;
        let deck = PptxDeck::from_bytes(&bytes)?;
        Ok(Self { deck, digest: template_digest(&bytes) })
    }

    pub fn layouts(&self) -> &[LayoutDescriptor] {
        self.deck.layouts()
    }
}

#[derive(Debug)]
pub struct InspectOutcome {
    pub report: CatalogReport,
    pub output: PathBuf,
}

pub fn execute(template: &Path, output: Option<&Path>) -> Result<InspectOutcome, AppError> {
    let loaded = LoadedTemplate::open(template)?;
    let catalog = SchemaCatalog::build(loaded.layouts());
    let report = CatalogReport::new(template.display().to_string(), loaded.digest, catalog);

    let output = output.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH));
    write_json(&output, &report)?;
    Ok(InspectOutcome { report, output })
}

/// The catalog for a run: from a saved report when given, otherwise built from the template.
pub fn load_catalog(
    template: &LoadedTemplate,
    schemas: Option<&Path>,
) -> Result<SchemaCatalog, AppError> {
    let Some(path) = schemas else {
        return Ok(SchemaCatalog::build(template.layouts()));
    };

    let content = fs::read_to_string(path)?;
    let report: CatalogReport = serde_json::from_str(&content)
        .map_err(|e| AppError::parse_error(format!("schema report {}", path.display()), e))?;
    if !report.matches_digest(&template.digest) {
        tracing::warn!(
            schemas = %path.display(),
            "Saved schemas were built from a different template; using them anyway"
        );
    }
    Ok(report.schemas)
}

/// Pretty JSON to `path`, creating parent directories.
pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
