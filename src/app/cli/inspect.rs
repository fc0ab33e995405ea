//! Inspect command implementation.

use std::path::{Path, PathBuf};

use crate::domain::AppError;

pub fn run_inspect(template: &Path, output: Option<PathBuf>) -> Result<(), AppError> {
    let outcome = crate::app::api::inspect(template, output.as_deref())?;
    let report = &outcome.report;

    println!("✅ Wrote layout catalog to {}", outcome.output.display());
    println!(
        "  {} layout(s), {} distinct schema(s)",
        report.total_layouts, report.unique_schema_count
    );
    for (category, count) in &report.statistics.by_category {
        println!("  • {}: {}", category, count);
    }
    Ok(())
}
