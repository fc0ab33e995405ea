//! Outline command implementation.

use std::path::{Path, PathBuf};

use crate::app::api::OutlineOptions;
use crate::domain::AppError;

pub fn run_outline(
    config: Option<&Path>,
    template: PathBuf,
    input: PathBuf,
    output: Option<PathBuf>,
    target_slides: Option<usize>,
    schemas: Option<PathBuf>,
) -> Result<(), AppError> {
    let options = OutlineOptions { template, input, output, target_slides, schemas };
    let outcome = crate::app::api::outline(config, &options)?;

    println!("✅ Planned {} slide(s): {}", outcome.outline.len(), outcome.output.display());
    for slide in &outcome.outline.slides {
        println!("  {}. [{}] {}", slide.slide_number, slide.layout_name, slide.purpose);
    }
    super::print_usage(&outcome.usage, outcome.estimated_cost);
    Ok(())
}
