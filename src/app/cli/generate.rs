//! Generate command implementation.

use std::path::{Path, PathBuf};

use crate::app::api::GenerateOptions;
use crate::domain::AppError;

pub fn run_generate(
    config: Option<&Path>,
    template: PathBuf,
    input: PathBuf,
    output: Option<PathBuf>,
    target_slides: Option<usize>,
    review: bool,
    schemas: Option<PathBuf>,
) -> Result<(), AppError> {
    let options = GenerateOptions { template, input, output, target_slides, review, schemas };
    let outcome = crate::app::api::generate(config, &options)?;

    println!(
        "✅ Generated {} slide(s): {}",
        outcome.slide_count,
        outcome.output.display()
    );
    println!("  Outline: {}", outcome.outline_path.display());
    if let Some((review, path)) = &outcome.review {
        println!("{}", review.summary());
        println!("  Review: {}", path.display());
    }
    super::print_usage(&outcome.usage, outcome.estimated_cost);
    Ok(())
}
