//! Review command implementation.

use std::path::{Path, PathBuf};

use crate::app::api::ReviewOptions;
use crate::domain::AppError;

pub fn run_review(
    config: Option<&Path>,
    input: PathBuf,
    slides_dir: PathBuf,
    outline: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), AppError> {
    let options = ReviewOptions { input, slides_dir, outline, output };
    let outcome = crate::app::api::review(config, &options)?;

    println!("{}", outcome.review.summary());
    println!("✅ Review saved: {}", outcome.output.display());
    super::print_usage(&outcome.usage, outcome.estimated_cost);
    Ok(())
}
