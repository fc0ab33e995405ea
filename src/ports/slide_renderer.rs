//! Slide image export port definition.

use std::path::{Path, PathBuf};

use crate::domain::AppError;

/// Port for turning a saved deck into one image per slide.
pub trait SlideRenderer {
    /// Render `deck` into `out_dir`, returning image paths in slide order.
    fn render(&self, deck: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, AppError>;
}
