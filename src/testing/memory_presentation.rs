use std::path::{Path, PathBuf};

use crate::domain::{AppError, LayoutDescriptor, SlideDraft};
use crate::ports::{PresentationDocument, SlideRenderer};

/// In-memory document that keeps appended drafts for inspection.
pub struct MemoryPresentation {
    layouts: Vec<LayoutDescriptor>,
    existing: usize,
    slides: Vec<SlideDraft>,
}

impl MemoryPresentation {
    pub fn new(layouts: Vec<LayoutDescriptor>) -> Self {
        Self { layouts, existing: 0, slides: Vec::new() }
    }

    /// Pretend the template already carries `count` slides.
    pub fn seed_existing_slides(&mut self, count: usize) {
        self.existing = count;
    }

    pub fn slides(&self) -> &[SlideDraft] {
        &self.slides
    }
}

impl PresentationDocument for MemoryPresentation {
    fn layouts(&self) -> &[LayoutDescriptor] {
        &self.layouts
    }

    fn slide_count(&self) -> usize {
        self.existing + self.slides.len()
    }

    fn clear_slides(&mut self) -> Result<usize, AppError> {
        let removed = self.slide_count();
        self.existing = 0;
        self.slides.clear();
        Ok(removed)
    }

    fn append_slide(&mut self, draft: &SlideDraft) -> Result<(), AppError> {
        if draft.layout_index >= self.layouts.len() {
            return Err(AppError::template_error(format!(
                "Layout index {} out of range",
                draft.layout_index
            )));
        }
        self.slides.push(draft.clone());
        Ok(())
    }
}

/// Renderer standing in for a machine without an office suite.
pub struct FailingRenderer;

impl SlideRenderer for FailingRenderer {
    fn render(&self, _deck: &Path, _out_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
        Err(AppError::Render {
            command: "soffice".to_string(),
            details: "not installed".to_string(),
        })
    }
}
