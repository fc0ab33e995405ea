//! Presentation document port definition.

use crate::domain::{AppError, LayoutDescriptor, SlideDraft};

/// A presentation that exposes its layouts and accepts new slides.
pub trait PresentationDocument {
    /// Layouts in master order.
    fn layouts(&self) -> &[LayoutDescriptor];

    fn slide_count(&self) -> usize;

    /// Remove every slide currently in the document. Returns how many were removed.
    fn clear_slides(&mut self) -> Result<usize, AppError>;

    /// Append a slide built from `draft` after the existing slides.
    fn append_slide(&mut self, draft: &SlideDraft) -> Result<(), AppError>;
}
