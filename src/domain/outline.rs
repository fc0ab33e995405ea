use serde::{Deserialize, Serialize};

/// One planned slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSpec {
    pub slide_number: u32,
    pub layout_name: String,
    pub purpose: String,
    pub key_content: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

/// Planned deck, as returned by the outline stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Outline {
    #[serde(default)]
    pub presentation_summary: String,
    pub slides: Vec<SlideSpec>,
}

impl Outline {
    /// Number slides 1..=N in their current order.
    pub fn renumber(&mut self) {
        for (position, slide) in self.slides.iter_mut().enumerate() {
            slide.slide_number = position as u32 + 1;
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}
