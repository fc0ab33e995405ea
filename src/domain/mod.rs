pub mod catalog;
pub mod configuration;
pub mod content;
pub mod deck;
pub mod error;
pub mod layout;
pub mod layout_match;
pub mod outline;
pub mod prompt;
pub mod review;
pub mod slide_image;
pub mod usage;

pub use catalog::{CatalogReport, LayoutCategory, LayoutSchema, SchemaCatalog};
pub use configuration::{AppConfig, GenerationConfig, LlmConfig, RenderConfig};
pub use content::{FieldValue, SlideContent};
pub use deck::{PlaceholderFill, SlideDraft};
pub use error::AppError;
pub use layout::{LayoutDescriptor, PlaceholderInfo, PlaceholderKind};
pub use outline::{Outline, SlideSpec};
pub use review::{ReviewIssue, ReviewResult, Severity};
pub use usage::{TokenUsage, Usage};
