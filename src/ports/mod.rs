mod completion_client;
mod presentation;
mod slide_renderer;

pub use completion_client::{
    ChatMessage, CompletionClient, CompletionRequest, CompletionResponse, ContentPart, ImageUrl,
    MessageContent, Role,
};
pub use presentation::PresentationDocument;
pub use slide_renderer::SlideRenderer;
