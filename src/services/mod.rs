mod openai_client;
pub mod pptx;
mod soffice_renderer;
mod text_input;

pub use openai_client::HttpCompletionClient;
pub use pptx::PptxDeck;
pub use soffice_renderer::SofficeRenderer;
pub use text_input::{decode_text, read_input_text};
