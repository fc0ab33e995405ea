mod fake_completion;
mod memory_presentation;
pub mod pptx_fixture;

pub use fake_completion::FakeCompletionClient;
pub use memory_presentation::{FailingRenderer, MemoryPresentation};
