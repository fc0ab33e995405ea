//! Shared testing utilities for slidegen CLI tests.

#[path = "../../src/testing/pptx_fixture.rs"]
mod pptx_fixture;

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SAMPLE_INPUT: &str = "# Quarterly Update\n\nRevenue grew 10% while costs stayed flat.\n";

/// Isolated working directory holding a template and an input text.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        fs::write(root.path().join("template.potx"), pptx_fixture::minimal_template())
            .expect("Failed to write template");
        fs::write(root.path().join("input.md"), SAMPLE_INPUT).expect("Failed to write input");
        Self { root }
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Command for the compiled `slidegen` binary, run inside the work directory with a
    /// clean service environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("slidegen").expect("Failed to locate slidegen binary");
        cmd.current_dir(self.work_dir())
            .env_remove("OPENAI_API_KEY")
            .env_remove("SLIDEGEN_API_URL")
            .env_remove("SLIDEGEN_MODEL")
            .env_remove("SLIDEGEN_INSECURE_TLS")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Like [`cli`](Self::cli) but pointed at a mock completion endpoint.
    pub fn cli_with_service(&self, endpoint: &str) -> Command {
        let mut cmd = self.cli();
        cmd.env("OPENAI_API_KEY", "test-key").env("SLIDEGEN_API_URL", endpoint);
        cmd
    }
}

/// A chat-completions response body whose message content is `content`.
#[allow(dead_code)]
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150}
    })
    .to_string()
}
