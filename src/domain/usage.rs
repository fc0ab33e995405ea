use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

pub const DEFAULT_COST_PER_MILLION_TOKENS: f64 = 10.0;

/// Token counts reported by the completion service for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// Running totals across every completion call in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    pub calls: u32,
}

impl Usage {
    pub fn record(&mut self, tokens: TokenUsage) {
        self.prompt_tokens += tokens.prompt_tokens;
        self.completion_tokens += tokens.completion_tokens;
        self.total_tokens += tokens.total_tokens;
        self.calls += 1;
    }

    /// Flat-rate cost estimate in dollars.
    pub fn estimated_cost(&self, cost_per_million_tokens: f64) -> f64 {
        self.total_tokens as f64 / 1_000_000.0 * cost_per_million_tokens
    }
}

impl AddAssign for Usage {
    fn add_assign(&mut self, other: Self) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
        self.calls += other.calls;
    }
}
