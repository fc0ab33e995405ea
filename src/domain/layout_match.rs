//! Fuzzy resolution of model-proposed layout names against the catalog.

/// Matching strategies tried in order; the first candidate hit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// Case-insensitive containment in either direction.
    Substring,
    /// At least half (rounded up) of the target's words appear in the candidate.
    TokenOverlap,
}

pub const STRATEGIES: [MatchStrategy; 2] = [MatchStrategy::Substring, MatchStrategy::TokenOverlap];

impl MatchStrategy {
    fn matches(self, target: &str, candidate: &str) -> bool {
        match self {
            MatchStrategy::Substring => candidate.contains(target) || target.contains(candidate),
            MatchStrategy::TokenOverlap => {
                let tokens: Vec<&str> = target.split_whitespace().collect();
                if tokens.is_empty() {
                    return false;
                }
                let needed = tokens.len().div_ceil(2).max(1);
                tokens.iter().filter(|t| candidate.contains(*t)).count() >= needed
            }
        }
    }
}

/// Resolve `target` to one of `candidates`, or `None` when nothing is close.
///
/// Candidates are examined in the order given.
pub fn resolve<'a>(target: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let target = target.trim().to_lowercase();
    if target.is_empty() {
        return None;
    }
    let lowered: Vec<String> = candidates.iter().map(|c| c.to_lowercase()).collect();

    STRATEGIES.iter().find_map(|strategy| {
        lowered
            .iter()
            .zip(candidates)
            .find(|(candidate, _)| !candidate.is_empty() && strategy.matches(&target, candidate))
            .map(|(_, original)| *original)
    })
}
