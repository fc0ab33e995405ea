use serde::{Deserialize, Serialize};

use crate::domain::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Moderate,
    Minor,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Moderate => "moderate",
            Severity::Minor => "minor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewIssue {
    pub slide_numbers: Vec<u32>,
    pub issue: String,
    pub severity: Severity,
    pub recommendation: String,
}

/// Structured critique of a rendered deck. Scores are 0-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub overall_assessment: String,
    pub content_coverage_score: u8,
    pub verbosity_score: u8,
    pub consistency_score: u8,
    pub flow_score: u8,
    pub overall_score: u8,
    pub needs_revision: bool,
    pub critical_issues: Vec<ReviewIssue>,
    pub missing_content: Vec<String>,
    pub strengths: Vec<String>,
    pub improvement_suggestions: Vec<String>,
}

impl ReviewResult {
    pub fn validate(&self) -> Result<(), AppError> {
        let scores = [
            ("content_coverage_score", self.content_coverage_score),
            ("verbosity_score", self.verbosity_score),
            ("consistency_score", self.consistency_score),
            ("flow_score", self.flow_score),
            ("overall_score", self.overall_score),
        ];
        for (name, score) in scores {
            if score > 100 {
                return Err(AppError::parse_error(
                    "review",
                    format!("{name} must be between 0 and 100, got {score}"),
                ));
            }
        }
        Ok(())
    }

    /// Human-readable summary printed after a review.
    pub fn summary(&self) -> String {
        let rule = "=".repeat(70);
        let mut out = format!("{rule}\nREVIEW RESULTS\n{rule}\n\n");
        out.push_str(&format!("Overall Score: {}/100\n", self.overall_score));
        out.push_str(&format!("Content Coverage: {}/100\n", self.content_coverage_score));
        out.push_str(&format!("Verbosity: {}/100\n", self.verbosity_score));
        out.push_str(&format!("Consistency: {}/100\n", self.consistency_score));
        out.push_str(&format!("Flow: {}/100\n", self.flow_score));
        out.push_str(&format!(
            "\nNeeds Revision: {}\n",
            if self.needs_revision { "YES" } else { "NO" }
        ));

        if !self.critical_issues.is_empty() {
            out.push_str(&format!("\nCritical Issues ({}):\n", self.critical_issues.len()));
            for issue in &self.critical_issues {
                let slides: Vec<String> = issue.slide_numbers.iter().map(u32::to_string).collect();
                out.push_str(&format!(
                    "  [{}] Slides {}: {}\n    -> {}\n",
                    issue.severity.as_str().to_uppercase(),
                    slides.join(", "),
                    issue.issue,
                    issue.recommendation
                ));
            }
        }

        if !self.missing_content.is_empty() {
            out.push_str(&format!("\nMissing Content ({} items):\n", self.missing_content.len()));
            for item in self.missing_content.iter().take(5) {
                out.push_str(&format!("  - {item}\n"));
            }
            if self.missing_content.len() > 5 {
                out.push_str(&format!("  ... and {} more\n", self.missing_content.len() - 5));
            }
        }

        if !self.strengths.is_empty() {
            out.push_str("\nStrengths:\n");
            for strength in self.strengths.iter().take(3) {
                out.push_str(&format!("  + {strength}\n"));
            }
        }

        out.push_str(&format!("\n{}\n{rule}", self.overall_assessment));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReviewResult {
        ReviewResult {
            overall_assessment: "Solid deck".to_string(),
            content_coverage_score: 80,
            verbosity_score: 70,
            consistency_score: 90,
            flow_score: 85,
            overall_score: 81,
            needs_revision: true,
            critical_issues: vec![ReviewIssue {
                slide_numbers: vec![2, 3],
                issue: "Too sparse".to_string(),
                severity: Severity::Moderate,
                recommendation: "Add detail".to_string(),
            }],
            missing_content: (1..=7).map(|i| format!("point {i}")).collect(),
            strengths: vec!["Clear".to_string()],
            improvement_suggestions: vec![],
        }
    }

    #[test]
    fn summary_lists_issues_and_truncates_missing_content() {
        let summary = sample().summary();
        assert!(summary.contains("Overall Score: 81/100"));
        assert!(summary.contains("[MODERATE] Slides 2, 3: Too sparse"));
        assert!(summary.contains("point 5"));
        assert!(!summary.contains("point 6"));
        assert!(summary.contains("... and 2 more"));
        assert!(summary.contains("Needs Revision: YES"));
    }

    #[test]
    fn score_above_hundred_is_rejected() {
        let mut review = sample();
        review.flow_score = 101;
        assert!(review.validate().is_err());
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn severity_parses_lowercase() {
        let issue: ReviewIssue = serde_json::from_str(
            r#"{"slide_numbers":[1],"issue":"i","severity":"critical","recommendation":"r"}"#,
        )
        .unwrap();
        assert_eq!(issue.severity, Severity::Critical);
    }
}
