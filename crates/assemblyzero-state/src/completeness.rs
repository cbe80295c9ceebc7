//! Types produced by the Completeness Gate (N4b) and carried in state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueCategory {
    DeadCliFlag,
    EmptyBranch,
    DocstringOnly,
    TrivialAssertion,
    UnusedImport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessIssue {
    pub category: IssueCategory,
    pub file_path: String,
    pub line_number: u32,
    pub description: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletenessVerdict {
    Pass,
    Warn,
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletenessResult {
    pub verdict: CompletenessVerdict,
    pub issues: Vec<CompletenessIssue>,
    pub ast_analysis_ms: u64,
    pub gemini_review_ms: Option<u64>,
}

impl CompletenessResult {
    /// Invariant 2 (spec.md §3): a BLOCK verdict requires at least one
    /// ERROR-severity issue.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        if self.verdict != CompletenessVerdict::Block {
            return true;
        }
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewMaterials {
    pub lld_requirements: Vec<(String, String)>,
    pub code_snippets: Vec<(String, String)>,
    pub issue_number: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestPlanStatus {
    Approved,
    Blocked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_without_error_is_invalid() {
        let result = CompletenessResult {
            verdict: CompletenessVerdict::Block,
            issues: vec![CompletenessIssue {
                category: IssueCategory::EmptyBranch,
                file_path: "a.py".to_string(),
                line_number: 1,
                description: "empty branch".to_string(),
                severity: Severity::Warning,
            }],
            ast_analysis_ms: 10,
            gemini_review_ms: None,
        };
        assert!(!result.is_valid());
    }

    #[test]
    fn test_block_with_error_is_valid() {
        let result = CompletenessResult {
            verdict: CompletenessVerdict::Block,
            issues: vec![CompletenessIssue {
                category: IssueCategory::EmptyBranch,
                file_path: "a.py".to_string(),
                line_number: 1,
                description: "empty branch".to_string(),
                severity: Severity::Error,
            }],
            ast_analysis_ms: 10,
            gemini_review_ms: None,
        };
        assert!(result.is_valid());
    }

    #[test]
    fn test_pass_is_always_valid() {
        let result = CompletenessResult {
            verdict: CompletenessVerdict::Pass,
            issues: vec![],
            ast_analysis_ms: 10,
            gemini_review_ms: Some(5),
        };
        assert!(result.is_valid());
    }
}
