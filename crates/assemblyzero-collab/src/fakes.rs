//! Deterministic in-memory collaborators for tests. Gated behind
//! `test-utils` so the production binary never links them.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::{
    CodeImplementer, CollabError, IssueFiler, RequirementFinding, SemanticReviewResult,
    SemanticReviewer, TestPlanReviewer, TestPlanVerdict, TestRunResult, TestRunner, TestScaffolder,
};

/// Always approves the test plan.
pub struct AlwaysApprove;

#[async_trait]
impl TestPlanReviewer for AlwaysApprove {
    async fn review(&self, _lld_contents: &str) -> Result<TestPlanVerdict, CollabError> {
        Ok(TestPlanVerdict::Approved)
    }
}

/// Always blocks the test plan with a fixed explanation.
pub struct AlwaysBlock {
    pub details: String,
}

#[async_trait]
impl TestPlanReviewer for AlwaysBlock {
    async fn review(&self, _lld_contents: &str) -> Result<TestPlanVerdict, CollabError> {
        Ok(TestPlanVerdict::Blocked {
            details: self.details.clone(),
        })
    }
}

/// Returns a fixed list of test files regardless of input.
pub struct FixedScaffolder {
    pub files: Vec<String>,
}

#[async_trait]
impl TestScaffolder for FixedScaffolder {
    async fn scaffold(&self, _lld_contents: &str) -> Result<Vec<String>, CollabError> {
        Ok(self.files.clone())
    }
}

/// Returns a scripted sequence of results, one per call, repeating the last
/// entry once exhausted.
pub struct ScriptedTestRunner {
    results: Mutex<Vec<TestRunResult>>,
    cursor: Mutex<usize>,
}

impl ScriptedTestRunner {
    #[must_use]
    pub fn new(results: Vec<TestRunResult>) -> Self {
        Self {
            results: Mutex::new(results),
            cursor: Mutex::new(0),
        }
    }
}

#[async_trait]
impl TestRunner for ScriptedTestRunner {
    async fn run(&self, _test_files: &[String]) -> Result<TestRunResult, CollabError> {
        let results = self.results.lock().unwrap();
        let mut cursor = self.cursor.lock().unwrap();
        let idx = (*cursor).min(results.len().saturating_sub(1));
        *cursor += 1;
        results
            .get(idx)
            .cloned()
            .ok_or_else(|| CollabError::Failed(anyhow::anyhow!("no scripted test result")))
    }
}

/// Returns a fixed list of implementation files regardless of input.
pub struct FixedImplementer {
    pub files: Vec<String>,
}

#[async_trait]
impl CodeImplementer for FixedImplementer {
    async fn implement(
        &self,
        _lld_contents: &str,
        _test_files: &[String],
        _prior_failures: &[String],
    ) -> Result<Vec<String>, CollabError> {
        Ok(self.files.clone())
    }
}

/// Marks every requirement satisfied.
pub struct AlwaysSatisfied;

#[async_trait]
impl SemanticReviewer for AlwaysSatisfied {
    async fn review(
        &self,
        materials: &assemblyzero_state::ReviewMaterials,
    ) -> Result<SemanticReviewResult, CollabError> {
        let findings = materials
            .lld_requirements
            .iter()
            .map(|(id, _)| RequirementFinding {
                requirement_id: id.clone(),
                satisfied: true,
                notes: String::new(),
            })
            .collect();
        Ok(SemanticReviewResult { findings })
    }
}

/// Returns a fixed URL regardless of the draft.
pub struct FixedIssueFiler {
    pub url: String,
}

#[async_trait]
impl IssueFiler for FixedIssueFiler {
    async fn file(&self, _draft: &str) -> Result<String, CollabError> {
        Ok(self.url.clone())
    }
}
