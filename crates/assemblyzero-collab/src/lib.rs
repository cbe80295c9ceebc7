//! Trait contracts for the operations the workflow runtime consumes but
//! does not implement (spec.md §6): test plan review, test scaffolding,
//! running tests, implementing code, semantic review, and issue filing.
//!
//! Each node calls its collaborator through a trait object, the same shape
//! the reference workspace uses for its interchangeable LLM backends, so the
//! runtime never depends on a concrete provider.

pub mod error;
pub mod process;

#[cfg(feature = "test-utils")]
pub mod fakes;

pub use error::CollabError;
pub use process::ProcessCollaborator;

use async_trait::async_trait;

/// Outcome of submitting an LLD's test plan for review (N1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestPlanVerdict {
    Approved,
    Blocked { details: String },
}

#[async_trait]
pub trait TestPlanReviewer: Send + Sync {
    async fn review(&self, lld_contents: &str) -> Result<TestPlanVerdict, CollabError>;
}

/// Scaffolds executable-but-failing test stubs from an LLD (N2).
#[async_trait]
pub trait TestScaffolder: Send + Sync {
    async fn scaffold(&self, lld_contents: &str) -> Result<Vec<String>, CollabError>;
}

/// Result of executing a set of test files (N2.5, N3, N5, N6).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestRunResult {
    pub all_red: bool,
    pub all_green: bool,
    pub failures: Vec<String>,
}

#[async_trait]
pub trait TestRunner: Send + Sync {
    async fn run(&self, test_files: &[String]) -> Result<TestRunResult, CollabError>;
}

/// Requests an implementation from a coding collaborator (N4).
#[async_trait]
pub trait CodeImplementer: Send + Sync {
    async fn implement(
        &self,
        lld_contents: &str,
        test_files: &[String],
        prior_failures: &[String],
    ) -> Result<Vec<String>, CollabError>;
}

/// Per-requirement verdict from the semantic reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementFinding {
    pub requirement_id: String,
    pub satisfied: bool,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticReviewResult {
    pub findings: Vec<RequirementFinding>,
}

/// Invoked by the orchestrator (not by the gate itself — spec.md §4.6's
/// Policy paragraph), after Layer 1 analysis prepares `ReviewMaterials`.
#[async_trait]
pub trait SemanticReviewer: Send + Sync {
    async fn review(
        &self,
        materials: &assemblyzero_state::ReviewMaterials,
    ) -> Result<SemanticReviewResult, CollabError>;
}

/// Files an issue from a draft; invoked outside the core runtime.
#[async_trait]
pub trait IssueFiler: Send + Sync {
    async fn file(&self, draft: &str) -> Result<String, CollabError>;
}

/// Bundle of collaborators a node needs, threaded through `Node::run`.
pub struct Collaborators {
    pub test_plan_reviewer: std::sync::Arc<dyn TestPlanReviewer>,
    pub test_scaffolder: std::sync::Arc<dyn TestScaffolder>,
    pub test_runner: std::sync::Arc<dyn TestRunner>,
    pub code_implementer: std::sync::Arc<dyn CodeImplementer>,
    pub semantic_reviewer: std::sync::Arc<dyn SemanticReviewer>,
    pub issue_filer: std::sync::Arc<dyn IssueFiler>,
}
