//! N7 finalize: emits a summary artifact for the completed workflow run
//! (spec.md §4.4). The summary's rendering and audience are out of this
//! specification's scope (spec.md §1); this node writes a terse markdown
//! record to the issue's audit directory, grounded on the gate's own
//! report-writing shape.

use async_trait::async_trait;

use assemblyzero_collab::Collaborators;
use assemblyzero_state::{NodeId, StateUpdate, WorkflowState};

use crate::node::Node;

pub struct Finalize;

fn render_summary(state: &WorkflowState) -> String {
    let verdict = state
        .completeness_verdict
        .map(|v| format!("{v:?}"))
        .unwrap_or_else(|| "UNKNOWN".to_string());

    let mut out = String::new();
    out.push_str(&format!("# Workflow Summary: Issue {}\n\n", state.issue_number));
    out.push_str(&format!("- LLD: {}\n", state.lld_path));
    out.push_str(&format!("- Implementation files: {}\n", state.implementation_files.len()));
    out.push_str(&format!("- Test files: {}\n", state.test_files.len()));
    out.push_str(&format!("- Implementation iterations: {}\n", state.iteration_count));
    out.push_str(&format!("- Completeness gate iterations: {}\n", state.completeness_iteration_count));
    out.push_str(&format!("- Completeness verdict: {verdict}\n"));
    out
}

#[async_trait]
impl Node for Finalize {
    fn id(&self) -> NodeId {
        NodeId::N7Finalize
    }

    async fn run(&self, state: &WorkflowState, _collab: &Collaborators) -> StateUpdate {
        if !state.audit_dir.is_empty() {
            let path = camino::Utf8Path::new(&state.audit_dir).join("summary.md");
            if let Err(e) = assemblyzero_utils::atomic_write::write_file_atomic(&path, &render_summary(state)) {
                tracing::warn!(error = %e, path = %path, "failed to write workflow summary");
            }
        }

        StateUpdate::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assemblyzero_collab::fakes::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn collaborators() -> Collaborators {
        Collaborators {
            test_plan_reviewer: Arc::new(AlwaysApprove),
            test_scaffolder: Arc::new(FixedScaffolder { files: vec![] }),
            test_runner: Arc::new(ScriptedTestRunner::new(vec![])),
            code_implementer: Arc::new(FixedImplementer { files: vec![] }),
            semantic_reviewer: Arc::new(AlwaysSatisfied),
            issue_filer: Arc::new(FixedIssueFiler { url: String::new() }),
        }
    }

    #[tokio::test]
    async fn test_writes_summary_to_audit_dir() {
        let dir = TempDir::new().unwrap();
        let mut state = WorkflowState::new(3, "lld.md", "/repo", false, false, false, 10);
        state.audit_dir = dir.path().to_string_lossy().to_string();

        Finalize.run(&state, &collaborators()).await;

        let summary_path = dir.path().join("summary.md");
        let contents = std::fs::read_to_string(summary_path).unwrap();
        assert!(contents.contains("Issue 3"));
    }

    #[tokio::test]
    async fn test_no_audit_dir_is_a_no_op() {
        let state = WorkflowState::new(3, "lld.md", "/repo", false, false, false, 10);
        let update = Finalize.run(&state, &collaborators()).await;
        assert!(update.error_message.is_none());
    }
}
