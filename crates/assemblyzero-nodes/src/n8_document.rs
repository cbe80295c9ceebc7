//! N8 document: generates a documentation artifact for the completed
//! workflow (spec.md §4.4). Routing decides whether this node runs at all
//! when `skip_docs` is set; the node itself always documents when invoked.

use async_trait::async_trait;

use assemblyzero_collab::Collaborators;
use assemblyzero_state::{NodeId, StateUpdate, WorkflowState};

use crate::node::Node;

pub struct Document;

fn render_doc(state: &WorkflowState) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Issue {}\n\n", state.issue_number));
    out.push_str(&format!("Source LLD: `{}`\n\n", state.lld_path));
    out.push_str("## Files Touched\n\n");
    for file in &state.implementation_files {
        out.push_str(&format!("- {file}\n"));
    }
    out
}

#[async_trait]
impl Node for Document {
    fn id(&self) -> NodeId {
        NodeId::N8Document
    }

    async fn run(&self, state: &WorkflowState, _collab: &Collaborators) -> StateUpdate {
        if !state.audit_dir.is_empty() {
            let path = camino::Utf8Path::new(&state.audit_dir).join("documentation.md");
            if let Err(e) = assemblyzero_utils::atomic_write::write_file_atomic(&path, &render_doc(state)) {
                tracing::warn!(error = %e, path = %path, "failed to write documentation artifact");
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

    #[tokio::test]
    async fn test_writes_documentation_to_audit_dir() {
        let dir = TempDir::new().unwrap();
        let mut state = WorkflowState::new(9, "lld.md", "/repo", false, false, false, 10);
        state.audit_dir = dir.path().to_string_lossy().to_string();
        state.implementation_files = vec!["lib.py".to_string()];

        let collab = Collaborators {
            test_plan_reviewer: Arc::new(AlwaysApprove),
            test_scaffolder: Arc::new(FixedScaffolder { files: vec![] }),
            test_runner: Arc::new(ScriptedTestRunner::new(vec![])),
            code_implementer: Arc::new(FixedImplementer { files: vec![] }),
            semantic_reviewer: Arc::new(AlwaysSatisfied),
            issue_filer: Arc::new(FixedIssueFiler { url: String::new() }),
        };

        Document.run(&state, &collab).await;

        let doc_path = dir.path().join("documentation.md");
        let contents = std::fs::read_to_string(doc_path).unwrap();
        assert!(contents.contains("lib.py"));
    }
}
