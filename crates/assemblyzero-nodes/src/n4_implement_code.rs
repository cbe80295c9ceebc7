//! N4 implement_code: requests an implementation from a coding
//! collaborator, extending `implementation_files`.

use async_trait::async_trait;

use assemblyzero_collab::Collaborators;
use assemblyzero_state::{NodeId, StateUpdate, WorkflowState};

use crate::node::{fatal, Node};

pub struct ImplementCode;

#[async_trait]
impl Node for ImplementCode {
    fn id(&self) -> NodeId {
        NodeId::N4ImplementCode
    }

    async fn run(&self, state: &WorkflowState, collab: &Collaborators) -> StateUpdate {
        let contents = match std::fs::read_to_string(&state.lld_path) {
            Ok(c) => c,
            Err(e) => return fatal(format!("failed to read LLD for implementation: {e}")),
        };

        let prior_failures: Vec<String> = Vec::new();

        match collab
            .code_implementer
            .implement(&contents, &state.test_files, &prior_failures)
            .await
        {
            Ok(new_files) => {
                let mut files = state.implementation_files.clone();
                for f in new_files {
                    if !files.contains(&f) {
                        files.push(f);
                    }
                }
                StateUpdate {
                    implementation_files: Some(files),
                    ..Default::default()
                }
            }
            Err(e) => fatal(format!("CollaboratorTimeout: implementation request failed: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assemblyzero_collab::fakes::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_extends_implementation_files_without_duplicates() {
        let mut state = WorkflowState::new(1, "lld.md", "/repo", false, false, false, 10);
        state.implementation_files = vec!["existing.py".to_string()];

        let dir = tempfile::TempDir::new().unwrap();
        let lld_path = dir.path().join("lld.md");
        std::fs::write(&lld_path, "## 3. Requirements\n\n1. Do it.\n").unwrap();
        state.lld_path = lld_path.to_string_lossy().to_string();

        let collab = Collaborators {
            test_plan_reviewer: Arc::new(AlwaysApprove),
            test_scaffolder: Arc::new(FixedScaffolder { files: vec![] }),
            test_runner: Arc::new(ScriptedTestRunner::new(vec![])),
            code_implementer: Arc::new(FixedImplementer {
                files: vec!["existing.py".to_string(), "new.py".to_string()],
            }),
            semantic_reviewer: Arc::new(AlwaysSatisfied),
            issue_filer: Arc::new(FixedIssueFiler { url: String::new() }),
        };

        let update = ImplementCode.run(&state, &collab).await;
        let files = update.implementation_files.unwrap();
        assert_eq!(files, vec!["existing.py".to_string(), "new.py".to_string()]);
    }
}
