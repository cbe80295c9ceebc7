//! N5 verify_green: executes the full suite against the implementation;
//! all new tests must now pass. Loops back to N4 up to `max_iterations`
//! (spec.md §4.5, §4.3's loop-safety paragraph), otherwise hints forward
//! to N6. `next_node` is one of the two edges the router documents as
//! hint-accepting.

use async_trait::async_trait;

use assemblyzero_collab::Collaborators;
use assemblyzero_state::{NodeId, StateUpdate, WorkflowState};

use crate::node::{fatal, Node};

pub struct VerifyGreen;

#[async_trait]
impl Node for VerifyGreen {
    fn id(&self) -> NodeId {
        NodeId::N5VerifyGreen
    }

    async fn run(&self, state: &WorkflowState, collab: &Collaborators) -> StateUpdate {
        let result = match collab.test_runner.run(&state.test_files).await {
            Ok(r) => r,
            Err(e) => return fatal(format!("failed to execute tests during verify_green: {e}")),
        };

        if result.all_green {
            return StateUpdate {
                next_node: Some(NodeId::N6E2eValidation.as_str().to_string()),
                ..Default::default()
            };
        }

        if state.iteration_count + 1 >= state.max_iterations {
            return fatal(format!(
                "LoopCapExceeded: verify_green did not reach all-green after {} iterations, failures: {:?}",
                state.max_iterations, result.failures
            ));
        }

        StateUpdate {
            next_node: Some(NodeId::N4ImplementCode.as_str().to_string()),
            iteration_count: Some(state.iteration_count + 1),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assemblyzero_collab::{fakes::*, TestRunResult};
    use std::sync::Arc;

    fn collab_with_runner(result: TestRunResult) -> Collaborators {
        Collaborators {
            test_plan_reviewer: Arc::new(AlwaysApprove),
            test_scaffolder: Arc::new(FixedScaffolder { files: vec![] }),
            test_runner: Arc::new(ScriptedTestRunner::new(vec![result])),
            code_implementer: Arc::new(FixedImplementer { files: vec![] }),
            semantic_reviewer: Arc::new(AlwaysSatisfied),
            issue_filer: Arc::new(FixedIssueFiler { url: String::new() }),
        }
    }

    #[tokio::test]
    async fn test_all_green_hints_n6() {
        let state = WorkflowState::new(1, "lld.md", "/repo", false, false, false, 10);
        let collab = collab_with_runner(TestRunResult {
            all_green: true,
            ..Default::default()
        });
        let update = VerifyGreen.run(&state, &collab).await;
        assert_eq!(update.next_node.as_deref(), Some("N6_e2e_validation"));
        assert!(update.error_message.is_none());
    }

    #[tokio::test]
    async fn test_failure_under_cap_loops_to_n4() {
        let state = WorkflowState::new(1, "lld.md", "/repo", false, false, false, 10);
        let collab = collab_with_runner(TestRunResult {
            all_green: false,
            failures: vec!["test_x".to_string()],
            ..Default::default()
        });
        let update = VerifyGreen.run(&state, &collab).await;
        assert_eq!(update.next_node.as_deref(), Some("N4_implement_code"));
        assert_eq!(update.iteration_count, Some(1));
        assert!(update.error_message.is_none());
    }

    #[tokio::test]
    async fn test_failure_at_cap_is_fatal() {
        let mut state = WorkflowState::new(1, "lld.md", "/repo", false, false, false, 10);
        state.iteration_count = 9;
        let collab = collab_with_runner(TestRunResult {
            all_green: false,
            failures: vec!["test_x".to_string()],
            ..Default::default()
        });
        let update = VerifyGreen.run(&state, &collab).await;
        assert!(update.error_message.is_some());
        assert!(update.error_message.unwrap().contains("LoopCapExceeded"));
    }
}
