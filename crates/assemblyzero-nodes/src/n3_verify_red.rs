//! N3 verify_red: executes the generated tests against the empty
//! implementation; all new tests must fail. Uses the `next_node` hint
//! (one of the two edges the router documents as hint-accepting) to signal
//! success forward to N4.

use async_trait::async_trait;

use assemblyzero_collab::Collaborators;
use assemblyzero_state::{NodeId, StateUpdate, WorkflowState};

use crate::node::{fatal, Node};

pub struct VerifyRed;

#[async_trait]
impl Node for VerifyRed {
    fn id(&self) -> NodeId {
        NodeId::N3VerifyRed
    }

    async fn run(&self, state: &WorkflowState, collab: &Collaborators) -> StateUpdate {
        match collab.test_runner.run(&state.test_files).await {
            Ok(result) if result.all_red => StateUpdate {
                next_node: Some(NodeId::N4ImplementCode.as_str().to_string()),
                ..Default::default()
            },
            Ok(result) => fatal(format!(
                "verify_red expected all new tests to fail, got failures: {:?}",
                result.failures
            )),
            Err(e) => fatal(format!("failed to execute tests during verify_red: {e}")),
        }
    }
}
