//! N1 review_test_plan: consults the `TestPlanReviewer` collaborator and
//! records its verdict. Routing on a `BLOCKED` verdict (end, unless
//! `auto_mode`) is the router's job, not this node's.

use async_trait::async_trait;

use assemblyzero_collab::{Collaborators, TestPlanVerdict};
use assemblyzero_state::{NodeId, StateUpdate, TestPlanStatus, WorkflowState};

use crate::node::{fatal, Node};

pub struct ReviewTestPlan;

#[async_trait]
impl Node for ReviewTestPlan {
    fn id(&self) -> NodeId {
        NodeId::N1ReviewTestPlan
    }

    async fn run(&self, state: &WorkflowState, collab: &Collaborators) -> StateUpdate {
        let contents = match std::fs::read_to_string(&state.lld_path) {
            Ok(c) => c,
            Err(e) => return fatal(format!("failed to re-read LLD for test plan review: {e}")),
        };

        match collab.test_plan_reviewer.review(&contents).await {
            Ok(TestPlanVerdict::Approved) => StateUpdate {
                test_plan_status: Some(TestPlanStatus::Approved),
                ..Default::default()
            },
            Ok(TestPlanVerdict::Blocked { details }) => {
                tracing::info!(details = %details, "test plan reviewer returned BLOCKED");
                StateUpdate {
                    test_plan_status: Some(TestPlanStatus::Blocked),
                    ..Default::default()
                }
            }
            Err(e) => fatal(format!("CollaboratorTimeout: test plan review failed: {e}")),
        }
    }
}
