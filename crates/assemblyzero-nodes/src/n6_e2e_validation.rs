//! N6 e2e_validation: optional end-to-end validation (spec.md §4.4). No
//! end-to-end collaborator is part of the current collaborator set, so this
//! node is a pass-through: it always hints forward to N7. When an E2E
//! collaborator is introduced, this node gains a real failure path that
//! loops back to N4 under the same `iteration_count` cap N5 enforces.

use async_trait::async_trait;

use assemblyzero_collab::Collaborators;
use assemblyzero_state::{NodeId, StateUpdate, WorkflowState};

use crate::node::Node;

pub struct E2eValidation;

#[async_trait]
impl Node for E2eValidation {
    fn id(&self) -> NodeId {
        NodeId::N6E2eValidation
    }

    async fn run(&self, _state: &WorkflowState, _collab: &Collaborators) -> StateUpdate {
        StateUpdate {
            next_node: Some(NodeId::N7Finalize.as_str().to_string()),
            ..Default::default()
        }
    }
}
