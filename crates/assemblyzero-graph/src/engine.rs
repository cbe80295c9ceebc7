//! The `Engine`: owns the static node-name → node-implementation map, drives
//! a workflow node by node, persists after every transition, and applies
//! `route` between transitions (spec.md §4.5, §5).
//!
//! Single-executor rule (spec.md §5): `drive` never spawns a node body; it
//! `.await`s each node to completion, persists, then routes, so at most one
//! node for this workflow id is ever running at a time.

use std::collections::HashMap;

use assemblyzero_collab::Collaborators;
use assemblyzero_nodes::{
    CompletenessGateNode, Document, E2eValidation, Finalize, ImplementCode, LoadLld, Node,
    ReviewTestPlan, ScaffoldTests, ValidateTestsMechanical, VerifyGreen, VerifyRed,
};
use assemblyzero_state::{NodeId, WorkflowState};
use assemblyzero_store::SqliteCheckpointStore;

use crate::error::Result;
use crate::router::{route, RouteDecision};

/// Drives the graph for one workflow id against one checkpoint store.
pub struct Engine {
    nodes: HashMap<NodeId, Box<dyn Node>>,
    store: SqliteCheckpointStore,
    collab: Collaborators,
}

impl Engine {
    #[must_use]
    pub fn new(store: SqliteCheckpointStore, collab: Collaborators) -> Self {
        let mut nodes: HashMap<NodeId, Box<dyn Node>> = HashMap::new();
        nodes.insert(NodeId::N0LoadLld, Box::new(LoadLld));
        nodes.insert(NodeId::N1ReviewTestPlan, Box::new(ReviewTestPlan));
        nodes.insert(NodeId::N2ScaffoldTests, Box::new(ScaffoldTests));
        nodes.insert(
            NodeId::N2_5ValidateTestsMechanical,
            Box::new(ValidateTestsMechanical),
        );
        nodes.insert(NodeId::N3VerifyRed, Box::new(VerifyRed));
        nodes.insert(NodeId::N4ImplementCode, Box::new(ImplementCode));
        nodes.insert(NodeId::N4bCompletenessGate, Box::new(CompletenessGateNode::new()));
        nodes.insert(NodeId::N5VerifyGreen, Box::new(VerifyGreen));
        nodes.insert(NodeId::N6E2eValidation, Box::new(E2eValidation));
        nodes.insert(NodeId::N7Finalize, Box::new(Finalize));
        nodes.insert(NodeId::N8Document, Box::new(Document));

        Self { nodes, store, collab }
    }

    /// Run a brand-new workflow from its entry node, N0 (spec.md §4.5
    /// Entry).
    pub async fn run(&self, workflow_id: &str, state: WorkflowState) -> Result<WorkflowState> {
        self.drive(workflow_id, NodeId::N0LoadLld, state).await
    }

    /// Resume a workflow from its last committed checkpoint. Per spec.md
    /// §4.5 Resume: execution continues at the node the router selects for
    /// that state, never by re-running the last completed node.
    pub async fn resume(&self, workflow_id: &str) -> Result<WorkflowState> {
        let checkpoint = self.store.get_latest_required(workflow_id).await?;
        let last_node = NodeId::from_str(&checkpoint.node_name).unwrap_or(NodeId::End);

        match route(last_node, &checkpoint.state) {
            RouteDecision::End(reason) => Ok(stamp_reason(checkpoint.state, reason)),
            RouteDecision::Next(next) => self.drive(workflow_id, next, checkpoint.state).await,
        }
    }

    async fn drive(
        &self,
        workflow_id: &str,
        mut current: NodeId,
        mut state: WorkflowState,
    ) -> Result<WorkflowState> {
        loop {
            let node = self
                .nodes
                .get(&current)
                .expect("node registry covers every non-End NodeId");

            let update = node.run(&state, &self.collab).await;
            update.merge_into(&mut state);

            self.store.put(workflow_id, current.as_str(), &state).await?;
            tracing::debug!(workflow_id, node = %current, "checkpoint persisted");

            if state.is_fatal() {
                return Ok(state);
            }

            match route(current, &state) {
                RouteDecision::End(reason) => {
                    let state = stamp_reason(state, reason);
                    if state.is_fatal() {
                        // Re-persist so the fatal reason survives a resume.
                        self.store.put(workflow_id, current.as_str(), &state).await?;
                    }
                    return Ok(state);
                }
                RouteDecision::Next(next) => current = next,
            }
        }
    }
}

/// Apply a router-supplied end reason to `error_message`, if the state
/// doesn't already carry one (a node's own fatal message always wins).
fn stamp_reason(mut state: WorkflowState, reason: Option<String>) -> WorkflowState {
    if let Some(reason) = reason {
        if state.error_message.is_empty() {
            state.error_message = reason;
        }
    }
    state
}
