//! The `Node` trait (spec.md §4.4): a pure function `state -> partial_state`
//! that may invoke external collaborators but must return only a
//! `StateUpdate`.

use async_trait::async_trait;

use assemblyzero_collab::Collaborators;
use assemblyzero_state::{NodeId, StateUpdate, WorkflowState};

#[async_trait]
pub trait Node: Send + Sync {
    fn id(&self) -> NodeId;

    /// Run the node. Implementations must never panic or propagate an
    /// error out of this call: failures are translated into
    /// `StateUpdate { error_message: Some(..), .. }` (spec.md §7).
    async fn run(&self, state: &WorkflowState, collab: &Collaborators) -> StateUpdate;
}

/// Helper for constructing a fatal `StateUpdate` from an error, the common
/// translation point every node uses instead of propagating (spec.md §4.4
/// Failure semantics).
pub(crate) fn fatal(message: impl Into<String>) -> StateUpdate {
    StateUpdate {
        error_message: Some(message.into()),
        ..Default::default()
    }
}
