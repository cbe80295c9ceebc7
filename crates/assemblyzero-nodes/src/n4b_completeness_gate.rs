//! N4b completeness_gate: wraps the two-layer completeness gate crate and
//! folds its verdict back into state. Gate analysis itself never raises —
//! see `assemblyzero_gate`'s fail-open handling — so this node has no
//! fatal path of its own beyond a missing LLD file.

use async_trait::async_trait;

use assemblyzero_collab::Collaborators;
use assemblyzero_gate::CompletenessGate;
use assemblyzero_state::{CompletenessVerdict, NodeId, StateUpdate, WorkflowState};

use crate::node::{fatal, Node};

pub struct CompletenessGateNode {
    gate: CompletenessGate,
}

impl Default for CompletenessGateNode {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletenessGateNode {
    #[must_use]
    pub fn new() -> Self {
        Self {
            gate: CompletenessGate::new(),
        }
    }
}

#[async_trait]
impl Node for CompletenessGateNode {
    fn id(&self) -> NodeId {
        NodeId::N4bCompletenessGate
    }

    async fn run(&self, state: &WorkflowState, _collab: &Collaborators) -> StateUpdate {
        let contents = match std::fs::read_to_string(&state.lld_path) {
            Ok(c) => c,
            Err(e) => return fatal(format!("failed to read LLD for completeness gate: {e}")),
        };

        let repo_root = camino::Utf8Path::new(&state.repo_root);
        let (result, review_materials) = self.gate.run(
            &state.implementation_files,
            &contents,
            repo_root,
            state.issue_number,
        );

        let completeness_iteration_count = if result.verdict == CompletenessVerdict::Block {
            Some(state.completeness_iteration_count + 1)
        } else {
            None
        };

        let report_path = repo_root
            .join("docs")
            .join("reports")
            .join("active")
            .join(format!("{}-implementation-report.md", state.issue_number));

        StateUpdate {
            completeness_verdict: Some(result.verdict),
            completeness_issues: Some(result.issues),
            review_materials,
            completeness_iteration_count,
            implementation_report_path: Some(report_path.to_string()),
            ..Default::default()
        }
    }
}
