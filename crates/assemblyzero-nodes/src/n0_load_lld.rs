//! N0 load_lld: reads the LLD file and verifies it has an extractable
//! Requirements section before the workflow proceeds.

use async_trait::async_trait;

use assemblyzero_collab::Collaborators;
use assemblyzero_gate::review_materials::extract_requirements;
use assemblyzero_state::{NodeId, StateUpdate, WorkflowState};

use crate::node::{fatal, Node};

pub struct LoadLld;

#[async_trait]
impl Node for LoadLld {
    fn id(&self) -> NodeId {
        NodeId::N0LoadLld
    }

    async fn run(&self, state: &WorkflowState, _collab: &Collaborators) -> StateUpdate {
        let contents = match std::fs::read_to_string(&state.lld_path) {
            Ok(c) => c,
            Err(e) => return fatal(format!("LLDMalformed: failed to read '{}': {e}", state.lld_path)),
        };

        if extract_requirements(&contents).is_empty() {
            return fatal(format!(
                "LLDMalformed: no '## 3. Requirements' section found in '{}'",
                state.lld_path
            ));
        }

        let audit_dir = assemblyzero_state::audit_dir_name(
            camino::Utf8Path::new(&state.repo_root),
            state.issue_number,
        );

        StateUpdate {
            audit_dir: Some(audit_dir.to_string()),
            ..Default::default()
        }
    }
}
