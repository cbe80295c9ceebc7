//! `assemblyzero run` (spec.md §6): start a fresh workflow from N0.

use std::path::PathBuf;

use assemblyzero_graph::Engine;
use assemblyzero_state::{workflow_id, WorkflowState};
use assemblyzero_utils::AssemblyZeroError;

use crate::collaborators;
use crate::config::Config;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    issue: u64,
    lld: PathBuf,
    auto: bool,
    scaffold_only: bool,
    skip_docs: bool,
    repo_root: Option<PathBuf>,
    max_iterations: Option<u32>,
    config: &Config,
) -> Result<(), AssemblyZeroError> {
    if let Some(root) = &repo_root {
        // SAFETY: single-threaded CLI entry point; no other task reads
        // environment variables concurrently.
        unsafe {
            std::env::set_var(
                "AGENTOS_WORKFLOW_DB",
                root.join(".agentos").join("issue_workflow.db"),
            );
        }
    }

    let db_path = super::common::resolve_checkpoint_path().await?;
    let resolved_repo_root = repo_root.unwrap_or_else(|| super::common::repo_root_from(&db_path));

    let store = super::common::connect_store(&db_path).await?;
    let collab = collaborators::build(&config.collaborators).map_err(AssemblyZeroError::Other)?;

    let engine = Engine::new(store, collab);
    let id = workflow_id(issue);

    let state = WorkflowState::new(
        issue,
        lld.to_string_lossy().to_string(),
        resolved_repo_root.to_string_lossy().to_string(),
        auto,
        scaffold_only,
        skip_docs,
        max_iterations.unwrap_or(config.max_iterations),
    );

    tracing::info!(workflow_id = %id, "starting workflow");
    let result = engine
        .run(&id, state)
        .await
        .map_err(|e| AssemblyZeroError::CheckpointUnavailable(e.to_string()))?;

    super::common::report_outcome(&id, &result)
}
