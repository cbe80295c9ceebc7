//! `assemblyzero resume` (spec.md §6): continue a workflow from its last
//! committed checkpoint without re-running the completed node.

use assemblyzero_graph::Engine;
use assemblyzero_utils::AssemblyZeroError;

use crate::collaborators;
use crate::config::Config;

pub async fn execute(workflow_id: String, config: &Config) -> Result<(), AssemblyZeroError> {
    let db_path = super::common::resolve_checkpoint_path().await?;
    let store = super::common::connect_store(&db_path).await?;
    let collab = collaborators::build(&config.collaborators).map_err(AssemblyZeroError::Other)?;

    let engine = Engine::new(store, collab);

    tracing::info!(%workflow_id, "resuming workflow");
    let result = engine
        .resume(&workflow_id)
        .await
        .map_err(|e| AssemblyZeroError::WorkflowNotFound(format!("{workflow_id}: {e}")))?;

    super::common::report_outcome(&workflow_id, &result)
}
