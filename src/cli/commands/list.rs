//! `assemblyzero list` (spec.md §6): show the latest checkpoint per known
//! workflow id.

use serde::Serialize;

use assemblyzero_utils::AssemblyZeroError;

#[derive(Serialize)]
struct WorkflowSummary {
    workflow_id: String,
    node: String,
    issue_number: u64,
    fatal: bool,
    created_at: String,
}

pub async fn execute(json: bool) -> Result<(), AssemblyZeroError> {
    let db_path = super::common::resolve_checkpoint_path().await?;
    let store = super::common::connect_store(&db_path).await?;

    let checkpoints = store
        .list()
        .await
        .map_err(|e| AssemblyZeroError::CheckpointUnavailable(e.to_string()))?;

    let summaries: Vec<WorkflowSummary> = checkpoints
        .iter()
        .map(|c| WorkflowSummary {
            workflow_id: c.workflow_id.clone(),
            node: c.node_name.clone(),
            issue_number: c.state.issue_number,
            fatal: c.state.is_fatal(),
            created_at: c.created_at.to_rfc3339(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries).unwrap_or_default());
        return Ok(());
    }

    if summaries.is_empty() {
        println!("no workflows found in {db_path}");
        return Ok(());
    }

    for summary in &summaries {
        let status = if summary.fatal { "fatal" } else { "ok" };
        println!(
            "{:<16} issue={:<6} node={:<28} {status}",
            summary.workflow_id, summary.issue_number, summary.node
        );
    }

    Ok(())
}
