//! Shared plumbing used by more than one subcommand: checkpoint location
//! resolution, store connection, and end-of-run reporting.

use camino::Utf8PathBuf;

use assemblyzero_state::WorkflowState;
use assemblyzero_store::SqliteCheckpointStore;
use assemblyzero_utils::AssemblyZeroError;

/// Resolve the checkpoint database path off the async executor, since
/// `assemblyzero_location::resolve_checkpoint_path` is a synchronous,
/// potentially git-spawning call (spec.md §4.1).
pub async fn resolve_checkpoint_path() -> Result<Utf8PathBuf, AssemblyZeroError> {
    tokio::task::spawn_blocking(assemblyzero_location::resolve_checkpoint_path)
        .await
        .map_err(|e| AssemblyZeroError::LocationUnresolvable(e.to_string()))?
        .map_err(|e| AssemblyZeroError::LocationUnresolvable(e.to_string()))
}

/// The repository root is two components up from `{root}/.agentos/issue_workflow.db`.
pub fn repo_root_from(db_path: &Utf8PathBuf) -> std::path::PathBuf {
    db_path
        .parent()
        .and_then(camino::Utf8Path::parent)
        .map(camino::Utf8Path::as_std_path)
        .map(std::path::Path::to_path_buf)
        .unwrap_or_else(|| std::path::PathBuf::from("."))
}

pub async fn connect_store(db_path: &Utf8PathBuf) -> Result<SqliteCheckpointStore, AssemblyZeroError> {
    SqliteCheckpointStore::connect(db_path)
        .await
        .map_err(|e| AssemblyZeroError::CheckpointUnavailable(e.to_string()))
}

/// Print the terminal state of a driven workflow and translate a fatal
/// `error_message` into the exit-code-bearing error variant (spec.md §7
/// "User-visible behavior": print the error message, workflow id, last node,
/// checkpoint path).
pub fn report_outcome(workflow_id: &str, state: &WorkflowState) -> Result<(), AssemblyZeroError> {
    if state.is_fatal() {
        eprintln!("workflow '{workflow_id}' ended with a fatal error: {}", state.error_message);
        return Err(AssemblyZeroError::Fatal(state.error_message.clone()));
    }

    println!("workflow '{workflow_id}' ended cleanly");
    if !state.implementation_files.is_empty() {
        println!("  implementation files: {}", state.implementation_files.join(", "));
    }
    if let Some(report) = &state.implementation_report_path {
        println!("  implementation report: {report}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_root_from_strips_agentos_db_suffix() {
        let db = Utf8PathBuf::from("/repo/.agentos/issue_workflow.db");
        assert_eq!(repo_root_from(&db), std::path::PathBuf::from("/repo"));
    }

    #[test]
    fn test_report_outcome_is_ok_for_clean_state() {
        let state = WorkflowState::new(1, "lld.md", "/repo", false, false, false, 10);
        assert!(report_outcome("issue-1", &state).is_ok());
    }

    #[test]
    fn test_report_outcome_errors_for_fatal_state() {
        let mut state = WorkflowState::new(1, "lld.md", "/repo", false, false, false, 10);
        state.error_message = "boom".to_string();
        let err = report_outcome("issue-1", &state).unwrap_err();
        assert!(matches!(err, AssemblyZeroError::Fatal(_)));
    }
}
