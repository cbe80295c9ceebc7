//! Durable, append-only checkpoint persistence (spec.md §4.2).
//!
//! Every node transition is persisted as a new row rather than an update in
//! place, so completed workflows remain in the store as an audit trail
//! (spec.md §3 Lifecycle). `get_latest` selects the highest `seq` for a
//! workflow id; `list` returns the latest row per distinct workflow id.

pub mod error;

pub use error::{Result, StoreError};

use chrono::{DateTime, TimeZone, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};

use assemblyzero_state::WorkflowState;

const MIGRATION_0001: &str = include_str!("../migrations/0001_init.sql");

/// One persisted checkpoint row.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub workflow_id: String,
    pub node_name: String,
    pub state: WorkflowState,
    pub created_at: DateTime<Utc>,
    pub seq: i64,
}

/// Durable per-step state persistence keyed by workflow id.
#[derive(Clone)]
pub struct SqliteCheckpointStore {
    pool: Pool<Sqlite>,
}

impl SqliteCheckpointStore {
    /// Open (creating if absent) the SQLite database at `db_path` and apply
    /// embedded migrations idempotently.
    pub async fn connect(db_path: &camino::Utf8Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent.as_std_path()).ok();
        }

        let db_url = format!("sqlite://{db_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&db_url)
            .await?;

        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await?;
        sqlx::query("PRAGMA busy_timeout = 5000")
            .execute(&pool)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        for statement in MIGRATION_0001.split(';') {
            let trimmed = statement.trim();
            if trimmed.is_empty() {
                continue;
            }
            sqlx::query(trimmed)
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Migration(e.to_string()))?;
        }
        Ok(())
    }

    /// Append a new checkpoint row. This is the only write path; rows are
    /// never updated or deleted (invariant 4, spec.md §3).
    pub async fn put(&self, workflow_id: &str, node_name: &str, state: &WorkflowState) -> Result<()> {
        let state_json = serde_json::to_string(state)?;
        let created_at = Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO checkpoints (workflow_id, node_name, state_json, created_at) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(workflow_id)
        .bind(node_name)
        .bind(state_json)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch the most recent checkpoint for a workflow id, if any.
    pub async fn get_latest(&self, workflow_id: &str) -> Result<Option<Checkpoint>> {
        let row = sqlx::query(
            "SELECT workflow_id, node_name, state_json, created_at, seq FROM checkpoints \
             WHERE workflow_id = ?1 ORDER BY seq DESC LIMIT 1",
        )
        .bind(workflow_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_checkpoint).transpose()
    }

    /// Fetch the most recent checkpoint for a workflow id, erroring if none
    /// exists. Used by `resume`, where a missing checkpoint is a user-facing
    /// "unresumable" condition rather than an absent-is-fine lookup.
    pub async fn get_latest_required(&self, workflow_id: &str) -> Result<Checkpoint> {
        self.get_latest(workflow_id)
            .await?
            .ok_or_else(|| StoreError::WorkflowNotFound(workflow_id.to_string()))
    }

    /// List the latest checkpoint per distinct workflow id, most recent
    /// first.
    pub async fn list(&self) -> Result<Vec<Checkpoint>> {
        let rows = sqlx::query(
            "SELECT workflow_id, node_name, state_json, created_at, seq FROM checkpoints c \
             WHERE seq = (SELECT MAX(seq) FROM checkpoints WHERE workflow_id = c.workflow_id) \
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_checkpoint).collect()
    }
}

fn row_to_checkpoint(row: sqlx::sqlite::SqliteRow) -> Result<Checkpoint> {
    let workflow_id: String = row.try_get("workflow_id")?;
    let node_name: String = row.try_get("node_name")?;
    let state_json: String = row.try_get("state_json")?;
    let created_at_unix: i64 = row.try_get("created_at")?;
    let seq: i64 = row.try_get("seq")?;

    let state: WorkflowState = serde_json::from_str(&state_json)?;
    let created_at = Utc
        .timestamp_opt(created_at_unix, 0)
        .single()
        .unwrap_or_else(Utc::now);

    Ok(Checkpoint {
        workflow_id,
        node_name,
        state,
        created_at,
        seq,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    async fn temp_store() -> (TempDir, SqliteCheckpointStore) {
        let dir = TempDir::new().unwrap();
        let db_path = Utf8PathBuf::from_path_buf(dir.path().join("checkpoints.db")).unwrap();
        let store = SqliteCheckpointStore::connect(&db_path).await.unwrap();
        (dir, store)
    }

    fn sample_state(issue: u64) -> WorkflowState {
        WorkflowState::new(issue, "lld.md", "/repo", false, false, false, 10)
    }

    #[tokio::test]
    async fn test_put_then_get_latest() {
        let (_dir, store) = temp_store().await;
        store.put("issue-7", "N0_load_lld", &sample_state(7)).await.unwrap();

        let checkpoint = store.get_latest("issue-7").await.unwrap().unwrap();
        assert_eq!(checkpoint.node_name, "N0_load_lld");
        assert_eq!(checkpoint.state.issue_number, 7);
    }

    #[tokio::test]
    async fn test_get_latest_returns_highest_seq() {
        let (_dir, store) = temp_store().await;
        store.put("issue-7", "N0_load_lld", &sample_state(7)).await.unwrap();
        let mut second = sample_state(7);
        second.iteration_count = 1;
        store.put("issue-7", "N4_implement_code", &second).await.unwrap();

        let checkpoint = store.get_latest("issue-7").await.unwrap().unwrap();
        assert_eq!(checkpoint.node_name, "N4_implement_code");
        assert_eq!(checkpoint.state.iteration_count, 1);
    }

    #[tokio::test]
    async fn test_get_latest_missing_workflow_is_none() {
        let (_dir, store) = temp_store().await;
        assert!(store.get_latest("issue-999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_latest_required_errors_when_absent() {
        let (_dir, store) = temp_store().await;
        let err = store.get_latest_required("issue-999").await.unwrap_err();
        assert!(matches!(err, StoreError::WorkflowNotFound(_)));
    }

    #[tokio::test]
    async fn test_list_returns_latest_per_workflow() {
        let (_dir, store) = temp_store().await;
        store.put("issue-1", "N0_load_lld", &sample_state(1)).await.unwrap();
        store.put("issue-2", "N0_load_lld", &sample_state(2)).await.unwrap();
        let mut second = sample_state(1);
        second.iteration_count = 3;
        store.put("issue-1", "N4_implement_code", &second).await.unwrap();

        let rows = store.list().await.unwrap();
        assert_eq!(rows.len(), 2);
        let issue1 = rows.iter().find(|c| c.workflow_id == "issue-1").unwrap();
        assert_eq!(issue1.node_name, "N4_implement_code");
    }

    #[tokio::test]
    async fn test_checkpoints_are_append_only() {
        let (_dir, store) = temp_store().await;
        store.put("issue-1", "N0_load_lld", &sample_state(1)).await.unwrap();
        store.put("issue-1", "N1_review_test_plan", &sample_state(1)).await.unwrap();

        let row = sqlx::query("SELECT COUNT(*) as c FROM checkpoints WHERE workflow_id = 'issue-1'")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        let count: i64 = row.try_get("c").unwrap();
        assert_eq!(count, 2);
    }
}
