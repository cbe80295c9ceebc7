use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("no checkpointed state for workflow '{0}'")]
    WorkflowNotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
