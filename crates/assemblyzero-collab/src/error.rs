use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollabError {
    #[error("collaborator call timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("collaborator failed: {0}")]
    Failed(#[from] anyhow::Error),
}
