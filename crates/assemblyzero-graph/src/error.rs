use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("checkpoint store error: {0}")]
    Store(#[from] assemblyzero_store::StoreError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
