//! Errors specific to checkpoint location resolution.

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LocationError {
    #[error("could not resolve a checkpoint location; searched: {searched:?}")]
    Unresolvable { searched: Vec<String> },

    #[error("git invocation failed: {reason}")]
    GitInvocationFailed { reason: String },

    #[error("io error resolving checkpoint location: {0}")]
    Io(String),
}

impl From<std::io::Error> for LocationError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
