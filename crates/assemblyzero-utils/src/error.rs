//! Library-level error type shared by every crate in the workspace.
//!
//! Each component crate defines its own `thiserror` error enum; this module
//! provides the top-level [`AssemblyZeroError`] that the CLI driver
//! converts those into via `#[from]`, plus the mapping to process exit
//! codes (spec.md §7).

use thiserror::Error;

use crate::exit_codes::ExitCode;

/// Aggregate error type returned at the CLI boundary.
#[derive(Error, Debug)]
pub enum AssemblyZeroError {
    #[error("checkpoint location could not be resolved: {0}")]
    LocationUnresolvable(String),

    #[error("checkpoint store unavailable: {0}")]
    CheckpointUnavailable(String),

    #[error("no checkpointed state for workflow '{0}'")]
    WorkflowNotFound(String),

    #[error("workflow ended with a fatal error: {0}")]
    Fatal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AssemblyZeroError {
    /// Map this error to the process exit code the driver should use.
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            Self::LocationUnresolvable(_) => ExitCode::LocationUnresolvable,
            Self::CheckpointUnavailable(_) | Self::WorkflowNotFound(_) => ExitCode::Unresumable,
            Self::Fatal(_) | Self::Other(_) => ExitCode::Fatal,
        }
    }
}
