//! CLI exit codes (spec.md §6, §7).

/// Process exit codes returned by the `assemblyzero` binary.
///
/// These are the only exit codes the driver emits; library code never calls
/// `std::process::exit` directly and instead returns an [`ExitCode`] for
/// `main` to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Workflow ended with no error.
    Clean,
    /// Fatal error (node set `error_message`, or a runtime bug).
    Fatal,
    /// The checkpoint location could not be resolved.
    LocationUnresolvable,
    /// A workflow id could not be resumed (no prior state, or store error).
    Unresumable,
}

impl ExitCode {
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Clean => 0,
            Self::Fatal => 1,
            Self::LocationUnresolvable => 2,
            Self::Unresumable => 3,
        }
    }
}
