//! Foundation utilities shared across the workspace: error types, exit
//! codes, logging setup, atomic file writes, and content hashing.

pub mod atomic_write;
pub mod error;
pub mod exit_codes;
pub mod logging;

pub use error::AssemblyZeroError;
pub use exit_codes::ExitCode;

/// Content hash used for artifact identity (LLD documents, implementation
/// diffs, checkpoint payloads).
#[must_use]
pub fn content_hash(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

/// Current UTC timestamp, used wherever the system clock is read for
/// checkpoint and report metadata.
#[must_use]
pub fn now_utc() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_is_stable() {
        assert_eq!(content_hash("abc"), content_hash("abc"));
        assert_ne!(content_hash("abc"), content_hash("abd"));
    }
}
