//! Deterministic workflow identifiers (SPEC_FULL.md §3).

use camino::Utf8Path;

/// Derive the stable id for a workflow from its issue number.
///
/// Uniqueness is guaranteed per checkpoint database, not globally: the
/// database itself is already scoped per-repository by location resolution
/// (`assemblyzero-location`), so two repositories can each have their own
/// `issue-7` without collision.
#[must_use]
pub fn workflow_id(issue_number: u64) -> String {
    format!("issue-{issue_number}")
}

/// Parse an issue number back out of a workflow id, if it matches the
/// `issue-{n}` convention.
#[must_use]
pub fn parse_issue_number(workflow_id: &str) -> Option<u64> {
    workflow_id.strip_prefix("issue-")?.parse().ok()
}

/// Default audit directory for a given issue, under the resolved repo root.
#[must_use]
pub fn audit_dir_name(repo_root: &Utf8Path, issue_number: u64) -> camino::Utf8PathBuf {
    repo_root.join(".agentos").join(format!("issue-{issue_number}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        assert_eq!(workflow_id(7), "issue-7");
        assert_eq!(parse_issue_number("issue-7"), Some(7));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_issue_number("not-an-issue"), None);
        assert_eq!(parse_issue_number("issue-abc"), None);
    }
}
