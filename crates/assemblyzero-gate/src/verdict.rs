//! Layer 1 verdict aggregation (spec.md §4.6).

use assemblyzero_state::{CompletenessIssue, CompletenessVerdict, Severity};

/// `BLOCK` if any issue is `ERROR`; `WARN` if all issues are `WARNING` and
/// at least one exists; `PASS` otherwise (including the empty case).
#[must_use]
pub fn aggregate(issues: &[CompletenessIssue]) -> CompletenessVerdict {
    if issues.iter().any(|i| i.severity == Severity::Error) {
        CompletenessVerdict::Block
    } else if !issues.is_empty() {
        CompletenessVerdict::Warn
    } else {
        CompletenessVerdict::Pass
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assemblyzero_state::IssueCategory;

    fn issue(severity: Severity) -> CompletenessIssue {
        CompletenessIssue {
            category: IssueCategory::EmptyBranch,
            file_path: "a.py".to_string(),
            line_number: 1,
            description: String::new(),
            severity,
        }
    }

    #[test]
    fn test_empty_is_pass() {
        assert_eq!(aggregate(&[]), CompletenessVerdict::Pass);
    }

    #[test]
    fn test_all_warnings_is_warn() {
        assert_eq!(
            aggregate(&[issue(Severity::Warning), issue(Severity::Warning)]),
            CompletenessVerdict::Warn
        );
    }

    #[test]
    fn test_any_error_is_block() {
        assert_eq!(
            aggregate(&[issue(Severity::Warning), issue(Severity::Error)]),
            CompletenessVerdict::Block
        );
    }
}
