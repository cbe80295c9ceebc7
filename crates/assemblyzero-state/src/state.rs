//! `WorkflowState` and its reducer (spec.md §3, §4.3).

use serde::{Deserialize, Serialize};

use crate::completeness::{CompletenessIssue, CompletenessVerdict, ReviewMaterials, TestPlanStatus};

/// The single typed record threaded through every node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    // Identity and inputs
    pub issue_number: u64,
    pub lld_path: String,
    pub repo_root: String,
    pub auto_mode: bool,
    pub scaffold_only: bool,
    pub skip_docs: bool,

    // Progress
    pub iteration_count: u32,
    pub max_iterations: u32,
    pub completeness_iteration_count: u32,

    // Work products
    pub implementation_files: Vec<String>,
    pub test_files: Vec<String>,
    pub audit_dir: String,
    pub implementation_report_path: Option<String>,
    pub completeness_verdict: Option<CompletenessVerdict>,
    pub completeness_issues: Vec<CompletenessIssue>,
    pub review_materials: Option<ReviewMaterials>,
    pub test_plan_status: Option<TestPlanStatus>,

    // Control
    pub next_node: Option<String>,
    pub error_message: String,
    pub validation_attempts: u32,
}

impl WorkflowState {
    /// Construct the initial state produced by N0 from its raw inputs.
    #[must_use]
    pub fn new(
        issue_number: u64,
        lld_path: impl Into<String>,
        repo_root: impl Into<String>,
        auto_mode: bool,
        scaffold_only: bool,
        skip_docs: bool,
        max_iterations: u32,
    ) -> Self {
        Self {
            issue_number,
            lld_path: lld_path.into(),
            repo_root: repo_root.into(),
            auto_mode,
            scaffold_only,
            skip_docs,
            iteration_count: 0,
            max_iterations,
            completeness_iteration_count: 0,
            implementation_files: Vec::new(),
            test_files: Vec::new(),
            audit_dir: String::new(),
            implementation_report_path: None,
            completeness_verdict: None,
            completeness_issues: Vec::new(),
            review_materials: None,
            test_plan_status: None,
            next_node: None,
            error_message: String::new(),
            validation_attempts: 0,
        }
    }

    /// Invariant 3 (spec.md §3): a non-empty `error_message` forces routing
    /// to the terminal sink regardless of other state.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !self.error_message.is_empty()
    }
}

/// A node's return value: every field is absent-by-default, and an absent
/// field leaves the corresponding `WorkflowState` field unchanged. List
/// fields, when present, fully replace the prior list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateUpdate {
    pub implementation_files: Option<Vec<String>>,
    pub test_files: Option<Vec<String>>,
    pub audit_dir: Option<String>,
    pub implementation_report_path: Option<String>,
    pub completeness_verdict: Option<CompletenessVerdict>,
    pub completeness_issues: Option<Vec<CompletenessIssue>>,
    pub review_materials: Option<ReviewMaterials>,
    pub test_plan_status: Option<TestPlanStatus>,

    pub iteration_count: Option<u32>,
    pub completeness_iteration_count: Option<u32>,
    pub validation_attempts: Option<u32>,

    pub next_node: Option<String>,
    /// `Some(String::new())` clears `error_message`; `None` leaves it alone.
    pub error_message: Option<String>,
}

impl StateUpdate {
    /// Merge this update into `state` in place, per the reducer rule
    /// (spec.md §4.3): present fields replace, absent fields are untouched,
    /// list fields replace in full rather than append.
    pub fn merge_into(self, state: &mut WorkflowState) {
        if let Some(v) = self.implementation_files {
            state.implementation_files = v;
        }
        if let Some(v) = self.test_files {
            state.test_files = v;
        }
        if let Some(v) = self.audit_dir {
            state.audit_dir = v;
        }
        if let Some(v) = self.implementation_report_path {
            state.implementation_report_path = Some(v);
        }
        if let Some(v) = self.completeness_verdict {
            state.completeness_verdict = Some(v);
        }
        if let Some(v) = self.completeness_issues {
            state.completeness_issues = v;
        }
        if let Some(v) = self.review_materials {
            state.review_materials = Some(v);
        }
        if let Some(v) = self.test_plan_status {
            state.test_plan_status = Some(v);
        }
        if let Some(v) = self.iteration_count {
            state.iteration_count = v;
        }
        if let Some(v) = self.completeness_iteration_count {
            state.completeness_iteration_count = v;
        }
        if let Some(v) = self.validation_attempts {
            state.validation_attempts = v;
        }
        if let Some(v) = self.next_node {
            state.next_node = Some(v);
        }
        if let Some(v) = self.error_message {
            state.error_message = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> WorkflowState {
        WorkflowState::new(7, "lld.md", "/repo", false, false, false, 10)
    }

    #[test]
    fn test_absent_fields_leave_state_unchanged() {
        let mut state = sample_state();
        state.test_files = vec!["a_test.py".to_string()];
        StateUpdate::default().merge_into(&mut state);
        assert_eq!(state.test_files, vec!["a_test.py".to_string()]);
        assert_eq!(state.iteration_count, 0);
    }

    #[test]
    fn test_list_fields_replace_not_append() {
        let mut state = sample_state();
        state.test_files = vec!["old_test.py".to_string()];
        let update = StateUpdate {
            test_files: Some(vec!["new_test.py".to_string()]),
            ..Default::default()
        };
        update.merge_into(&mut state);
        assert_eq!(state.test_files, vec!["new_test.py".to_string()]);
    }

    #[test]
    fn test_clearing_error_message_requires_explicit_empty_string() {
        let mut state = sample_state();
        state.error_message = "boom".to_string();
        let update = StateUpdate {
            error_message: Some(String::new()),
            ..Default::default()
        };
        update.merge_into(&mut state);
        assert_eq!(state.error_message, "");
        assert!(!state.is_fatal());
    }

    #[test]
    fn test_leaving_error_message_absent_preserves_it() {
        let mut state = sample_state();
        state.error_message = "boom".to_string();
        StateUpdate::default().merge_into(&mut state);
        assert_eq!(state.error_message, "boom");
        assert!(state.is_fatal());
    }
}
