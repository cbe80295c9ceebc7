//! Typed workflow state and the reducer that merges node outputs into it
//! (spec.md §3, §4.3).

pub mod completeness;
pub mod node_id;
pub mod state;
pub mod workflow_id;

pub use completeness::{
    CompletenessIssue, CompletenessResult, CompletenessVerdict, IssueCategory, ReviewMaterials,
    Severity, TestPlanStatus,
};
pub use node_id::NodeId;
pub use state::{StateUpdate, WorkflowState};
pub use workflow_id::{audit_dir_name, parse_issue_number, workflow_id};
