//! Implementation report side effect (spec.md §4.6). Report generation
//! failures are logged but never block the gate's routing verdict.

use camino::Utf8Path;
use chrono::{DateTime, Utc};

use assemblyzero_state::{CompletenessIssue, CompletenessVerdict, Severity};

pub struct ReportInputs<'a> {
    pub issue_number: u64,
    pub timestamp: DateTime<Utc>,
    pub verdict: CompletenessVerdict,
    pub issues: &'a [CompletenessIssue],
    pub ast_analysis_ms: u64,
    pub analyzed_files: &'a [String],
    pub lld_requirements: &'a [(String, String)],
}

fn verdict_str(v: CompletenessVerdict) -> &'static str {
    match v {
        CompletenessVerdict::Pass => "PASS",
        CompletenessVerdict::Warn => "WARN",
        CompletenessVerdict::Block => "BLOCK",
    }
}

#[must_use]
pub fn render(inputs: &ReportInputs) -> String {
    let error_count = inputs.issues.iter().filter(|i| i.severity == Severity::Error).count();
    let warning_count = inputs.issues.len() - error_count;

    let mut out = String::new();
    out.push_str(&format!("# Implementation Report: Issue {}\n\n", inputs.issue_number));
    out.push_str(&format!("- Generated: {}\n", inputs.timestamp.to_rfc3339()));
    out.push_str(&format!("- Verdict: {}\n\n", verdict_str(inputs.verdict)));

    out.push_str("## Completeness Summary\n\n");
    out.push_str(&format!("- Errors: {error_count}\n"));
    out.push_str(&format!("- Warnings: {warning_count}\n"));
    out.push_str(&format!("- AST analysis time: {}ms\n\n", inputs.ast_analysis_ms));

    out.push_str("## Issues\n\n");
    if inputs.issues.is_empty() {
        out.push_str("No issues detected.\n\n");
    } else {
        out.push_str("| File | Line | Category | Severity | Description |\n");
        out.push_str("|------|------|----------|----------|-------------|\n");
        for issue in inputs.issues {
            out.push_str(&format!(
                "| {} | {} | {:?} | {:?} | {} |\n",
                issue.file_path, issue.line_number, issue.category, issue.severity, issue.description
            ));
        }
        out.push('\n');
    }

    out.push_str("## LLD Requirement Verification\n\n");
    if inputs.lld_requirements.is_empty() {
        out.push_str("No requirements extracted from the LLD.\n\n");
    } else {
        out.push_str("| # | Requirement | Status |\n");
        out.push_str("|---|-------------|--------|\n");
        for (id, text) in inputs.lld_requirements {
            out.push_str(&format!("| {id} | {text} | PENDING |\n"));
        }
        out.push('\n');
    }

    out.push_str("## Analyzed Files\n\n");
    for file in inputs.analyzed_files {
        out.push_str(&format!("- {file}\n"));
    }

    out
}

/// Write the report to `docs/reports/active/{issue_number}-implementation-report.md`
/// under `repo_root`. Failures are logged and swallowed, never propagated,
/// per the gate's fail-open policy on side effects.
pub fn write_report(repo_root: &Utf8Path, inputs: &ReportInputs) {
    let path = repo_root
        .join("docs")
        .join("reports")
        .join("active")
        .join(format!("{}-implementation-report.md", inputs.issue_number));

    let content = render(inputs);
    if let Err(e) = assemblyzero_utils::atomic_write::write_file_atomic(&path, &content) {
        tracing::warn!(error = %e, path = %path, "failed to write implementation report");
    }
}
