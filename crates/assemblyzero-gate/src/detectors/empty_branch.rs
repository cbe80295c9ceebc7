//! EMPTY_BRANCH: a conditional branch whose body is only a `pass`,
//! `return`/`return None`, an ellipsis placeholder, or (for brace languages)
//! an empty block (severity WARNING).

use std::sync::LazyLock;

use regex::Regex;
use tree_sitter::{Node, Tree};

use assemblyzero_state::{CompletenessIssue, IssueCategory, Severity};

use super::line_of;
use crate::parser_manager::Language;

static TRIVIAL_BODY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(pass|return|return\s+None|return\s*;|return\s+null\s*;|return\s+undefined\s*;|\.\.\.|\.\.\.\s*;?|\(\s*\))$").unwrap()
});

const BRANCH_KINDS: &[&str] = &["if_statement", "elif_clause", "else_clause", "if_expression"];

pub fn detect(tree: &Tree, source: &str, file_path: &str, language: Language) -> Vec<CompletenessIssue> {
    let mut issues = Vec::new();
    let mut cursor = tree.walk();
    walk(tree.root_node(), source, file_path, language, &mut issues, &mut cursor);
    issues
}

fn walk(
    node: Node,
    source: &str,
    file_path: &str,
    language: Language,
    issues: &mut Vec<CompletenessIssue>,
    cursor: &mut tree_sitter::TreeCursor,
) {
    if BRANCH_KINDS.contains(&node.kind()) {
        for field in ["consequence", "body", "alternative"] {
            if let Some(body) = node.child_by_field_name(field)
                && is_trivial_body(body, source)
            {
                issues.push(CompletenessIssue {
                    category: IssueCategory::EmptyBranch,
                    file_path: file_path.to_string(),
                    line_number: line_of(node),
                    description: "branch body is a no-op placeholder".to_string(),
                    severity: Severity::Warning,
                });
            }
        }
        let _ = language;
    }

    if cursor.goto_first_child() {
        loop {
            walk(cursor.node(), source, file_path, language, issues, cursor);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

fn is_trivial_body(body: Node, source: &str) -> bool {
    let text = body.utf8_text(source.as_bytes()).unwrap_or("");
    let inner = text.trim().trim_start_matches('{').trim_end_matches('}').trim();
    if inner.is_empty() {
        return true;
    }
    // Reject multi-statement bodies outright; only a single trivial
    // statement counts.
    if inner.lines().filter(|l| !l.trim().is_empty()).count() > 1 {
        return false;
    }
    TRIVIAL_BODY.is_match(inner)
}
