//! TRIVIAL_ASSERTION: a test function whose only assertion is a tautology
//! (`assert True`) or a bare non-nullness check with no further structural
//! assertion (severity WARNING).

use std::sync::LazyLock;

use regex::Regex;
use tree_sitter::{Node, Tree};

use assemblyzero_state::{CompletenessIssue, IssueCategory, Severity};

use super::{line_of, node_text};

static NON_NULLNESS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\[\]]*\s+is\s+not\s+None$").unwrap());

pub fn detect(tree: &Tree, source: &str, file_path: &str) -> Vec<CompletenessIssue> {
    let mut issues = Vec::new();
    let mut cursor = tree.walk();
    walk(tree.root_node(), source, file_path, &mut issues, &mut cursor);
    issues
}

fn walk(
    node: Node,
    source: &str,
    file_path: &str,
    issues: &mut Vec<CompletenessIssue>,
    cursor: &mut tree_sitter::TreeCursor,
) {
    if node.kind() == "function_definition"
        && let Some(name) = node
            .child_by_field_name("name")
            .map(|n| node_text(n, source))
        && name.starts_with("test_")
        && let Some(issue) = check_test_function(node, name, source, file_path)
    {
        issues.push(issue);
    }

    if cursor.goto_first_child() {
        loop {
            walk(cursor.node(), source, file_path, issues, cursor);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

fn check_test_function(func: Node, name: &str, source: &str, file_path: &str) -> Option<CompletenessIssue> {
    let body = func.child_by_field_name("body")?;
    let asserts = collect_asserts(body);
    if asserts.len() != 1 {
        return None;
    }

    let condition = asserts[0].named_child(0)?;
    let condition_text = node_text(condition, source).trim();

    let is_trivial = condition_text == "True" || NON_NULLNESS_ONLY.is_match(condition_text);
    if !is_trivial {
        return None;
    }

    Some(CompletenessIssue {
        category: IssueCategory::TrivialAssertion,
        file_path: file_path.to_string(),
        line_number: line_of(asserts[0]),
        description: format!("test '{name}' has only a trivial assertion"),
        severity: Severity::Warning,
    })
}

/// Collect `assert_statement` nodes within `body`, not descending into
/// nested function definitions (a nested helper's assertions belong to it,
/// not to the enclosing test).
fn collect_asserts(body: Node) -> Vec<Node> {
    let mut out = Vec::new();
    let mut cursor = body.walk();
    collect_asserts_rec(body, &mut out, &mut cursor);
    out
}

fn collect_asserts_rec<'a>(node: Node<'a>, out: &mut Vec<Node<'a>>, cursor: &mut tree_sitter::TreeCursor<'a>) {
    if node.kind() == "assert_statement" {
        out.push(node);
        return;
    }
    if node.kind() == "function_definition" {
        return;
    }
    if cursor.goto_first_child() {
        loop {
            collect_asserts_rec(cursor.node(), out, cursor);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}
