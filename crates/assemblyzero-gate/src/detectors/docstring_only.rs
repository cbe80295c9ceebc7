//! DOCSTRING_ONLY: a user-defined, non-dunder, non-test function whose
//! entire body is a docstring followed by `pass`/`return None`/an ellipsis
//! (severity ERROR).

use tree_sitter::{Node, Tree};

use assemblyzero_state::{CompletenessIssue, IssueCategory, Severity};

use super::{line_of, node_text};

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
        && let Some(issue) = check_function(node, source, file_path)
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

fn check_function(func: Node, source: &str, file_path: &str) -> Option<CompletenessIssue> {
    let name_node = func.child_by_field_name("name")?;
    let name = node_text(name_node, source);
    if (name.starts_with("__") && name.ends_with("__")) || name.starts_with("test_") {
        return None;
    }

    let body = func.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let statements: Vec<Node> = body.named_children(&mut cursor).collect();
    if statements.len() != 2 {
        return None;
    }

    let is_docstring = statements[0].kind() == "expression_statement"
        && statements[0]
            .named_child(0)
            .is_some_and(|c| c.kind() == "string");
    if !is_docstring {
        return None;
    }

    let second_text = node_text(statements[1], source).trim();
    let is_trivial = matches!(statements[1].kind(), "pass_statement")
        || second_text == "return"
        || second_text == "return None"
        || (statements[1].kind() == "expression_statement" && second_text == "...");
    if !is_trivial {
        return None;
    }

    Some(CompletenessIssue {
        category: IssueCategory::DocstringOnly,
        file_path: file_path.to_string(),
        line_number: line_of(func),
        description: format!("function '{name}' has only a docstring and a no-op body"),
        severity: Severity::Error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser_manager::{Language, ParserManager};

    #[test]
    fn test_detects_docstring_only_function() {
        let source = "def handle(x):\n    \"\"\"Handle x.\"\"\"\n    pass\n";
        let manager = ParserManager::new();
        let tree = manager.parse(source, Language::Python).unwrap();
        let issues = detect(&tree, source, "m.py");
        assert_eq!(issues.len(), 1);
    }

    #[test]
    fn test_dunder_is_exempt() {
        let source = "def __init__(self):\n    \"\"\"Init.\"\"\"\n    pass\n";
        let manager = ParserManager::new();
        let tree = manager.parse(source, Language::Python).unwrap();
        let issues = detect(&tree, source, "m.py");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_function_with_real_body_is_not_flagged() {
        let source = "def handle(x):\n    \"\"\"Handle x.\"\"\"\n    return x + 1\n";
        let manager = ParserManager::new();
        let tree = manager.parse(source, Language::Python).unwrap();
        let issues = detect(&tree, source, "m.py");
        assert!(issues.is_empty());
    }
}
