//! DEAD_CLI_FLAG: a `add_argument('--foo', ...)` registration whose flag
//! name is never referenced anywhere else in the module (severity ERROR).

use std::sync::LazyLock;

use regex::Regex;
use tree_sitter::{Node, Tree};

use assemblyzero_state::{CompletenessIssue, IssueCategory, Severity};

use super::{line_of, node_text};

static FLAG_LITERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^['"]--([A-Za-z0-9][A-Za-z0-9_-]*)['"]$"#).unwrap());

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
    if node.kind() == "call" {
        if let Some(issue) = check_call(node, source, file_path) {
            issues.push(issue);
        }
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

fn check_call(call: Node, source: &str, file_path: &str) -> Option<CompletenessIssue> {
    let function = call.child_by_field_name("function")?;
    let method_name = match function.kind() {
        "attribute" => {
            let attr = function.child_by_field_name("attribute")?;
            node_text(attr, source)
        }
        "identifier" => node_text(function, source),
        _ => return None,
    };
    if method_name != "add_argument" {
        return None;
    }

    let arguments = call.child_by_field_name("arguments")?;
    let mut cursor = arguments.walk();
    let first_arg = arguments
        .children(&mut cursor)
        .find(|c| c.kind() == "string")?;

    let literal = node_text(first_arg, source);
    let caps = FLAG_LITERAL.captures(literal)?;
    let flag_name = caps.get(1)?.as_str().replace('-', "_");

    let word_re = Regex::new(&format!(r"\b{}\b", regex::escape(&flag_name))).ok()?;
    let occurrences = word_re.find_iter(source).count();
    if occurrences > 1 {
        return None;
    }

    Some(CompletenessIssue {
        category: IssueCategory::DeadCliFlag,
        file_path: file_path.to_string(),
        line_number: line_of(call),
        description: format!("flag '--{flag_name}' is registered but never referenced"),
        severity: Severity::Error,
    })
}
