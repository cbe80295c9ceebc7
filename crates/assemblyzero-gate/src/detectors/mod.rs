//! Layer 1 syntactic detectors (spec.md §4.6).
//!
//! Each detector takes a parsed tree plus the original source and returns
//! zero or more issues. Detectors never error: a detector that cannot make
//! sense of a node simply skips it, leaving crash-handling to the gate's
//! fail-open wrapper around the whole analysis pass.

mod dead_cli_flag;
mod docstring_only;
mod empty_branch;
mod trivial_assertion;
mod unused_import;

use tree_sitter::Tree;

use assemblyzero_state::CompletenessIssue;

use crate::parser_manager::Language;

/// Run every detector applicable to `language` over one parsed file.
#[must_use]
pub fn run_all(tree: &Tree, source: &str, file_path: &str, language: Language) -> Vec<CompletenessIssue> {
    let mut issues = Vec::new();

    match language {
        Language::Python => {
            issues.extend(dead_cli_flag::detect(tree, source, file_path));
            issues.extend(docstring_only::detect(tree, source, file_path));
            issues.extend(trivial_assertion::detect(tree, source, file_path));
        }
        Language::Rust | Language::JavaScript => {}
    }

    // EMPTY_BRANCH and UNUSED_IMPORT generalize across the three grammars
    // since all three share "block with a single trivial statement" and
    // "top-level import never referenced" shapes.
    issues.extend(empty_branch::detect(tree, source, file_path, language));
    issues.extend(unused_import::detect(tree, source, file_path, language));

    issues
}

pub(crate) fn node_text<'a>(node: tree_sitter::Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

pub(crate) fn line_of(node: tree_sitter::Node) -> u32 {
    node.start_position().row as u32 + 1
}
