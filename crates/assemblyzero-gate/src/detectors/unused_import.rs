//! UNUSED_IMPORT: a symbol imported at module top-level that is never
//! referenced within any function body (severity WARNING).
//!
//! Import lines are easier to enumerate with per-language regexes than with
//! tree-sitter field names that vary across grammars; the AST is still what
//! backs the other four detectors.

use std::sync::LazyLock;

use regex::Regex;
use tree_sitter::Tree;

use assemblyzero_state::{CompletenessIssue, IssueCategory, Severity};

use crate::parser_manager::Language;

static PY_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:from\s+\S+\s+)?import\s+(.+?)\s*$").unwrap());
static RUST_USE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*use\s+([\w:]+)\s*;").unwrap());
static JS_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*import\s+\{\s*([^}]+)\s*\}\s+from").unwrap());

pub fn detect(_tree: &Tree, source: &str, file_path: &str, language: Language) -> Vec<CompletenessIssue> {
    let mut issues = Vec::new();

    for (line_no, line) in source.lines().enumerate() {
        let names: Vec<String> = match language {
            Language::Python => PY_IMPORT
                .captures(line)
                .map(|c| split_names(&c[1]))
                .unwrap_or_default(),
            Language::Rust => RUST_USE
                .captures(line)
                .map(|c| {
                    let last_segment = c[1].rsplit("::").next().unwrap_or(&c[1]);
                    vec![last_segment.to_string()]
                })
                .unwrap_or_default(),
            Language::JavaScript => JS_IMPORT
                .captures(line)
                .map(|c| split_names(&c[1]))
                .unwrap_or_default(),
        };

        for name in names {
            let name = name.split(" as ").next().unwrap_or(&name).trim().to_string();
            if name.is_empty() || name == "*" {
                continue;
            }
            let word_re = match Regex::new(&format!(r"\b{}\b", regex::escape(&name))) {
                Ok(re) => re,
                Err(_) => continue,
            };
            let occurrences = word_re.find_iter(source).count();
            if occurrences <= 1 {
                issues.push(CompletenessIssue {
                    category: IssueCategory::UnusedImport,
                    file_path: file_path.to_string(),
                    line_number: (line_no + 1) as u32,
                    description: format!("imported symbol '{name}' is never referenced"),
                    severity: Severity::Warning,
                });
            }
        }
    }

    issues
}

fn split_names(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser_manager::ParserManager;

    #[test]
    fn test_detects_unused_python_import() {
        let source = "import os\nimport sys\n\ndef main():\n    sys.exit(0)\n";
        let manager = ParserManager::new();
        let tree = manager.parse(source, Language::Python).unwrap();
        let issues = detect(&tree, source, "m.py", Language::Python);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].description.contains("os"));
    }

    #[test]
    fn test_used_import_is_not_flagged() {
        let source = "import sys\n\ndef main():\n    sys.exit(0)\n";
        let manager = ParserManager::new();
        let tree = manager.parse(source, Language::Python).unwrap();
        let issues = detect(&tree, source, "m.py", Language::Python);
        assert!(issues.is_empty());
    }
}
