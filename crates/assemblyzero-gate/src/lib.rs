//! The completeness gate (N4b, spec.md §4.6): a two-layer validator that
//! guards the transition from code generation to test verification.
//!
//! Layer 1 parses each implementation file as an AST and runs five
//! syntactic detectors. Layer 2, run only when Layer 1 does not `BLOCK`,
//! prepares `ReviewMaterials` for the (external, orchestrator-invoked)
//! semantic reviewer — it never calls that reviewer itself.

pub mod detectors;
pub mod error;
pub mod parser_manager;
pub mod report;
pub mod review_materials;
pub mod size_guard;
pub mod verdict;

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use camino::Utf8Path;

use assemblyzero_state::{CompletenessIssue, CompletenessResult, CompletenessVerdict, ReviewMaterials};

use parser_manager::{Language, ParserManager};

pub struct CompletenessGate {
    parser_manager: ParserManager,
    max_file_bytes: u64,
}

impl Default for CompletenessGate {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletenessGate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser_manager: ParserManager::new(),
            max_file_bytes: size_guard::DEFAULT_MAX_FILE_BYTES,
        }
    }

    #[must_use]
    pub fn with_max_file_bytes(mut self, max_bytes: u64) -> Self {
        self.max_file_bytes = max_bytes;
        self
    }

    /// Run Layer 1 and (if applicable) Layer 2, then write the
    /// implementation report. Never panics out to the caller: an internal
    /// analysis failure is the `AnalysisCrash` kind (spec.md §7), handled by
    /// failing open with an empty-issue `WARN` verdict.
    pub fn run(
        &self,
        implementation_files: &[String],
        lld_contents: &str,
        repo_root: &Utf8Path,
        issue_number: u64,
    ) -> (CompletenessResult, Option<ReviewMaterials>) {
        let start = Instant::now();

        let analysis = panic::catch_unwind(AssertUnwindSafe(|| self.analyze_files(implementation_files)));

        let (issues, verdict) = match analysis {
            Ok(issues) => {
                let verdict = verdict::aggregate(&issues);
                (issues, verdict)
            }
            Err(_) => {
                tracing::warn!("completeness gate Layer 1 analysis panicked; failing open with WARN");
                (Vec::new(), CompletenessVerdict::Warn)
            }
        };

        let ast_analysis_ms = start.elapsed().as_millis() as u64;

        let review_materials = if verdict != CompletenessVerdict::Block {
            Some(review_materials::prepare(lld_contents, implementation_files, issue_number))
        } else {
            None
        };

        let lld_requirements = review_materials
            .as_ref()
            .map(|m| m.lld_requirements.clone())
            .unwrap_or_default();

        report::write_report(
            repo_root,
            &report::ReportInputs {
                issue_number,
                timestamp: assemblyzero_utils::now_utc(),
                verdict,
                issues: &issues,
                ast_analysis_ms,
                analyzed_files: implementation_files,
                lld_requirements: &lld_requirements,
            },
        );

        let result = CompletenessResult {
            verdict,
            issues,
            ast_analysis_ms,
            gemini_review_ms: None,
        };

        (result, review_materials)
    }

    fn analyze_files(&self, implementation_files: &[String]) -> Vec<CompletenessIssue> {
        let mut issues = Vec::new();

        for path in implementation_files {
            let Some(language) = Language::from_path(path) else {
                continue;
            };

            let utf8_path = Utf8Path::new(path);
            if !size_guard::within_limit(utf8_path, self.max_file_bytes) {
                tracing::warn!(file = %path, "skipping file over size guard limit");
                continue;
            }

            let Ok(source) = std::fs::read_to_string(path) else {
                tracing::warn!(file = %path, "skipping unreadable file");
                continue;
            };

            let Ok(tree) = self.parser_manager.parse(&source, language) else {
                tracing::warn!(file = %path, "skipping unparseable file");
                continue;
            };

            issues.extend(detectors::run_all(&tree, &source, path, language));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assemblyzero_state::CompletenessVerdict;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_list_passes() {
        let gate = CompletenessGate::new();
        let repo = TempDir::new().unwrap();
        let repo_root = Utf8Path::from_path(repo.path()).unwrap();
        let (result, materials) = gate.run(&[], "## 3. Requirements\n\n1. Do it.\n", repo_root, 1);
        assert_eq!(result.verdict, CompletenessVerdict::Pass);
        assert!(result.issues.is_empty());
        assert!(materials.is_some());
    }

    #[test]
    fn test_dead_cli_flag_blocks() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("cli.py");
        let mut file = std::fs::File::create(&file_path).unwrap();
        writeln!(file, "parser.add_argument('--foo', action='store_true')").unwrap();

        let gate = CompletenessGate::new();
        let repo_root = Utf8Path::from_path(dir.path()).unwrap();
        let (result, materials) = gate.run(
            &[file_path.to_string_lossy().to_string()],
            "## 3. Requirements\n\n1. Support --foo.\n",
            repo_root,
            7,
        );
        assert_eq!(result.verdict, CompletenessVerdict::Block);
        assert!(materials.is_none());
    }

    #[test]
    fn test_clean_code_passes() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("lib.py");
        let mut file = std::fs::File::create(&file_path).unwrap();
        writeln!(file, "def add(a, b):\n    return a + b\n").unwrap();

        let gate = CompletenessGate::new();
        let repo_root = Utf8Path::from_path(dir.path()).unwrap();
        let (result, _materials) = gate.run(
            &[file_path.to_string_lossy().to_string()],
            "## 3. Requirements\n\n1. Add two numbers.\n",
            repo_root,
            7,
        );
        assert_eq!(result.verdict, CompletenessVerdict::Pass);
    }
}
