//! Layer 2 — prepares `ReviewMaterials` for the (external) semantic
//! reviewer. Runs only when Layer 1's verdict is not `BLOCK` (spec.md
//! §4.6). Never calls the reviewer itself.

use std::sync::LazyLock;

use regex::Regex;

use assemblyzero_state::ReviewMaterials;

const SOURCE_EXTENSIONS: &[&str] = &["py", "rs", "js", "mjs", "cjs", "ts", "go", "java"];

static REQUIREMENTS_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^##\s*3\.?\s*Requirements\s*$").unwrap());
static NEXT_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^##\s*\d+[.\s]").unwrap());
static ITEM_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[ \t]*(\d+)\.[ \t]+").unwrap());

/// Extract numbered requirements from the LLD's `## 3. Requirements`
/// section (or `## 3 Requirements`), stopping at the next `## N …` heading.
///
/// Each requirement's text spans from the end of its `N. ` marker up to the
/// start of the next marker (or the end of the section), so continuation
/// lines fold into the same requirement (spec.md §6 "Multi-line
/// requirements collapse whitespace").
///
/// An LLD with no such section yields an empty list rather than an error
/// (spec.md §8 boundary behavior).
#[must_use]
pub fn extract_requirements(lld_contents: &str) -> Vec<(String, String)> {
    let Some(heading_match) = REQUIREMENTS_HEADING.find(lld_contents) else {
        return Vec::new();
    };

    let section_start = heading_match.end();
    let rest = &lld_contents[section_start..];
    let section_end = NEXT_HEADING.find(rest).map(|m| m.start()).unwrap_or(rest.len());
    let section = &rest[..section_end];

    let markers: Vec<(String, usize, usize)> = ITEM_MARKER
        .captures_iter(section)
        .map(|c| {
            let whole = c.get(0).unwrap();
            (c[1].to_string(), whole.start(), whole.end())
        })
        .collect();

    markers
        .iter()
        .enumerate()
        .map(|(i, (id, _marker_start, text_start))| {
            let text_end = markers.get(i + 1).map(|(_, next_start, _)| *next_start).unwrap_or(section.len());
            (id.clone(), collapse_whitespace(&section[*text_start..text_end]))
        })
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collect the source of every implementation file whose extension
/// indicates a source language, silently skipping files that are missing
/// or whose suffix does not match.
#[must_use]
pub fn collect_code_snippets(implementation_files: &[String]) -> Vec<(String, String)> {
    implementation_files
        .iter()
        .filter(|path| {
            path.rsplit('.')
                .next()
                .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
        })
        .filter_map(|path| std::fs::read_to_string(path).ok().map(|src| (path.clone(), src)))
        .collect()
}

#[must_use]
pub fn prepare(lld_contents: &str, implementation_files: &[String], issue_number: u64) -> ReviewMaterials {
    ReviewMaterials {
        lld_requirements: extract_requirements(lld_contents),
        code_snippets: collect_code_snippets(implementation_files),
        issue_number,
    }
}
