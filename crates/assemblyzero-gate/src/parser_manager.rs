//! Per-language cached tree-sitter parsers.

use std::collections::HashMap;
use std::sync::Mutex;

use tree_sitter::{Parser, Tree};

use crate::error::GateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    Rust,
    JavaScript,
}

impl Language {
    /// Infer the language from a file's extension. Returns `None` for
    /// extensions the gate does not analyze (those files are skipped, not
    /// errored).
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = path.rsplit('.').next()?;
        match ext {
            "py" => Some(Self::Python),
            "rs" => Some(Self::Rust),
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            _ => None,
        }
    }

    fn grammar(self) -> tree_sitter::Language {
        match self {
            Self::Python => tree_sitter_python::LANGUAGE.into(),
            Self::Rust => tree_sitter_rust::LANGUAGE.into(),
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

/// Caches one `tree_sitter::Parser` per language for the lifetime of the
/// gate, avoiding repeated grammar loading across the many files a single
/// completeness check analyzes.
pub struct ParserManager {
    parsers: Mutex<HashMap<Language, Parser>>,
}

impl ParserManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Mutex::new(HashMap::new()),
        }
    }

    pub fn parse(&self, source: &str, language: Language) -> Result<Tree, GateError> {
        let mut cache = self.parsers.lock().unwrap();
        let parser = cache.entry(language).or_insert_with(|| {
            let mut parser = Parser::new();
            parser
                .set_language(&language.grammar())
                .expect("grammar crate and tree-sitter core version must match");
            parser
        });

        parser
            .parse(source, None)
            .ok_or_else(|| GateError::ParseFailed(format!("{language:?}")))
    }
}

impl Default for ParserManager {
    fn default() -> Self {
        Self::new()
    }
}
