//! Configuration discovery for the `assemblyzero` driver (SPEC_FULL.md §0).
//!
//! Precedence is CLI flags > environment > config file > built-in
//! defaults. The config file is `.agentos/config.toml`, discovered by
//! walking up from the current directory and stopping at the first
//! repository root marker (`.git`) or filesystem root, mirroring the
//! reference workspace's own upward-search discovery.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One collaborator's process backend: the command to run and how long to
/// wait for it before treating the call as a `CollaboratorTimeout`.
#[derive(Debug, Clone, Deserialize)]
pub struct CollaboratorCommand {
    pub command: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    120
}

impl CollaboratorCommand {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// The six collaborator process backends, keyed by role (spec.md §6).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollaboratorsConfig {
    pub test_plan_reviewer: Option<CollaboratorCommand>,
    pub test_scaffolder: Option<CollaboratorCommand>,
    pub test_runner: Option<CollaboratorCommand>,
    pub code_implementer: Option<CollaboratorCommand>,
    pub semantic_reviewer: Option<CollaboratorCommand>,
    pub issue_filer: Option<CollaboratorCommand>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TomlConfig {
    #[serde(default)]
    max_iterations: Option<u32>,
    #[serde(default)]
    collaborators: CollaboratorsConfig,
}

/// Resolved runtime configuration, after merging defaults, file, and
/// environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub max_iterations: u32,
    pub collaborators: CollaboratorsConfig,
    /// Path the config was loaded from, if any (for `doctor` reporting).
    pub source_path: Option<PathBuf>,
}

const DEFAULT_MAX_ITERATIONS: u32 = 10;
const CONFIG_DIR: &str = ".agentos";
const CONFIG_FILE: &str = "config.toml";

impl Config {
    /// Discover and load configuration, starting from the current
    /// directory.
    pub fn discover(explicit_path: Option<&Path>) -> Result<Self> {
        let start_dir = std::env::current_dir().context("determining current directory")?;
        Self::discover_from(&start_dir, explicit_path)
    }

    /// Path-driven variant used by tests to avoid relying on process CWD.
    pub fn discover_from(start_dir: &Path, explicit_path: Option<&Path>) -> Result<Self> {
        let config_path = match explicit_path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::find_config_file(start_dir),
        };

        let file_config = match &config_path {
            Some(path) => Self::load_file(path)
                .with_context(|| format!("loading config file {}", path.display()))?,
            None => TomlConfig::default(),
        };

        let max_iterations = std::env::var("ASSEMBLYZERO_MAX_ITERATIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file_config.max_iterations)
            .unwrap_or(DEFAULT_MAX_ITERATIONS);

        Ok(Self {
            max_iterations,
            collaborators: file_config.collaborators,
            source_path: config_path,
        })
    }

    fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_DIR).join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            if current.join(".git").exists() || current.parent().is_none() {
                return None;
            }
            current = current.parent()?.to_path_buf();
        }
    }

    fn load_file(path: &Path) -> Result<TomlConfig> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TomlConfig::default()),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::discover_from(dir.path(), None).unwrap();
        assert_eq!(config.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert!(config.source_path.is_none());
    }

    #[test]
    fn test_file_overrides_default_max_iterations() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".agentos")).unwrap();
        std::fs::write(
            dir.path().join(".agentos").join("config.toml"),
            "max_iterations = 25\n",
        )
        .unwrap();

        let config = Config::discover_from(dir.path(), None).unwrap();
        assert_eq!(config.max_iterations, 25);
        assert!(config.source_path.is_some());
    }

    #[test]
    fn test_discovery_stops_at_git_root() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Config::discover_from(&nested, None).unwrap();
        assert!(config.source_path.is_none());
    }

    #[test]
    fn test_explicit_path_wins_over_discovery() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("custom.toml");
        std::fs::write(&explicit, "max_iterations = 3\n").unwrap();

        let config = Config::discover_from(dir.path(), Some(&explicit)).unwrap();
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.source_path.as_deref(), Some(explicit.as_path()));
    }
}
