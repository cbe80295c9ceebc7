//! Resolves where the checkpoint store lives for the current process.
//!
//! Resolution order: `AGENTOS_WORKFLOW_DB` environment override, then the
//! enclosing git working-tree root (`{root}/.agentos/issue_workflow.db`),
//! seeding `.agentos/.gitignore` with `*` the first time the directory is
//! created. The result is memoized once per process.

pub mod error;

pub use error::LocationError;

use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};

const ENV_OVERRIDE: &str = "AGENTOS_WORKFLOW_DB";
const CHECKPOINT_DB_NAME: &str = "issue_workflow.db";
const AGENTOS_DIR: &str = ".agentos";
const GIT_TIMEOUT: Duration = Duration::from_secs(2);

static CACHE: OnceLock<Result<Utf8PathBuf, LocationError>> = OnceLock::new();

/// Resolve the checkpoint database path for this process, memoizing the
/// result after the first call.
///
/// This is a synchronous, potentially blocking call (it may spawn `git` as
/// a subprocess). Callers on an async executor should invoke it via
/// `spawn_blocking`.
pub fn resolve_checkpoint_path() -> Result<Utf8PathBuf, LocationError> {
    CACHE.get_or_init(resolve_uncached).clone()
}

fn resolve_uncached() -> Result<Utf8PathBuf, LocationError> {
    if let Some(path) = env_override() {
        let path = expand_to_absolute(&path)?;
        tracing::debug!(path = %path, "checkpoint location from environment override");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent.as_std_path())?;
        }
        return Ok(path);
    }

    let toplevel = git_toplevel_with_timeout(GIT_TIMEOUT)?;
    ensure_agentos_dir(&toplevel)?;

    Ok(toplevel.join(AGENTOS_DIR).join(CHECKPOINT_DB_NAME))
}

fn env_override() -> Option<String> {
    std::env::var(ENV_OVERRIDE).ok().filter(|v| !v.is_empty())
}

/// Expand `~` and `$VAR`/`${VAR}` references in a raw path string, then
/// resolve the result to an absolute path relative to the current
/// directory if it isn't one already (spec.md §4.1 step 1).
fn expand_to_absolute(raw: &str) -> Result<Utf8PathBuf, LocationError> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| LocationError::Io(format!("expanding '{raw}': {e}")))?;
    let expanded = Utf8PathBuf::from(expanded.into_owned());

    if expanded.is_absolute() {
        return Ok(expanded);
    }

    let cwd = std::env::current_dir()?;
    let cwd = Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| LocationError::Io(format!("current directory '{}' is not UTF-8", p.display())))?;
    Ok(cwd.join(expanded))
}

/// Invoke `git rev-parse --show-toplevel` with a bounded timeout.
///
/// Implemented as a blocking worker thread + channel rather than a direct
/// call, since `std::process::Command` has no built-in timeout and this
/// crate's public API is deliberately synchronous.
fn git_toplevel_with_timeout(timeout: Duration) -> Result<Utf8PathBuf, LocationError> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();
        let _ = tx.send(result);
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok(output)) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let trimmed = stdout.trim();
            if trimmed.is_empty() {
                return Err(LocationError::Unresolvable {
                    searched: vec!["git rev-parse --show-toplevel (empty output)".to_string()],
                });
            }
            Ok(Utf8PathBuf::from(trimmed))
        }
        Ok(Ok(output)) => {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(LocationError::Unresolvable {
                searched: vec![format!("git rev-parse --show-toplevel (not a repository: {stderr})")],
            })
        }
        Ok(Err(e)) => Err(LocationError::GitInvocationFailed {
            reason: e.to_string(),
        }),
        Err(mpsc::RecvTimeoutError::Timeout) => Err(LocationError::GitInvocationFailed {
            reason: format!("git rev-parse timed out after {timeout:?}"),
        }),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(LocationError::GitInvocationFailed {
            reason: "git worker thread disconnected without a result".to_string(),
        }),
    }
}

fn ensure_agentos_dir(repo_root: &Utf8Path) -> Result<(), LocationError> {
    let dir = repo_root.join(AGENTOS_DIR);
    std::fs::create_dir_all(dir.as_std_path())?;

    let gitignore = dir.join(".gitignore");
    if !gitignore.as_std_path().exists() {
        assemblyzero_utils::atomic_write::write_file_atomic(&gitignore, "*\n")
            .map_err(|e| LocationError::Io(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_env_override_wins() {
        // SAFETY: serialized via #[serial] so no other test observes this
        // process's environment concurrently.
        unsafe {
            std::env::set_var(ENV_OVERRIDE, "/tmp/x.db");
        }
        let result = env_override();
        unsafe {
            std::env::remove_var(ENV_OVERRIDE);
        }
        assert_eq!(result.as_deref(), Some("/tmp/x.db"));
    }

    #[test]
    fn test_env_override_empty_is_ignored() {
        assert_eq!(
            {
                // Directly exercise the filter logic without mutating global env.
                let raw = Some(String::new());
                raw.filter(|v: &String| !v.is_empty())
            },
            None
        );
    }

    #[test]
    fn test_expand_to_absolute_passes_through_absolute_path() {
        let result = expand_to_absolute("/tmp/x.db").unwrap();
        assert_eq!(result, Utf8PathBuf::from("/tmp/x.db"));
    }

    #[test]
    #[serial]
    fn test_expand_to_absolute_expands_tilde() {
        let home = std::env::var("HOME").unwrap();
        let result = expand_to_absolute("~/wf/db.sqlite").unwrap();
        assert_eq!(result, Utf8PathBuf::from(format!("{home}/wf/db.sqlite")));
    }

    #[test]
    #[serial]
    fn test_expand_to_absolute_expands_env_var() {
        // SAFETY: serialized via #[serial] so no other test observes this
        // process's environment concurrently.
        unsafe {
            std::env::set_var("ASSEMBLYZERO_TEST_DB_DIR", "/tmp/azero-test-dir");
        }
        let result = expand_to_absolute("$ASSEMBLYZERO_TEST_DB_DIR/db.sqlite");
        unsafe {
            std::env::remove_var("ASSEMBLYZERO_TEST_DB_DIR");
        }
        assert_eq!(result.unwrap(), Utf8PathBuf::from("/tmp/azero-test-dir/db.sqlite"));
    }

    #[test]
    fn test_expand_to_absolute_resolves_relative_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let result = expand_to_absolute("relative/db.sqlite").unwrap();
        assert_eq!(result, Utf8PathBuf::from_path_buf(cwd.join("relative/db.sqlite")).unwrap());
    }

    #[test]
    #[serial]
    fn test_resolve_uncached_env_override_creates_parent_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let db_path = dir.path().join("nested").join("deeper").join("issue_workflow.db");
        // SAFETY: serialized via #[serial] so no other test observes this
        // process's environment concurrently.
        unsafe {
            std::env::set_var(ENV_OVERRIDE, &db_path);
        }
        let result = resolve_uncached();
        unsafe {
            std::env::remove_var(ENV_OVERRIDE);
        }
        let resolved = result.unwrap();
        assert_eq!(resolved.as_std_path(), db_path);
        assert!(db_path.parent().unwrap().is_dir());
    }
}
