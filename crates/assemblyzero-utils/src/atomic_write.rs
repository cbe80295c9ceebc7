//! Atomic file writes: temp file + fsync + rename.
//!
//! Used by the checkpoint store's companions (the completeness gate's
//! implementation report, audit artifacts) so a crash mid-write never
//! leaves a half-written file visible to a concurrent reader.

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

#[cfg(target_os = "windows")]
use std::{thread, time::Duration};

/// Outcome of an atomic write, including any retries or fallbacks taken.
#[derive(Debug, Clone, Default)]
pub struct AtomicWriteResult {
    /// Number of rename retries that occurred (Windows only).
    pub rename_retry_count: u32,
    /// Whether a cross-filesystem copy fallback was used.
    pub used_cross_filesystem_fallback: bool,
    /// Any warnings generated during the operation.
    pub warnings: Vec<String>,
}

/// Atomically write `content` to `path` via temp file + fsync + rename.
///
/// Line endings are normalized to LF. Parent directories are created as
/// needed.
pub fn write_file_atomic(path: &Utf8Path, content: &str) -> Result<AtomicWriteResult> {
    let mut result = AtomicWriteResult::default();
    let normalized = normalize_line_endings(content);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent directory: {parent}"))?;
    }

    let temp_dir = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let mut temp_file = NamedTempFile::new_in(temp_dir)
        .with_context(|| format!("failed to create temporary file in: {temp_dir}"))?;

    temp_file
        .write_all(normalized.as_bytes())
        .context("failed to write content to temporary file")?;
    temp_file
        .as_file()
        .sync_all()
        .context("failed to fsync temporary file")?;

    let temp_path = temp_file.path().to_path_buf();

    match atomic_rename(temp_file, path.as_std_path()) {
        Ok(retry_count) => {
            result.rename_retry_count = retry_count;
            if retry_count > 0 {
                result.warnings.push(format!(
                    "rename required {retry_count} retries due to transient filesystem locks"
                ));
            }
        }
        Err(e) if is_cross_filesystem_error(&e) => {
            result.used_cross_filesystem_fallback = true;
            result
                .warnings
                .push("used cross-filesystem fallback (copy, fsync, replace)".to_string());
            cross_filesystem_copy_from_path(&temp_path, path)?;
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to atomically write file: {path}"));
        }
    }

    Ok(result)
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Rename with bounded exponential backoff (Windows can transiently deny
/// renames while an antivirus or indexer holds the temp file open).
#[cfg(target_os = "windows")]
fn atomic_rename(mut temp_file: NamedTempFile, target: &Path) -> Result<u32> {
    use std::io::ErrorKind;

    const MAX_RETRIES: u32 = 5;
    const INITIAL_DELAY_MS: u64 = 10;
    const MAX_TOTAL_DELAY_MS: u64 = 250;

    let mut retry_count = 0;
    let mut total_delay_ms = 0;

    loop {
        match temp_file.persist(target) {
            Ok(_) => return Ok(retry_count),
            Err(persist_error) => {
                if retry_count >= MAX_RETRIES {
                    return Err(anyhow::anyhow!(persist_error.error));
                }
                let retryable = matches!(
                    persist_error.error.kind(),
                    ErrorKind::PermissionDenied | ErrorKind::Other
                );
                if !retryable {
                    return Err(anyhow::anyhow!(persist_error.error));
                }

                let delay_ms = INITIAL_DELAY_MS * 2_u64.pow(retry_count);
                if total_delay_ms + delay_ms > MAX_TOTAL_DELAY_MS {
                    let remaining = MAX_TOTAL_DELAY_MS.saturating_sub(total_delay_ms);
                    if remaining > 0 {
                        thread::sleep(Duration::from_millis(remaining));
                    }
                    return persist_error
                        .file
                        .persist(target)
                        .map(|_| retry_count + 1)
                        .map_err(|e| anyhow::anyhow!(e.error));
                }

                thread::sleep(Duration::from_millis(delay_ms));
                total_delay_ms += delay_ms;
                retry_count += 1;
                temp_file = persist_error.file;
            }
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn atomic_rename(temp_file: NamedTempFile, target: &Path) -> Result<u32> {
    temp_file
        .persist(target)
        .map(|_| 0)
        .map_err(|e| anyhow::anyhow!(e.error))
}

#[cfg(unix)]
fn is_cross_filesystem_error(err: &anyhow::Error) -> bool {
    use std::io::ErrorKind;

    if let Some(io_error) = err.downcast_ref::<std::io::Error>() {
        if io_error.kind() != ErrorKind::Other {
            return false;
        }
        matches!(io_error.raw_os_error(), Some(18)) // EXDEV
    } else {
        false
    }
}

#[cfg(windows)]
fn is_cross_filesystem_error(_err: &anyhow::Error) -> bool {
    false
}

fn cross_filesystem_copy_from_path(temp_path: &Path, target: &Utf8Path) -> Result<()> {
    let content =
        fs::read(temp_path).context("failed to read temporary file for cross-filesystem copy")?;

    let target_dir = target.parent().unwrap_or_else(|| Utf8Path::new("."));
    let mut target_temp = NamedTempFile::new_in(target_dir)
        .with_context(|| format!("failed to create temp file in target directory: {target_dir}"))?;

    target_temp
        .write_all(&content)
        .context("failed to write content during cross-filesystem copy")?;
    target_temp
        .as_file()
        .sync_all()
        .context("failed to fsync during cross-filesystem copy")?;
    target_temp
        .persist(target.as_std_path())
        .map_err(|e| anyhow::anyhow!(e.error))
        .context("failed to persist during cross-filesystem copy")?;

    let _ = fs::remove_file(temp_path);
    Ok(())
}
