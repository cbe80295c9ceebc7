//! File-size guard (spec.md §4.6): files exceeding the limit are skipped
//! with a logged warning rather than parsed, bounding memory use on
//! generated megascripts.

pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;

/// Returns `true` if the file at `path` is within the size limit and should
/// be analyzed.
pub fn within_limit(path: &camino::Utf8Path, max_bytes: u64) -> bool {
    match std::fs::metadata(path.as_std_path()) {
        Ok(meta) => meta.len() <= max_bytes,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_small_file_within_limit() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"small").unwrap();
        let path = camino::Utf8Path::from_path(file.path()).unwrap();
        assert!(within_limit(path, DEFAULT_MAX_FILE_BYTES));
    }

    #[test]
    fn test_file_exactly_at_limit_is_analyzed() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&vec![b'x'; 10]).unwrap();
        let path = camino::Utf8Path::from_path(file.path()).unwrap();
        assert!(within_limit(path, 10));
    }

    #[test]
    fn test_file_one_byte_over_limit_is_skipped() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&vec![b'x'; 11]).unwrap();
        let path = camino::Utf8Path::from_path(file.path()).unwrap();
        assert!(!within_limit(path, 10));
    }
}
