//! Finds the jacoco.xml reports to summarize.

use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::{Error, Result};

/// Expand `pattern` under `root` and return the matching regular files,
/// sorted by path so output is reproducible.
pub fn find_reports(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = format!(
        "{}/{}",
        Pattern::escape(&root.to_string_lossy()).trim_end_matches('/'),
        pattern.trim_start_matches("./")
    );

    let entries = glob::glob(&full).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut reports: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable path");
                None
            }
        })
        .filter(|p| p.is_file())
        .collect();
    reports.sort();

    tracing::debug!(count = reports.len(), pattern = %full, "located reports");
    Ok(reports)
}

/// The path as shown to the user: relative to `root` when it lies under it.
#[must_use]
pub fn display_path(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"<report/>").unwrap();
    }

    #[test]
    fn test_find_reports_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "services/payments/target/site/jacoco/jacoco.xml");
        touch(dir.path(), "services/accounts/target/site/jacoco/jacoco.xml");
        touch(dir.path(), "services/accounts/target/site/jacoco/other.xml");
        touch(dir.path(), "libs/common/target/site/jacoco/jacoco.xml");

        let found = find_reports(dir.path(), "services/*/target/site/jacoco/jacoco.xml").unwrap();
        let shown: Vec<PathBuf> = found.iter().map(|p| display_path(dir.path(), p)).collect();
        assert_eq!(
            shown,
            vec![
                PathBuf::from("services/accounts/target/site/jacoco/jacoco.xml"),
                PathBuf::from("services/payments/target/site/jacoco/jacoco.xml"),
            ]
        );
    }

    #[test]
    fn test_find_reports_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("services/a/target/site/jacoco/jacoco.xml"))
            .unwrap();
        let found = find_reports(dir.path(), "services/*/target/site/jacoco/jacoco.xml").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_find_reports_none() {
        let dir = tempfile::tempdir().unwrap();
        let found = find_reports(dir.path(), "services/*/target/site/jacoco/jacoco.xml").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_reports(dir.path(), "services/[/jacoco.xml").unwrap_err();
        assert!(matches!(err, Error::Pattern { .. }));
    }

    #[test]
    fn test_display_path_outside_root() {
        let path = Path::new("/elsewhere/jacoco.xml");
        assert_eq!(display_path(Path::new("/root"), path), path);
    }
}
