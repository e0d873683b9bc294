use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create an empty workspace root in a temp dir.
/// The caller must hold onto `TempDir` to keep the temp directory alive.
pub fn setup_root() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    (dir, root)
}

/// Write `xml` to `services/<service>/target/site/jacoco/jacoco.xml`.
pub fn write_report(root: &Path, service: &str, xml: &[u8]) -> PathBuf {
    let dir = root
        .join("services")
        .join(service)
        .join("target/site/jacoco");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("jacoco.xml");
    std::fs::write(&path, xml).unwrap();
    path
}

/// A minimal report with one INSTRUCTION counter per `(package, file, missed, covered)`.
pub fn jacoco_xml(files: &[(&str, &str, u64, u64)]) -> Vec<u8> {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><report name="test">"#);
    for (package, name, missed, covered) in files {
        xml.push_str(&format!(
            r#"<package name="{package}"><sourcefile name="{name}"><counter type="INSTRUCTION" missed="{missed}" covered="{covered}"/></sourcefile></package>"#
        ));
    }
    xml.push_str("</report>");
    xml.into_bytes()
}
