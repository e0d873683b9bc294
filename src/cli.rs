//! Command handler for the jacosum CLI.
//!
//! `cmd_summarize` returns its output as a `String`, making it easy to test
//! without capturing stdout.

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::aggregate::summarize_file;
use crate::config::Config;
use crate::locate::{display_path, find_reports};
use crate::model::ReportOutcome;
use crate::parsers::jacoco::JacocoParser;
use crate::report::{CoverageSummary, JsonFormatter, TextFormatter};

/// Output style for the summary.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum Style {
    #[default]
    Text,
    Json,
}

/// Locate every report, summarize each one independently and format the
/// result. A report that cannot be read or parsed becomes an error entry;
/// only configuration problems fail the whole run.
pub fn cmd_summarize(config: &Config, style: &Style) -> Result<String> {
    config.validate()?;
    let filter = config
        .exclusion_filter()
        .context("Invalid exclusion pattern")?;
    let reports = find_reports(&config.root, &config.pattern)
        .with_context(|| format!("Failed to locate reports under {}", config.root.display()))?;

    let outcomes = reports
        .iter()
        .map(|path| {
            let result = summarize_file(path, &JacocoParser, &filter).map_err(|e| {
                tracing::warn!(path = %path.display(), error = %e, "failed to summarize report");
                e.to_string()
            });
            ReportOutcome {
                path: display_path(&config.root, path),
                result,
            }
        })
        .collect();

    let summary = CoverageSummary {
        outcomes,
        threshold: config.threshold,
    };

    let output = match style {
        Style::Text => summary.format(&TextFormatter),
        Style::Json => summary.format(&JsonFormatter),
    };

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_report(root: &Path, service: &str, xml: &str) {
        let dir = root.join("services").join(service).join("target/site/jacoco");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("jacoco.xml"), xml).unwrap();
    }

    fn config(root: &Path) -> Config {
        Config {
            root: root.to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_cmd_summarize_no_reports() {
        let dir = tempfile::tempdir().unwrap();
        let out = cmd_summarize(&config(dir.path()), &Style::Text).unwrap();
        assert_eq!(out, "No jacoco.xml files found\n");
    }

    #[test]
    fn test_cmd_summarize_single_report() {
        let dir = tempfile::tempdir().unwrap();
        write_report(
            dir.path(),
            "orders",
            r#"<report name="orders"><package name="com/example/service">
                <sourcefile name="Foo.java">
                  <counter type="INSTRUCTION" missed="10" covered="90"/>
                </sourcefile>
              </package></report>"#,
        );

        let out = cmd_summarize(&config(dir.path()), &Style::Text).unwrap();
        assert_eq!(
            out,
            "services/orders/target/site/jacoco/jacoco.xml: Coverage=90.0% (Covered=90, Total=100)\n\
             \n\
             Total Filtered Coverage: 90.0%\n"
        );
    }

    #[test]
    fn test_cmd_summarize_rejects_bad_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config {
            threshold: 120.0,
            ..config(dir.path())
        };
        assert!(cmd_summarize(&cfg, &Style::Text).is_err());
    }

    #[test]
    fn test_cmd_summarize_rejects_bad_exclusion() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config {
            exclusions: vec!["**/[oops/**".to_string()],
            ..config(dir.path())
        };
        let err = cmd_summarize(&cfg, &Style::Text).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid exclusion pattern"));
    }
}
