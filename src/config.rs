//! Run configuration. Every field has a default matching the conventional
//! multi-service Maven layout; the CLI can override any of them.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::filter::{ExclusionFilter, DEFAULT_EXCLUSIONS};

pub const DEFAULT_REPORT_PATTERN: &str = "services/*/target/site/jacoco/jacoco.xml";

pub const DEFAULT_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the report pattern is resolved against.
    pub root: PathBuf,
    /// Glob locating jacoco.xml files, relative to `root`.
    pub pattern: String,
    /// Exclusion globs handed to [`ExclusionFilter`].
    pub exclusions: Vec<String>,
    /// Reports and files below this percentage get a breakdown.
    pub threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            pattern: DEFAULT_REPORT_PATTERN.to_string(),
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        Ok(())
    }

    pub fn exclusion_filter(&self) -> Result<ExclusionFilter> {
        ExclusionFilter::new(&self.exclusions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.exclusions.len(), 7);
        assert!(config.exclusion_filter().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range() {
        for threshold in [-1.0, 100.5, f64::NAN] {
            let config = Config {
                threshold,
                ..Config::default()
            };
            assert!(matches!(config.validate(), Err(Error::InvalidThreshold(_))));
        }
    }
}
