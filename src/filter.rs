//! Decides which source files count towards filtered coverage.
//!
//! A file is identified by the pseudo-path `package/with/slashes/File.java`.
//! It is excluded when any of these hold:
//!
//!   1. the path matches an exclusion glob, or the package name alone
//!      matches that glob with its leading/trailing `/` and `*` stripped;
//!   2. the package name contains `dto`, `model`, `config`, `exception` or
//!      `security` anywhere (plain substring, so `securityaudit` counts);
//!   3. the file name contains `Application.java`.
//!
//! Rules 2 and 3 are only consulted while at least one glob is configured.
//!
//! Globs follow fnmatch rules after `**/` and `**` are collapsed to `*`:
//! `*` crosses `/`, and matching is case-sensitive.

use glob::Pattern;

use crate::error::{Error, Result};

pub const DEFAULT_EXCLUSIONS: &[&str] = &[
    "**/config/**",
    "**/model/**",
    "**/security/**",
    "**/exception/**",
    "**/*Application.java",
    "**/dto/**",
    "**/src/test/**",
];

const EXCLUDED_PACKAGE_SUBSTRINGS: &[&str] = &["dto", "model", "config", "exception", "security"];

const EXCLUDED_FILE_SUBSTRING: &str = "Application.java";

#[derive(Debug, Clone)]
struct Exclusion {
    /// Matched against the full pseudo-path.
    path: Pattern,
    /// Matched against the bare package name.
    package: Pattern,
}

impl Exclusion {
    fn compile(raw: &str) -> Result<Self> {
        let normalized = raw.replace("**/", "*").replace("**", "*");
        let package = normalized.trim_matches(|c: char| c == '/' || c == '*');
        Ok(Self {
            path: compile_pattern(&normalized, raw)?,
            package: compile_pattern(package, raw)?,
        })
    }
}

fn compile_pattern(pattern: &str, raw: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|source| Error::Pattern {
        pattern: raw.to_string(),
        source,
    })
}

#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    exclusions: Vec<Exclusion>,
}

impl ExclusionFilter {
    /// Compile a filter from exclusion globs such as `**/dto/**`.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let exclusions = patterns
            .iter()
            .map(|p| Exclusion::compile(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { exclusions })
    }

    /// Whether `source_file` in `package_name` is left out of the totals.
    #[must_use]
    pub fn is_excluded(&self, package_name: &str, source_file: &str) -> bool {
        if self.exclusions.is_empty() {
            return false;
        }

        let path = pseudo_path(package_name, source_file);
        let glob_hit = self
            .exclusions
            .iter()
            .any(|ex| ex.path.matches(&path) || ex.package.matches(package_name));

        glob_hit
            || EXCLUDED_PACKAGE_SUBSTRINGS
                .iter()
                .any(|s| package_name.contains(s))
            || source_file.contains(EXCLUDED_FILE_SUBSTRING)
    }
}

impl Default for ExclusionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS).expect("default exclusion patterns are valid globs")
    }
}

/// `com.example.web` + `Foo.java` → `com/example/web/Foo.java`.
#[must_use]
pub fn pseudo_path(package_name: &str, source_file: &str) -> String {
    format!("{}/{}", package_name.replace('.', "/"), source_file)
}
