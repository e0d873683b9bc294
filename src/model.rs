//! In-memory representation of a JaCoCo report and the totals derived from
//! it. Parsers produce a `CoverageReport`; the aggregator turns it into
//! `ReportTotals`.

use std::ops::{Add, AddAssign};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Compute a coverage rate, returning 0.0 when the total is zero.
#[must_use]
pub fn rate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}

/// The granularity a JaCoCo counter measures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterType {
    Instruction,
    Branch,
    Line,
    Complexity,
    Method,
    Class,
    Other(String),
}

impl CounterType {
    pub fn from_attr(value: &str) -> Self {
        match value {
            "INSTRUCTION" => CounterType::Instruction,
            "BRANCH" => CounterType::Branch,
            "LINE" => CounterType::Line,
            "COMPLEXITY" => CounterType::Complexity,
            "METHOD" => CounterType::Method,
            "CLASS" => CounterType::Class,
            other => CounterType::Other(other.to_string()),
        }
    }
}

/// A `<counter>` with its `missed`/`covered` attributes kept as written.
/// They are only parsed when the counter is actually consulted, so a bad
/// value in a file that ends up excluded never matters.
#[derive(Debug, Clone)]
pub struct Counter {
    pub kind: CounterType,
    pub missed: Option<String>,
    pub covered: Option<String>,
}

impl Counter {
    #[cfg(test)]
    pub(crate) fn new(kind: CounterType, missed: u64, covered: u64) -> Self {
        Self {
            kind,
            missed: Some(missed.to_string()),
            covered: Some(covered.to_string()),
        }
    }

    /// Parse both attributes as instruction counts.
    pub fn totals(&self) -> Result<Totals> {
        Ok(Totals::new(
            parse_count("missed", self.missed.as_deref())?,
            parse_count("covered", self.covered.as_deref())?,
        ))
    }
}

fn parse_count(attribute: &'static str, value: Option<&str>) -> Result<u64> {
    let value = value.ok_or(Error::MissingAttribute {
        element: "counter",
        attribute,
    })?;
    value.trim().parse().map_err(|_| Error::InvalidCounter {
        attribute,
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    pub name: String,
    pub counters: Vec<Counter>,
}

impl SourceFile {
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Sum of every INSTRUCTION counter attached to this file. Fails on the
    /// first one with a missing or non-integer value.
    pub fn instructions(&self) -> Result<Totals> {
        self.counters
            .iter()
            .filter(|c| c.kind == CounterType::Instruction)
            .map(Counter::totals)
            .sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Package {
    /// Required only once the package holds a source file.
    pub name: Option<String>,
    pub source_files: Vec<SourceFile>,
}

impl Package {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }
}

/// The complete result of parsing a single jacoco.xml.
#[derive(Debug, Clone, Default)]
pub struct CoverageReport {
    pub packages: Vec<Package>,
}

impl CoverageReport {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Missed/covered instruction counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub missed: u64,
    pub covered: u64,
}

impl Totals {
    pub fn new(missed: u64, covered: u64) -> Self {
        Self { missed, covered }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.missed + self.covered
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Coverage as a percentage, or `None` when nothing was instrumented.
    #[must_use]
    pub fn percent(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(rate(self.covered, self.total()) * 100.0)
        }
    }
}

impl Add for Totals {
    type Output = Totals;

    fn add(self, rhs: Totals) -> Totals {
        Totals::new(self.missed + rhs.missed, self.covered + rhs.covered)
    }
}

impl AddAssign for Totals {
    fn add_assign(&mut self, rhs: Totals) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Totals {
    fn sum<I: Iterator<Item = Totals>>(iter: I) -> Totals {
        iter.fold(Totals::default(), Add::add)
    }
}

/// Instruction totals for one included source file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileTotals {
    pub package: String,
    pub name: String,
    pub totals: Totals,
}

/// Filtered totals for one report plus the files that contributed to them,
/// in document order.
#[derive(Debug, Clone, Default)]
pub struct ReportTotals {
    pub totals: Totals,
    pub files: Vec<FileTotals>,
}

/// What happened to one located report file.
#[derive(Debug)]
pub struct ReportOutcome {
    /// Path as displayed to the user.
    pub path: PathBuf,
    /// Summarized totals, or the reason the report could not be read.
    pub result: std::result::Result<ReportTotals, String>,
}
