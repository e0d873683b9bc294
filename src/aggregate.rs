//! Sums INSTRUCTION counters over the files the exclusion filter keeps.

use std::path::Path;

use crate::error::{Error, Result};
use crate::filter::ExclusionFilter;
use crate::model::*;
use crate::parsers::ReportParser;

/// Filtered totals for one parsed report. Files come back in document order,
/// including zero-instruction ones.
///
/// Counters are only parsed for files the filter keeps. A package that holds
/// source files must have a name.
pub fn summarize(report: &CoverageReport, filter: &ExclusionFilter) -> Result<ReportTotals> {
    let mut out = ReportTotals::default();
    for package in &report.packages {
        if package.source_files.is_empty() {
            continue;
        }
        let package_name = package.name.as_deref().ok_or(Error::MissingAttribute {
            element: "package",
            attribute: "name",
        })?;

        for file in &package.source_files {
            if filter.is_excluded(package_name, &file.name) {
                tracing::trace!(package = %package_name, file = %file.name, "excluded");
                continue;
            }
            let totals = file.instructions()?;
            out.totals += totals;
            out.files.push(FileTotals {
                package: package_name.to_string(),
                name: file.name.clone(),
                totals,
            });
        }
    }
    Ok(out)
}

/// Read, parse and summarize one report file.
pub fn summarize_file(
    path: &Path,
    parser: &dyn ReportParser,
    filter: &ExclusionFilter,
) -> Result<ReportTotals> {
    let content = std::fs::read(path)?;
    let report = parser.parse(&content)?;
    summarize(&report, filter)
}

/// Sum of every successfully summarized report; failed ones contribute
/// nothing.
#[must_use]
pub fn grand_total(outcomes: &[ReportOutcome]) -> Totals {
    outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .map(|r| r.totals)
        .sum()
}
