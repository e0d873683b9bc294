//! Output formatting for filtered coverage summaries.

use std::fmt::Write;

use serde::Serialize;

use crate::aggregate::grand_total;
use crate::model::{FileTotals, ReportOutcome, Totals};

/// Everything a formatter needs: per-report outcomes in display order and
/// the low-coverage threshold.
pub struct CoverageSummary {
    pub outcomes: Vec<ReportOutcome>,
    /// Percentage below which a report gets a per-file breakdown.
    pub threshold: f64,
}

impl CoverageSummary {
    #[must_use]
    pub fn total(&self) -> Totals {
        grand_total(&self.outcomes)
    }

    /// Format using a specific formatter.
    #[must_use]
    pub fn format(&self, formatter: &dyn ReportFormatter) -> String {
        formatter.format(self)
    }

    /// Files whose own coverage is below the threshold. Files without
    /// instructions are never listed.
    fn low_coverage<'a>(&self, files: &'a [FileTotals]) -> impl Iterator<Item = &'a FileTotals> {
        let threshold = self.threshold;
        files
            .iter()
            .filter(move |f| f.totals.percent().is_some_and(|pct| pct < threshold))
    }

    fn is_low(&self, totals: &Totals) -> bool {
        totals.percent().is_some_and(|pct| pct < self.threshold)
    }
}

/// Trait for formatting coverage summaries.
pub trait ReportFormatter {
    /// Format the summary to a string.
    fn format(&self, summary: &CoverageSummary) -> String;
}

/// Plain text formatter.
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format(&self, summary: &CoverageSummary) -> String {
        let mut out = String::new();

        if summary.outcomes.is_empty() {
            out.push_str("No jacoco.xml files found\n");
            return out;
        }

        for outcome in &summary.outcomes {
            let path = outcome.path.display();
            let report = match &outcome.result {
                Ok(report) => report,
                Err(reason) => {
                    writeln!(out, "Error parsing {path}: {reason}").unwrap();
                    continue;
                }
            };

            let Some(pct) = report.totals.percent() else {
                writeln!(out, "{path}: Coverage=N/A (Filtered out)").unwrap();
                continue;
            };
            let covered = report.totals.covered;
            let total = report.totals.total();
            writeln!(
                out,
                "{path}: Coverage={pct:.1}% (Covered={covered}, Total={total})"
            )
            .unwrap();

            if summary.is_low(&report.totals) {
                out.push_str("  Low coverage files:\n");
                for f in summary.low_coverage(&report.files) {
                    let name = &f.name;
                    let file_pct = f.totals.percent().unwrap_or_default();
                    let file_covered = f.totals.covered;
                    let file_total = f.totals.total();
                    writeln!(
                        out,
                        "    {name}: {file_pct:.1}% ({file_covered}/{file_total})"
                    )
                    .unwrap();
                }
            }
        }

        out.push('\n');
        match summary.total().percent() {
            Some(pct) => writeln!(out, "Total Filtered Coverage: {pct:.1}%").unwrap(),
            None => out.push_str("Total Filtered Coverage: 0%\n"),
        }

        out
    }
}

/// JSON formatter, one document for the whole run.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonSummary<'a> {
    threshold: f64,
    reports: Vec<JsonReport<'a>>,
    total: JsonTotals,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum JsonReport<'a> {
    Ok {
        path: String,
        #[serde(flatten)]
        totals: JsonTotals,
        low_coverage_files: Vec<JsonFile<'a>>,
    },
    Error {
        path: String,
        error: &'a str,
    },
}

#[derive(Serialize)]
struct JsonFile<'a> {
    package: &'a str,
    name: &'a str,
    #[serde(flatten)]
    totals: JsonTotals,
}

#[derive(Serialize)]
struct JsonTotals {
    missed: u64,
    covered: u64,
    total: u64,
    /// `null` when nothing was instrumented.
    percent: Option<f64>,
}

impl From<Totals> for JsonTotals {
    fn from(t: Totals) -> Self {
        Self {
            missed: t.missed,
            covered: t.covered,
            total: t.total(),
            percent: t.percent(),
        }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, summary: &CoverageSummary) -> String {
        let reports = summary
            .outcomes
            .iter()
            .map(|outcome| {
                let path = outcome.path.display().to_string();
                match &outcome.result {
                    Ok(report) => {
                        let low_coverage_files = if summary.is_low(&report.totals) {
                            summary
                                .low_coverage(&report.files)
                                .map(|f| JsonFile {
                                    package: &f.package,
                                    name: &f.name,
                                    totals: f.totals.into(),
                                })
                                .collect()
                        } else {
                            Vec::new()
                        };
                        JsonReport::Ok {
                            path,
                            totals: report.totals.into(),
                            low_coverage_files,
                        }
                    }
                    Err(reason) => JsonReport::Error {
                        path,
                        error: reason,
                    },
                }
            })
            .collect();

        let doc = JsonSummary {
            threshold: summary.threshold,
            reports,
            total: summary.total().into(),
        };
        let mut out = serde_json::to_string_pretty(&doc).unwrap();
        out.push('\n');
        out
    }
}
