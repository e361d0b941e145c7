//! Output formatters for switchcheck command results.
//!
//! - **Human** (default): `file:line:col: message` lines, like `go vet`
//! - **JSON** (`--json`): the full report as structured output

pub mod human;
pub mod json;

use switchcheck_enforce::types::{CheckReport, FactsReport};

pub trait OutputFormatter {
    fn format_check(&self, report: &CheckReport) -> String;
    fn format_facts(&self, report: &FactsReport) -> String;
}
