use crate::OutputFormatter;
use switchcheck_enforce::types::{CheckReport, FactsReport};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, report: &CheckReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }

    fn format_facts(&self, report: &FactsReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_default()
    }
}
