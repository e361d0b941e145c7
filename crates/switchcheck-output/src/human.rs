use crate::OutputFormatter;
use switchcheck_enforce::types::{CheckReport, FactsReport};

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_check(&self, report: &CheckReport) -> String {
        if report.diagnostics.is_empty() {
            return String::new(); // Clean check = empty stdout
        }

        let mut out = String::new();
        for d in &report.diagnostics {
            out.push_str(&format!("{}: {}\n", d.position, d.message));
        }

        out.push_str(&format!(
            "\n{} diagnostic(s) in {} annotated switch(es), {} file(s)\n",
            report.diagnostics.len(),
            report.switches_checked,
            report.files_analyzed,
        ));
        out
    }

    fn format_facts(&self, report: &FactsReport) -> String {
        let mut out = String::new();
        for p in &report.packages {
            if p.catalog.is_empty() {
                continue;
            }
            out.push_str(&format!("{}: {}\n", p.package, p.catalog));
        }
        out
    }
}
