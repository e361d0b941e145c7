use std::path::PathBuf;

use switchcheck_core::config::SwitchCheckConfig;
use switchcheck_core::store::MemoryFactStore;
use switchcheck_enforce::engine::CheckEngine;
use switchcheck_output::OutputFormatter;
use switchcheck_parsers::workspace::{self, LoadOptions};

/// Run `switchcheck facts [ROOT]`: dump each package's exported catalog.
pub fn run(
    formatter: &dyn OutputFormatter,
    verbose: bool,
    root: Option<PathBuf>,
    include_tests: bool,
) -> i32 {
    let Some(root) = super::resolve_root(root, "facts") else {
        return 2;
    };
    let config = SwitchCheckConfig::load(&root);

    let load = LoadOptions {
        include_tests: include_tests || config.include_tests,
        ignore_patterns: config.ignore_patterns,
    };
    let ws = match workspace::load(&root, &load) {
        Ok(ws) => ws,
        Err(e) => {
            eprintln!("switchcheck facts: {e}");
            return 2;
        }
    };

    let mut engine = CheckEngine::new(Box::new(MemoryFactStore::new()));
    let report = match engine.facts(&ws) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("switchcheck facts: {e}");
            return 2;
        }
    };

    let output = formatter.format_facts(&report);
    if !output.is_empty() {
        print!("{output}");
        if !output.ends_with('\n') {
            println!();
        }
    }

    if verbose {
        eprintln!(
            "switchcheck facts: {} package(s), {} file(s)",
            report.packages.len(),
            ws.file_count(),
        );
    }
    0
}
