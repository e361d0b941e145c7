use std::path::PathBuf;

use switchcheck_core::config::SwitchCheckConfig;
use switchcheck_core::store::MemoryFactStore;
use switchcheck_enforce::coverage::CheckOptions;
use switchcheck_enforce::engine::CheckEngine;
use switchcheck_output::OutputFormatter;
use switchcheck_parsers::workspace::LoadOptions;

/// Command-line switches layered over `switchcheck.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckFlags {
    pub fill: bool,
    pub exact_exclude: bool,
    pub include_tests: bool,
}

impl CheckFlags {
    /// Flags can only turn options on; config values stay otherwise.
    pub fn apply(self, config: &mut SwitchCheckConfig) {
        config.fill |= self.fill;
        config.exact_exclude |= self.exact_exclude;
        config.include_tests |= self.include_tests;
    }
}

/// Run `switchcheck check [ROOT]`. Exit code 0 clean, 1 diagnostics, 2 error.
pub fn run(
    formatter: &dyn OutputFormatter,
    verbose: bool,
    root: Option<PathBuf>,
    flags: CheckFlags,
) -> i32 {
    let Some(root) = super::resolve_root(root, "check") else {
        return 2;
    };

    let mut config = SwitchCheckConfig::load(&root);
    flags.apply(&mut config);

    let load = LoadOptions {
        include_tests: config.include_tests,
        ignore_patterns: config.ignore_patterns.clone(),
    };
    let mut engine = CheckEngine::with_options(
        Box::new(MemoryFactStore::new()),
        CheckOptions::from_config(&config),
    );

    let report = match engine.check_path(&root, &load) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("switchcheck check: {e}");
            return 2;
        }
    };

    let output = formatter.format_check(&report);
    if !output.is_empty() {
        print!("{output}");
        if !output.ends_with('\n') {
            println!();
        }
    }

    if verbose {
        eprintln!(
            "switchcheck check: {} package(s), {} file(s), {} annotated switch(es)",
            report.packages_analyzed.len(),
            report.files_analyzed,
            report.switches_checked,
        );
    }

    if report.is_clean() {
        0
    } else {
        1
    }
}
