// End-to-end runs over the a / b / x/a / c fixture packages.

use switchcheck_core::store::MemoryFactStore;
use switchcheck_core::types::DiagnosticKind;
use switchcheck_enforce::engine::CheckEngine;
use switchcheck_parsers::workspace::{self, LoadOptions};

use crate::common::{self, fixtures};

fn engine() -> CheckEngine {
    CheckEngine::new(Box::new(MemoryFactStore::new()))
}

#[test]
fn test_fixture_diagnostics_match_want_markers() {
    let (_dir, root) = common::create_fixture_project();
    let report = engine()
        .check_path(&root, &LoadOptions::default())
        .unwrap();

    let got: Vec<(u32, String)> = report
        .diagnostics
        .iter()
        .map(|d| (d.position.line, d.message.clone()))
        .collect();
    assert_eq!(got, common::wanted(fixtures::PACKAGE_C));
    assert!(report
        .diagnostics
        .iter()
        .all(|d| d.kind == DiagnosticKind::MissingCases && d.position.file == "c/c.go"));
    assert!(report.diagnostics.iter().all(|d| d.position.column == 3));
}

#[test]
fn test_fixture_counts() {
    let (_dir, root) = common::create_fixture_project();
    let report = engine()
        .check_path(&root, &LoadOptions::default())
        .unwrap();
    assert_eq!(report.packages_analyzed, ["a", "b", "c", "x/a"]);
    assert_eq!(report.files_analyzed, 4);
    // Two unannotated switches are not counted.
    assert_eq!(report.switches_checked, 10);
    assert_eq!(report.diagnostics.len(), 8);
}

#[test]
fn test_fixture_facts() {
    let (_dir, root) = common::create_fixture_project();
    let ws = workspace::load(&root, &LoadOptions::default()).unwrap();
    let facts = engine().facts(&ws).unwrap();

    let c = facts.packages.iter().find(|p| p.package == "c").unwrap();
    assert_eq!(c.catalog, fixtures::PACKAGE_C_FACTS);
    assert_eq!(c.types, 2);
    assert_eq!(c.constants, 6);

    let xa = facts.packages.iter().find(|p| p.package == "x/a").unwrap();
    assert_eq!(
        xa.catalog,
        "x/a.TestKind:[x/a.TestKindHoge x/a.TestKindFuga x/a.TestKindPiyo \
         x/a.TestKindDoga x/a.TestKindBosukete x/a.TestKindXxx x/a.TestKindYyy]"
    );
}

#[test]
fn test_rerun_keeps_catalogs_identical() {
    let (_dir, root) = common::create_fixture_project();
    let ws = workspace::load(&root, &LoadOptions::default()).unwrap();
    let mut engine = engine();

    let first = engine.check(&ws).unwrap();
    let handles: Vec<_> = ["a", "b", "c", "x/a"]
        .iter()
        .map(|p| engine.modules().get(p).unwrap())
        .collect();
    let before: Vec<_> = handles
        .iter()
        .map(|h| engine.store().import(*h).unwrap().to_string())
        .collect();
    let fingerprints: Vec<_> = handles
        .iter()
        .map(|h| engine.store().fingerprint(*h))
        .collect();

    let second = engine.check(&ws).unwrap();
    let after: Vec<_> = handles
        .iter()
        .map(|h| engine.store().import(*h).unwrap().to_string())
        .collect();
    assert_eq!(before, after);
    for (h, fp) in handles.iter().zip(&fingerprints) {
        assert_eq!(&engine.store().fingerprint(*h), fp);
    }
    assert_eq!(first.diagnostics, second.diagnostics);
}
