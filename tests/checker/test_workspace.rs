// Workspace discovery feeding the checker: go.mod module paths, test files,
// ignore files and configuration.

use switchcheck_core::config::SwitchCheckConfig;
use switchcheck_core::store::MemoryFactStore;
use switchcheck_enforce::engine::{CheckEngine, EngineError};
use switchcheck_parsers::workspace::{self, LoadOptions};

use crate::common;

const KINDS: &str = r#"package kinds

type Color string

const (
	Red   Color = "red"
	Green Color = "green"
	Blue  Color = "blue"
)
"#;

const USES_KINDS: &str = r#"package paint

import "example.com/app/kinds"

type Brush struct {
	Color kinds.Color
}

func pick(b Brush) {
	// switchchecker
	switch b.Color {
	case kinds.Red:
	}
}
"#;

fn engine() -> CheckEngine {
    CheckEngine::new(Box::new(MemoryFactStore::new()))
}

#[test]
fn test_module_paths_from_go_mod() {
    let (_dir, root) = common::create_project(&[
        ("go.mod", "module example.com/app\n\ngo 1.22\n"),
        ("kinds/kinds.go", KINDS),
        ("paint/paint.go", USES_KINDS),
    ]);
    let report = engine()
        .check_path(&root, &LoadOptions::default())
        .unwrap();
    assert_eq!(
        report.packages_analyzed,
        ["example.com/app/kinds", "example.com/app/paint"]
    );
    let messages: Vec<_> = report.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        ["no case of example.com/app/kinds.Green, and example.com/app/kinds.Blue"]
    );
    assert_eq!(report.diagnostics[0].module, "example.com/app/paint");
}

#[test]
fn test_test_files_need_opt_in() {
    let (_dir, root) = common::create_project(&[
        ("go.mod", "module example.com/app\n"),
        ("kinds/kinds.go", KINDS),
        (
            "kinds/kinds_test.go",
            "package kinds\n\nfunc check(c Color) {\n\t// switchchecker\n\tswitch c {\n\tcase Red:\n\t}\n}\n",
        ),
    ]);
    let report = engine()
        .check_path(&root, &LoadOptions::default())
        .unwrap();
    assert!(report.is_clean());

    let opts = LoadOptions {
        include_tests: true,
        ..Default::default()
    };
    let report = engine().check_path(&root, &opts).unwrap();
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].position.file, "kinds/kinds_test.go");
}

#[test]
fn test_ignore_file_and_patterns() {
    let bad = "package gen\n\nfunc f() {\n\t// switchchecker\n\tswitch {\n\t}\n}\n";
    let vendored = bad.replace("package gen", "package v");
    let (_dir, root) = common::create_project(&[
        ("kinds/kinds.go", KINDS),
        ("gen/gen.go", bad),
        ("vendor/v/v.go", vendored.as_str()),
        (".switchcheckignore", "vendor/\n"),
    ]);

    let report = engine()
        .check_path(&root, &LoadOptions::default())
        .unwrap();
    assert_eq!(report.packages_analyzed, ["gen", "kinds"]);
    assert_eq!(report.diagnostics.len(), 1);

    let opts = LoadOptions {
        ignore_patterns: vec!["gen/**".to_string()],
        ..Default::default()
    };
    let report = engine().check_path(&root, &opts).unwrap();
    assert!(report.is_clean());
}

#[test]
fn test_config_file_is_read() {
    let (_dir, root) = common::create_project(&[
        (
            "switchcheck.json",
            r#"{ "exact_exclude": true, "ignore_patterns": ["gen/**"] }"#,
        ),
        ("kinds/kinds.go", KINDS),
    ]);
    let config = SwitchCheckConfig::load(&root);
    assert!(config.exact_exclude);
    assert!(!config.include_tests);
    assert_eq!(config.ignore_patterns, ["gen/**"]);
}

#[test]
fn test_import_cycle_is_an_error() {
    let (_dir, root) = common::create_project(&[
        ("p/p.go", "package p\n\nimport \"q\"\n"),
        ("q/q.go", "package q\n\nimport \"p\"\n"),
    ]);
    let ws = workspace::load(&root, &LoadOptions::default()).unwrap();
    let err = engine().check(&ws).unwrap_err();
    assert!(matches!(err, EngineError::ImportCycle { .. }));
}
