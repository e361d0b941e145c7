// Tests for CLI exit code behavior: 0 clean, 1 diagnostics, 2 error.

use std::process::Command;

use crate::common;

#[test]
/// Exit code 0 when every annotated switch is exhaustive.
fn test_exit_code_0_clean_check() {
    let (_dir, root) = common::create_project(&[(
        "k/k.go",
        "package k\n\ntype K int\n\nconst (\n\tA K = iota\n\tB\n)\n\nfunc f(v K) {\n\t// switchchecker\n\tswitch v {\n\tcase A, B:\n\t}\n}\n",
    )]);
    let out = Command::new(common::switchcheck_bin())
        .arg("check")
        .arg(&root)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty(), "clean check should print nothing");
}

#[test]
/// Exit code 1 when diagnostics are reported.
fn test_exit_code_1_diagnostics() {
    let (_dir, root) = common::create_fixture_project();
    let out = Command::new(common::switchcheck_bin())
        .arg("check")
        .arg(&root)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
}

#[test]
/// Exit code 2 when the root does not exist.
fn test_exit_code_2_missing_root() {
    let (_dir, root) = common::create_project(&[]);
    let out = Command::new(common::switchcheck_bin())
        .arg("check")
        .arg(root.join("missing"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("not a directory"));
}

#[test]
/// Exit code 2 on an import cycle.
fn test_exit_code_2_import_cycle() {
    let (_dir, root) = common::create_project(&[
        ("p/p.go", "package p\n\nimport \"q\"\n"),
        ("q/q.go", "package q\n\nimport \"p\"\n"),
    ]);
    let out = Command::new(common::switchcheck_bin())
        .arg("check")
        .arg(&root)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("import cycle"));
}

#[test]
/// A malformed config file falls back to defaults instead of failing.
fn test_malformed_config_is_not_fatal() {
    let (_dir, root) = common::create_project(&[
        ("switchcheck.json", "{ not json"),
        ("k/k.go", "package k\n"),
    ]);
    let out = Command::new(common::switchcheck_bin())
        .arg("check")
        .arg(&root)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("using default configuration"));
}
