// Tests for `switchcheck check` output.

use std::process::Command;

use crate::common::{self, fixtures};

#[test]
fn test_check_human_output() {
    let (_dir, root) = common::create_fixture_project();
    let out = Command::new(common::switchcheck_bin())
        .arg("check")
        .arg(&root)
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&out.stdout);

    for (line, message) in common::wanted(fixtures::PACKAGE_C) {
        let expected = format!("c/c.go:{line}:3: {message}");
        assert!(stdout.contains(&expected), "missing `{expected}` in:\n{stdout}");
    }
    assert!(stdout.contains("8 diagnostic(s)"));
}

#[test]
fn test_check_json_output() {
    let (_dir, root) = common::create_fixture_project();
    let out = Command::new(common::switchcheck_bin())
        .args(["--json", "check"])
        .arg(&root)
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["command"], "check");
    assert_eq!(json["status"], "error");
    assert_eq!(json["diagnostics"].as_array().unwrap().len(), 8);
    assert_eq!(json["diagnostics"][0]["message"], "no case of c.TestKindPiyo");
    assert_eq!(json["diagnostics"][0]["kind"], "missing_cases");
}

#[test]
fn test_check_defaults_to_current_directory() {
    let (_dir, root) = common::create_fixture_project();
    let out = Command::new(common::switchcheck_bin())
        .arg("check")
        .current_dir(&root)
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&out.stdout).contains("no case of b.TestKindFuga"));
}

#[test]
fn test_check_exact_exclude_flag() {
    let (_dir, root) = common::create_project(&[(
        "k/k.go",
        "package k\n\ntype K int\n\nconst (\n\tHoge K = iota\n\tHogeExtra\n)\n\nfunc f(v K) {\n\t// switchchecker -e Hoge\n\tswitch v {\n\t}\n}\n",
    )]);
    let bin = common::switchcheck_bin();

    let loose = Command::new(&bin).arg("check").arg(&root).output().unwrap();
    assert!(loose.stdout.is_empty());

    let exact = Command::new(&bin)
        .args(["check", "--exact-exclude"])
        .arg(&root)
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&exact.stdout).contains("no case of k.HogeExtra"));
}

#[test]
fn test_check_verbose_summary_on_stderr() {
    let (_dir, root) = common::create_fixture_project();
    let out = Command::new(common::switchcheck_bin())
        .args(["check", "--verbose"])
        .arg(&root)
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("4 package(s), 4 file(s), 10 annotated switch(es)"));
}
