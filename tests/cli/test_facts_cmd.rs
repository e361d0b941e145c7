// Tests for `switchcheck facts`.

use std::process::Command;

use crate::common::{self, fixtures};

#[test]
fn test_facts_human_output() {
    let (_dir, root) = common::create_fixture_project();
    let out = Command::new(common::switchcheck_bin())
        .arg("facts")
        .arg(&root)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(&format!("c: {}\n", fixtures::PACKAGE_C_FACTS)));
    assert!(stdout.contains("b: b.TestKind:[b.TestKindHoge b.TestKindFuga b.TestKindPiyo]\n"));
}

#[test]
fn test_facts_json_output() {
    let (_dir, root) = common::create_fixture_project();
    let out = Command::new(common::switchcheck_bin())
        .args(["facts", "--json"])
        .arg(&root)
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let packages = json["packages"].as_array().unwrap();
    assert_eq!(packages.len(), 4);
    let c = packages.iter().find(|p| p["package"] == "c").unwrap();
    assert_eq!(c["catalog"], fixtures::PACKAGE_C_FACTS);
    assert_eq!(c["fingerprint"].as_str().unwrap().len(), 11);
}
