/// Shared test helpers for all switchcheck integration tests.
///
/// Import from any integration test file with:
///   `#[path = "common/mod.rs"] mod common;`
pub mod fixtures;

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Write `files` (`(relative_path, content)`) under a fresh temp directory.
///
/// Returns (TempDir, project_root). Hold the TempDir to keep the directory alive.
#[allow(dead_code)]
pub fn create_project(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    let project_root = root.to_path_buf();
    (dir, project_root)
}

/// The `a`, `b`, `x/a` and `c` packages in GOPATH layout.
#[allow(dead_code)]
pub fn create_fixture_project() -> (TempDir, PathBuf) {
    create_project(&[
        ("a/a.go", fixtures::PACKAGE_A),
        ("b/b.go", fixtures::PACKAGE_B),
        ("x/a/a.go", fixtures::PACKAGE_XA),
        ("c/c.go", fixtures::PACKAGE_C),
    ])
}

/// `(line, message)` for every `// want "..."` marker in `source`.
#[allow(dead_code)]
pub fn wanted(source: &str) -> Vec<(u32, String)> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let (_, rest) = line.split_once("// want \"")?;
            let message = rest.strip_suffix('"')?;
            Some((i as u32 + 1, message.to_string()))
        })
        .collect()
}

/// Path to the compiled switchcheck binary, building it if needed.
#[allow(dead_code)]
pub fn switchcheck_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove 'deps'
    path.push("switchcheck");
    if path.exists() {
        return path;
    }
    let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fallback = workspace.join("target/debug/switchcheck");
    if fallback.exists() {
        return fallback;
    }
    let status = Command::new("cargo")
        .args(["build", "-p", "switchcheck-cli"])
        .current_dir(&workspace)
        .status()
        .expect("Failed to build switchcheck");
    assert!(status.success(), "Failed to build switchcheck binary");
    fallback
}
