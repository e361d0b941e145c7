//! Workspace loading: discover `.go` files, parse them, group into packages.
//!
//! A package is the set of files in one directory sharing a package clause.
//! Its import path is `<module>/<dir>` when the root has a `go.mod`, and the
//! root-relative directory otherwise (GOPATH `src/` layout).

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use rayon::prelude::*;

use crate::go::GoFrontEnd;
use crate::model::{GoFile, GoPackage};
use crate::treesitter::ParseError;
use crate::walker::FileWalker;

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub include_tests: bool,
    pub ignore_patterns: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{0}: not a directory")]
    NotADirectory(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid ignore pattern: {0}")]
    Pattern(#[from] globset::Error),
    #[error(transparent)]
    FrontEnd(#[from] ParseError),
}

/// Every package found under a root directory.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub root: PathBuf,
    /// Module path from `go.mod`, if present.
    pub module_path: Option<String>,
    /// Packages sorted by import path.
    pub packages: Vec<GoPackage>,
}

impl Workspace {
    pub fn file_count(&self) -> usize {
        self.packages.iter().map(|p| p.files.len()).sum()
    }
}

#[tracing::instrument(skip_all, fields(root = %root.display()))]
pub fn load(root: &Path, options: &LoadOptions) -> Result<Workspace, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::NotADirectory(root.to_path_buf()));
    }
    let module_path = read_module_path(root)?;

    let entries = FileWalker::new(root)
        .include_tests(options.include_tests)
        .ignore_patterns(&options.ignore_patterns)?
        .walk();

    // Surface front-end construction errors once, before the parallel pass.
    drop(GoFrontEnd::new()?);

    let parsed: Vec<(PathBuf, GoFile)> = entries
        .par_iter()
        .map_init(GoFrontEnd::new, |front, entry| {
            let front = front.as_mut().ok()?;
            let content = match std::fs::read_to_string(&entry.path) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(file = %entry.path.display(), error = %e, "skipping unreadable file");
                    return None;
                }
            };
            let relative = entry.path.strip_prefix(root).unwrap_or(&entry.path);
            match front.parse_file(relative, &content) {
                Ok(file) => Some((relative.to_path_buf(), file)),
                Err(e) => {
                    tracing::warn!(file = %relative.display(), error = %e, "skipping file");
                    None
                }
            }
        })
        .flatten()
        .collect();

    let mut grouped: BTreeMap<(String, String), Vec<GoFile>> = BTreeMap::new();
    for (relative, file) in parsed {
        let dir = slash_path(relative.parent().unwrap_or(Path::new("")));
        let mut import_path = match (&module_path, dir.is_empty()) {
            (Some(module), true) => module.clone(),
            (Some(module), false) => format!("{module}/{dir}"),
            (None, false) => dir,
            (None, true) => file.package_name.clone(),
        };
        // External test packages (`package c_test`) get their own identity.
        if file.package_name.ends_with("_test") && !import_path.ends_with("_test") {
            import_path.push_str("_test");
        }
        grouped
            .entry((import_path, file.package_name.clone()))
            .or_default()
            .push(file);
    }

    let mut packages: Vec<GoPackage> = Vec::new();
    for ((path, name), mut files) in grouped {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        if let Some(existing) = packages.iter_mut().find(|p| p.path == path) {
            tracing::warn!(
                package = %path,
                kept = %existing.name,
                ignored = %name,
                "multiple package clauses in one directory"
            );
            continue;
        }
        packages.push(GoPackage { path, name, files });
    }

    tracing::debug!(
        root = %root.display(),
        packages = packages.len(),
        "workspace loaded"
    );

    Ok(Workspace {
        root: root.to_path_buf(),
        module_path,
        packages,
    })
}

/// `module` directive of `<root>/go.mod`, if the file exists.
fn read_module_path(root: &Path) -> Result<Option<String>, LoadError> {
    let path = root.join("go.mod");
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(LoadError::Io { path, source }),
    };
    Ok(parse_module_directive(&content))
}

pub(crate) fn parse_module_directive(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let module = rest.trim().trim_matches('"').trim_matches('`');
        (!module.is_empty()).then(|| module.to_string())
    })
}

fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_parse_module_directive() {
        assert_eq!(
            parse_module_directive("module github.com/acme/app\n\ngo 1.22\n"),
            Some("github.com/acme/app".to_string())
        );
        assert_eq!(
            parse_module_directive("// comment\nmodule \"example.com/m\" // trailing\n"),
            Some("example.com/m".to_string())
        );
        assert_eq!(parse_module_directive("go 1.22\n"), None);
        assert_eq!(parse_module_directive("modulex foo\n"), None);
    }

    #[test]
    fn test_gopath_layout() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "c/c.go", "package c\n");
        write(dir.path(), "x/a/a.go", "package a\n");
        write(dir.path(), "x/a/more.go", "package a\n");

        let ws = load(dir.path(), &LoadOptions::default()).unwrap();
        let paths: Vec<_> = ws.packages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, ["c", "x/a"]);
        let xa = &ws.packages[1];
        assert_eq!(xa.name, "a");
        assert_eq!(xa.files.len(), 2);
        assert!(xa.files[0].path < xa.files[1].path);
        assert_eq!(ws.file_count(), 3);
        assert!(ws.module_path.is_none());
    }

    #[test]
    fn test_module_layout() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "go.mod", "module example.com/app\n");
        write(dir.path(), "main.go", "package main\n");
        write(dir.path(), "kinds/kinds.go", "package kinds\n");

        let ws = load(dir.path(), &LoadOptions::default()).unwrap();
        let paths: Vec<_> = ws.packages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, ["example.com/app", "example.com/app/kinds"]);
        assert_eq!(ws.module_path.as_deref(), Some("example.com/app"));
    }

    #[test]
    fn test_external_test_package() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "c/c.go", "package c\n");
        write(dir.path(), "c/c_test.go", "package c_test\n");

        let opts = LoadOptions {
            include_tests: true,
            ..Default::default()
        };
        let ws = load(dir.path(), &opts).unwrap();
        let paths: Vec<_> = ws.packages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, ["c", "c_test"]);
    }

    #[test]
    fn test_unparseable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "c/c.go", "package c\n");
        write(dir.path(), "c/broken.go", "func nope() {}\n");

        let ws = load(dir.path(), &LoadOptions::default()).unwrap();
        assert_eq!(ws.packages.len(), 1);
        assert_eq!(ws.packages[0].files.len(), 1);
    }

    #[test]
    fn test_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "file.go", "package c\n");
        assert!(matches!(
            load(&dir.path().join("file.go"), &LoadOptions::default()),
            Err(LoadError::NotADirectory(_))
        ));
    }
}
