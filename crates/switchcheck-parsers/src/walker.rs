use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::treesitter::detect_language;

pub const IGNORE_FILE_NAME: &str = ".switchcheckignore";

pub struct WalkEntry {
    pub path: PathBuf,
    pub language: String,
}

pub struct FileWalker {
    root: PathBuf,
    include_tests: bool,
    ignore: GlobSet,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            include_tests: false,
            ignore: GlobSet::empty(),
        }
    }

    /// Also yield `_test.go` files.
    pub fn include_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }

    /// Skip files whose root-relative path matches any of `patterns`.
    pub fn ignore_patterns(mut self, patterns: &[String]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }
        self.ignore = builder.build()?;
        Ok(self)
    }

    pub fn walk(&self) -> Vec<WalkEntry> {
        let mut entries = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .add_custom_ignore_filename(IGNORE_FILE_NAME)
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.into_path();
            let Some(lang) = detect_language(&path) else {
                continue;
            };
            if !self.include_tests && is_test_file(&path) {
                continue;
            }
            let relative = path.strip_prefix(&self.root).unwrap_or(&path);
            if self.ignore.is_match(relative) {
                continue;
            }
            entries.push(WalkEntry {
                path,
                language: lang.to_string(),
            });
        }

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }
}

fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with("_test.go"))
}
