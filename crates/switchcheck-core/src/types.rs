use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Opaque reference to a compilation unit (a Go package), valid for one
/// analysis run. Only ever used as a lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleHandle(u32);

impl ModuleHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ModuleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Interns import paths into [`ModuleHandle`]s.
///
/// Paths that are imported but not part of the analysed workspace (e.g.
/// `"fmt"`) still get a handle; they simply never have a catalog published.
#[derive(Debug, Default, Clone)]
pub struct ModuleTable {
    paths: Vec<String>,
    by_path: HashMap<String, ModuleHandle>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `path`, allocating one on first sight.
    pub fn intern(&mut self, path: &str) -> ModuleHandle {
        if let Some(handle) = self.by_path.get(path) {
            return *handle;
        }
        let handle = ModuleHandle(self.paths.len() as u32);
        self.paths.push(path.to_string());
        self.by_path.insert(path.to_string(), handle);
        handle
    }

    pub fn get(&self, path: &str) -> Option<ModuleHandle> {
        self.by_path.get(path).copied()
    }

    pub fn path(&self, handle: ModuleHandle) -> &str {
        &self.paths[handle.index()]
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// What a resolved name was declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Constant,
    Variable,
    Type,
    Function,
    /// The name lives in a package outside the workspace; its kind is unknown.
    External,
}

impl DeclKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Constant => "constant",
            DeclKind::Variable => "variable",
            DeclKind::Type => "type",
            DeclKind::Function => "function",
            DeclKind::External => "external",
        }
    }
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of identity resolution: `this expression names X declared in M`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedName {
    /// `<package path>.<name>`, e.g. `x/a.TestKindHoge`.
    pub qualified: String,
    pub kind: DeclKind,
}

/// A resolved type. `package` is the declaring package's import path, or
/// `None` for predeclared and untyped types (`int`, `untyped int`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    pub package: Option<String>,
    pub name: String,
}

impl TypeName {
    pub fn qualified(package: &str, name: &str) -> Self {
        Self {
            package: Some(package.to_string()),
            name: name.to_string(),
        }
    }

    pub fn builtin(name: &str) -> Self {
        Self {
            package: None,
            name: name.to_string(),
        }
    }

    /// Catalog key for this type: `c.TestKind`, `x/a.TestKind`, or `int`.
    pub fn key(&self) -> String {
        match &self.package {
            Some(pkg) => format!("{pkg}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

/// Category of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MissingCases,
    UnexpectedType,
    MalformedDirective,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::MissingCases => "missing_cases",
            DiagnosticKind::UnexpectedType => "unexpected_type",
            DiagnosticKind::MalformedDirective => "malformed_directive",
        }
    }
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source position of a switch statement (1-based line and column).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A reported finding: where, what kind, and the rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub module: String,
    pub position: Position,
    pub kind: DiagnosticKind,
    pub message: String,
}
