use serde::{Deserialize, Serialize};
use switchcheck_core::types::Diagnostic;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "error"
    pub packages_analyzed: Vec<String>,
    pub files_analyzed: usize,
    /// Switches carrying a directive comment, malformed ones included.
    pub switches_checked: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactsReport {
    pub version: String,
    pub command: String,
    pub packages: Vec<PackageFacts>,
}

/// The exported catalog of one package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageFacts {
    pub package: String,
    pub fingerprint: String,
    pub types: usize,
    pub constants: usize,
    /// Serialized catalog, `key:[n1 n2] key2:[n1]`.
    pub catalog: String,
}
