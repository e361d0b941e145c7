//! Per-module constant catalog: declaring type -> ordered constant names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hash::fingerprint_catalog;

/// Constants of one module grouped by their qualified declaring type.
///
/// Keys iterate in sorted order; values keep first-discovery order and never
/// hold the same name twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantCatalog {
    entries: BTreeMap<String, Vec<String>>,
}

impl ConstantCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `constant` under `type_key`. Returns `false` when it was
    /// already present.
    pub fn insert(&mut self, type_key: &str, constant: &str) -> bool {
        let names = self.entries.entry(type_key.to_string()).or_default();
        if names.iter().any(|n| n == constant) {
            return false;
        }
        names.push(constant.to_string());
        true
    }

    /// Constants of `type_key` in discovery order; empty if the type is unknown.
    pub fn constants(&self, type_key: &str) -> &[String] {
        self.entries
            .get(type_key)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stable content hash of the serialized form.
    pub fn fingerprint(&self) -> String {
        fingerprint_catalog(&self.to_string())
    }
}

impl std::fmt::Display for ConstantCatalog {
    /// `key1:[n1 n2 n3] key2:[n1 n2]`, keys sorted.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (key, names)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{key}:[{}]", names.join(" "))?;
        }
        Ok(())
    }
}
