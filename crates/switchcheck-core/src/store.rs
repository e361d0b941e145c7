use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::catalog::ConstantCatalog;
use crate::types::ModuleHandle;

/// Cross-module fact store for published constant catalogs.
///
/// Contract: once `export(m, ..)` returns, every later `import(m)` on any
/// thread sees the whole catalog. The engine only reads a module's catalog
/// after the level that exported it has finished.
pub trait FactStore: Send + Sync {
    /// Publish (or replace) the catalog of `module`.
    fn export(&self, module: ModuleHandle, catalog: ConstantCatalog);

    /// Fetch the catalog of `module`, `None` if nothing was published.
    fn import(&self, module: ModuleHandle) -> Option<Arc<ConstantCatalog>>;

    /// Fingerprint of the published catalog, if any.
    fn fingerprint(&self, module: ModuleHandle) -> Option<String>;
}

#[derive(Debug, Clone)]
struct StoredCatalog {
    fingerprint: String,
    catalog: Arc<ConstantCatalog>,
}

/// In-memory [`FactStore`], keyed by module handle with content fingerprints.
#[derive(Debug, Default)]
pub struct MemoryFactStore {
    entries: RwLock<HashMap<ModuleHandle, StoredCatalog>>,
}

impl MemoryFactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of modules with a published catalog.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FactStore for MemoryFactStore {
    fn export(&self, module: ModuleHandle, catalog: ConstantCatalog) {
        let fingerprint = catalog.fingerprint();
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = entries.get(&module) {
            if existing.fingerprint == fingerprint {
                // Same content: keep the existing Arc so readers share it.
                return;
            }
        }
        entries.insert(
            module,
            StoredCatalog {
                fingerprint,
                catalog: Arc::new(catalog),
            },
        );
    }

    fn import(&self, module: ModuleHandle) -> Option<Arc<ConstantCatalog>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&module)
            .map(|s| Arc::clone(&s.catalog))
    }

    fn fingerprint(&self, module: ModuleHandle) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&module)
            .map(|s| s.fingerprint.clone())
    }
}
