use std::collections::HashMap;

use switchcheck_core::types::{ModuleHandle, ModuleTable};
use switchcheck_parsers::model::{GoPackage, ImportAlias};

/// Maps the qualifiers a package uses for other modules to module handles.
///
/// Built once per package before any of its switches is checked. Holds the
/// package's own path, every import path, and each import's local name
/// (explicit alias, else the imported package's declared name, else the last
/// path segment). Blank and dot imports bind no local name.
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    own: ModuleHandle,
    by_path: HashMap<String, ModuleHandle>,
    by_ident: HashMap<String, ModuleHandle>,
}

impl ModuleRegistry {
    /// `package_names` maps workspace import paths to declared package names.
    pub fn build(
        pkg: &GoPackage,
        modules: &mut ModuleTable,
        package_names: &HashMap<String, String>,
    ) -> Self {
        let own = modules.intern(&pkg.path);
        let mut by_path = HashMap::from([(pkg.path.clone(), own)]);
        let mut by_ident = HashMap::new();

        for imp in pkg.imports() {
            let handle = modules.intern(&imp.path);
            by_path.insert(imp.path.clone(), handle);

            let ident = match &imp.alias {
                ImportAlias::Named(alias) => alias.clone(),
                ImportAlias::Default => package_names
                    .get(&imp.path)
                    .cloned()
                    .unwrap_or_else(|| imp.default_name().to_string()),
                ImportAlias::Blank | ImportAlias::Dot => continue,
            };
            match by_ident.get(&ident) {
                Some(existing) if *existing != handle => {
                    tracing::warn!(
                        package = %pkg.path,
                        alias = %ident,
                        kept = %modules.path(*existing),
                        ignored = %imp.path,
                        "conflicting import alias across files"
                    );
                }
                Some(_) => {}
                None => {
                    by_ident.insert(ident, handle);
                }
            }
        }

        Self {
            own,
            by_path,
            by_ident,
        }
    }

    /// Handle of the package this registry was built for.
    pub fn own(&self) -> ModuleHandle {
        self.own
    }

    /// Resolve an import path or a local import name.
    pub fn resolve(&self, qualifier: &str) -> Option<ModuleHandle> {
        self.by_path
            .get(qualifier)
            .or_else(|| self.by_ident.get(qualifier))
            .copied()
    }
}
