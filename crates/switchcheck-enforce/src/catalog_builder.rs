use switchcheck_core::catalog::ConstantCatalog;
use switchcheck_core::store::FactStore;
use switchcheck_core::types::ModuleHandle;
use switchcheck_parsers::model::GoPackage;
use switchcheck_parsers::resolver::SemanticResolver;

/// Group every constant declared in `pkg` by its declaring type.
///
/// Files are visited in order, declarations in source order, function-local
/// constants included. Constants whose type cannot be determined are skipped.
pub fn build_catalog(pkg: &GoPackage, resolver: &dyn SemanticResolver) -> ConstantCatalog {
    let mut catalog = ConstantCatalog::new();
    for decl in pkg.constants() {
        let Some(ty) = resolver.constant_type(decl) else {
            tracing::debug!(
                package = %pkg.path,
                constant = %decl.name,
                line = decl.line,
                "constant type unresolved; not cataloged"
            );
            continue;
        };
        catalog.insert(&ty.key(), &resolver.constant_name(decl));
    }
    catalog
}

/// Build the catalog of `pkg` and publish it under `module`.
pub fn export_catalog(
    pkg: &GoPackage,
    module: ModuleHandle,
    resolver: &dyn SemanticResolver,
    store: &dyn FactStore,
) {
    let catalog = build_catalog(pkg, resolver);
    tracing::debug!(package = %pkg.path, types = catalog.len(), "exporting catalog");
    store.export(module, catalog);
}
