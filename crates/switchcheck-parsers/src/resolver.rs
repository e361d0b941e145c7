use switchcheck_core::types::{ResolvedName, TypeName};

use crate::model::{ConstDecl, Expr, SwitchStmt};

/// The semantic capability the switch checker consumes.
///
/// One implementation exists per analysed module; it answers questions in
/// the context of that module's scope and imports.
pub trait SemanticResolver: Send + Sync {
    /// Import path of the module this resolver answers for.
    fn module_path(&self) -> &str;

    /// Resolve an identifier or `pkg.Name` selector to its declared name and
    /// kind. `None` when the expression does not name a declaration.
    fn resolve(&self, expr: &Expr) -> Option<ResolvedName>;

    /// Qualified name of a constant declared in this module.
    fn constant_name(&self, decl: &ConstDecl) -> String {
        format!("{}.{}", self.module_path(), decl.name)
    }

    /// Declared (or untyped default) type of a constant of this module.
    fn constant_type(&self, decl: &ConstDecl) -> Option<TypeName>;

    /// Type of the switch tag. `Err` carries the text shown in the
    /// `unexpected type:` diagnostic.
    fn tag_type(&self, switch: &SwitchStmt) -> Result<TypeName, String>;
}
