//! Package-scope semantic resolution for Go.
//!
//! Answers identity questions (`what does this expression name?`) and type
//! questions (`what type does this constant / switch tag have?`) from the
//! lowered declarations of every package in the workspace. Types are
//! resolved structurally from declarations; there is no full type checker.

use std::collections::HashMap;

use switchcheck_core::types::{DeclKind, ResolvedName, TypeName};

use crate::model::{
    Binding, ConstDecl, Expr, FuncDecl, GoPackage, ImportAlias, MethodDecl, SwitchStmt, TypeDecl,
    TypeExpr, VarDecl,
};
use crate::resolver::SemanticResolver;

const MAX_INFERENCE_DEPTH: usize = 16;

const PREDECLARED_TYPES: &[&str] = &[
    "any", "bool", "byte", "comparable", "complex64", "complex128", "error", "float32",
    "float64", "int", "int8", "int16", "int32", "int64", "rune", "string", "uint", "uint8",
    "uint16", "uint32", "uint64", "uintptr",
];

/// Declarations and import bindings of one package.
#[derive(Debug, Default)]
pub(crate) struct PackageScope {
    path: String,
    consts: HashMap<String, ConstDecl>,
    vars: HashMap<String, VarDecl>,
    types: HashMap<String, TypeDecl>,
    funcs: HashMap<String, FuncDecl>,
    /// (receiver type name, method name) -> declaration.
    methods: HashMap<(String, String), MethodDecl>,
    /// Local identifier -> import path.
    imports: HashMap<String, String>,
    /// Import paths of `import . "path"` declarations.
    dot_imports: Vec<String>,
}

impl PackageScope {
    fn lookup(&self, name: &str) -> Option<DeclKind> {
        if self.consts.contains_key(name) {
            Some(DeclKind::Constant)
        } else if self.vars.contains_key(name) {
            Some(DeclKind::Variable)
        } else if self.types.contains_key(name) {
            Some(DeclKind::Type)
        } else if self.funcs.contains_key(name) {
            Some(DeclKind::Function)
        } else {
            None
        }
    }

    /// Import path bound to a local identifier.
    fn import_path(&self, local: &str) -> Option<&str> {
        self.imports.get(local).map(|p| p.as_str())
    }
}

/// Scopes of every package in the workspace, keyed by import path.
#[derive(Debug, Default)]
pub struct PackageIndex {
    scopes: HashMap<String, PackageScope>,
}

impl PackageIndex {
    pub fn build(packages: &[GoPackage]) -> Self {
        let names: HashMap<&str, &str> = packages
            .iter()
            .map(|p| (p.path.as_str(), p.name.as_str()))
            .collect();

        let scopes = packages
            .iter()
            .map(|pkg| (pkg.path.clone(), build_scope(pkg, &names)))
            .collect();
        Self { scopes }
    }

    fn scope(&self, path: &str) -> Option<&PackageScope> {
        self.scopes.get(path)
    }

    /// Resolver answering in the context of package `path`.
    pub fn resolver(&self, path: &str) -> Option<GoSemanticResolver<'_>> {
        let scope = self.scopes.get(path)?;
        Some(GoSemanticResolver { index: self, scope })
    }
}

fn build_scope(pkg: &GoPackage, names: &HashMap<&str, &str>) -> PackageScope {
    let mut scope = PackageScope {
        path: pkg.path.clone(),
        ..Default::default()
    };

    // Package-level constants shadow function-local ones of the same name.
    let (package_level, local): (Vec<&ConstDecl>, Vec<&ConstDecl>) =
        pkg.constants().partition(|c| c.package_level);
    for c in package_level.into_iter().chain(local) {
        scope.consts.entry(c.name.clone()).or_insert_with(|| c.clone());
    }

    for file in &pkg.files {
        for v in &file.vars {
            scope.vars.entry(v.name.clone()).or_insert_with(|| v.clone());
        }
        for t in &file.types {
            scope.types.entry(t.name.clone()).or_insert_with(|| t.clone());
        }
        for f in &file.funcs {
            scope.funcs.entry(f.name.clone()).or_insert_with(|| f.clone());
        }
        for m in &file.methods {
            scope
                .methods
                .entry((m.receiver.clone(), m.name.clone()))
                .or_insert_with(|| m.clone());
        }
    }

    for imp in pkg.imports() {
        let local = match &imp.alias {
            ImportAlias::Named(alias) => alias.clone(),
            ImportAlias::Default => names
                .get(imp.path.as_str())
                .map(|n| n.to_string())
                .unwrap_or_else(|| imp.default_name().to_string()),
            ImportAlias::Dot => {
                if !scope.dot_imports.contains(&imp.path) {
                    scope.dot_imports.push(imp.path.clone());
                }
                continue;
            }
            ImportAlias::Blank => continue,
        };
        match scope.imports.get(&local) {
            Some(existing) if *existing != imp.path => {
                tracing::warn!(
                    package = %pkg.path,
                    alias = %local,
                    kept = %existing,
                    ignored = %imp.path,
                    "conflicting import alias across files"
                );
            }
            Some(_) => {}
            None => {
                scope.imports.insert(local, imp.path.clone());
            }
        }
    }

    scope
}

/// A named type seen through `pointers` levels of indirection.
#[derive(Debug, Clone)]
struct Indirect {
    name: TypeName,
    pointers: usize,
}

impl Indirect {
    fn direct(name: TypeName) -> Self {
        Self { name, pointers: 0 }
    }

    fn pointee(mut self) -> Option<Self> {
        self.pointers = self.pointers.checked_sub(1)?;
        Some(self)
    }

    /// Pointer types have no constants; they are reported as written.
    fn into_named(self) -> Result<TypeName, String> {
        match self.pointers {
            0 => Ok(self.name),
            n => Err(format!("{}{}", "*".repeat(n), self.name)),
        }
    }
}

/// [`SemanticResolver`] for one package of a [`PackageIndex`].
pub struct GoSemanticResolver<'a> {
    index: &'a PackageIndex,
    scope: &'a PackageScope,
}

impl<'a> GoSemanticResolver<'a> {
    fn dot_scopes(&self, scope: &'a PackageScope) -> impl Iterator<Item = &'a PackageScope> {
        let index = self.index;
        scope.dot_imports.iter().filter_map(move |p| index.scope(p))
    }

    fn resolve_in(&self, scope: &'a PackageScope, expr: &Expr) -> Option<ResolvedName> {
        match expr {
            Expr::Ident(name) => {
                let found = scope.lookup(name).map(|kind| (scope, kind)).or_else(|| {
                    self.dot_scopes(scope)
                        .find_map(|s| s.lookup(name).map(|kind| (s, kind)))
                });
                found.map(|(owner, kind)| ResolvedName {
                    qualified: format!("{}.{name}", owner.path),
                    kind,
                })
            }
            Expr::Selector { operand, field } => {
                let Expr::Ident(alias) = operand.as_ref() else {
                    return None;
                };
                let path = scope.import_path(alias)?;
                let kind = match self.index.scope(path) {
                    Some(target) => target.lookup(field)?,
                    None => DeclKind::External,
                };
                Some(ResolvedName {
                    qualified: format!("{path}.{field}"),
                    kind,
                })
            }
            _ => None,
        }
    }

    /// Type named by a type expression written in `scope`.
    fn named_type(&self, scope: &'a PackageScope, ty: &TypeExpr) -> Result<TypeName, String> {
        match ty {
            TypeExpr::Named {
                package: None,
                name,
            } => {
                if scope.types.contains_key(name) {
                    return Ok(TypeName::qualified(&scope.path, name));
                }
                if PREDECLARED_TYPES.contains(&name.as_str()) {
                    return Ok(TypeName::builtin(name));
                }
                if let Some(owner) = self.dot_scopes(scope).find(|s| s.types.contains_key(name)) {
                    return Ok(TypeName::qualified(&owner.path, name));
                }
                // Declared in a file that failed to parse, most likely.
                Ok(TypeName::qualified(&scope.path, name))
            }
            TypeExpr::Named {
                package: Some(alias),
                name,
            } => scope
                .import_path(alias)
                .map(|path| TypeName::qualified(path, name))
                .ok_or_else(|| ty.to_string()),
            _ => Err(ty.to_string()),
        }
    }

    /// Like [`named_type`](Self::named_type), looking through pointer types.
    fn indirect_type(&self, scope: &'a PackageScope, ty: &TypeExpr) -> Result<Indirect, String> {
        match ty {
            TypeExpr::Pointer(inner) => {
                let mut target = self.indirect_type(scope, inner)?;
                target.pointers += 1;
                Ok(target)
            }
            _ => self.named_type(scope, ty).map(Indirect::direct),
        }
    }

    fn const_type_in(
        &self,
        scope: &'a PackageScope,
        decl: &ConstDecl,
        depth: usize,
    ) -> Option<TypeName> {
        if let Some(ty) = &decl.type_expr {
            return self.named_type(scope, ty).ok();
        }
        let value = decl.value.as_ref()?;
        self.expr_type(scope, value, depth + 1)?.into_named().ok()
    }

    fn var_type_in(&self, scope: &'a PackageScope, decl: &VarDecl, depth: usize) -> Option<Indirect> {
        if let Some(ty) = &decl.type_expr {
            return self.indirect_type(scope, ty).ok();
        }
        let value = decl.value.as_ref()?;
        self.expr_type(scope, value, depth + 1)
    }

    fn func_type_in(&self, scope: &'a PackageScope, name: &str) -> Option<Indirect> {
        if scope.types.contains_key(name) || PREDECLARED_TYPES.contains(&name) {
            // Conversion `T(x)`.
            return self
                .named_type(
                    scope,
                    &TypeExpr::Named {
                        package: None,
                        name: name.to_string(),
                    },
                )
                .map(Indirect::direct)
                .ok();
        }
        let result = scope.funcs.get(name)?.result.as_ref()?;
        self.indirect_type(scope, result).ok()
    }

    /// Type of a package-level expression evaluated in `scope`.
    fn expr_type(&self, scope: &'a PackageScope, expr: &Expr, depth: usize) -> Option<Indirect> {
        if depth > MAX_INFERENCE_DEPTH {
            return None;
        }
        let builtin = |name: &str| Some(Indirect::direct(TypeName::builtin(name)));
        match expr {
            Expr::Literal(kind) => builtin(kind.untyped_name()),
            Expr::Ident(name) => {
                if let Some(c) = scope.consts.get(name) {
                    return self.const_type_in(scope, c, depth).map(Indirect::direct);
                }
                if let Some(v) = scope.vars.get(name) {
                    return self.var_type_in(scope, v, depth);
                }
                match name.as_str() {
                    "true" | "false" => return builtin("untyped bool"),
                    "iota" => return builtin("untyped int"),
                    _ => {}
                }
                let owner = self
                    .dot_scopes(scope)
                    .find(|s| s.consts.contains_key(name) || s.vars.contains_key(name))?;
                self.expr_type(owner, expr, depth + 1)
            }
            Expr::Selector { operand, field } => {
                if let Expr::Ident(alias) = operand.as_ref() {
                    if let Some(path) = scope.import_path(alias) {
                        let target = self.index.scope(path)?;
                        return self.expr_type(target, &Expr::Ident(field.clone()), depth + 1);
                    }
                }
                let base = self.expr_type(scope, operand, depth + 1)?;
                self.field_type(&base.name, field).ok()
            }
            Expr::Call { callee } => match callee.as_ref() {
                Expr::Ident(name) => self.func_type_in(scope, name),
                Expr::Selector { operand, field } => {
                    if let Expr::Ident(alias) = operand.as_ref() {
                        if let Some(path) = scope.import_path(alias) {
                            let target = self.index.scope(path)?;
                            return self.func_type_in(target, field);
                        }
                    }
                    let base = self.expr_type(scope, operand, depth + 1)?;
                    self.method_type(&base.name, field).ok()
                }
                _ => None,
            },
            Expr::Deref(inner) => self.expr_type(scope, inner, depth + 1)?.pointee(),
            Expr::Composite(ty) => self.indirect_type(scope, ty).ok(),
            Expr::Binary { left, right } => {
                let l = self.expr_type(scope, left, depth + 1);
                let r = self.expr_type(scope, right, depth + 1);
                match (l, r) {
                    (Some(l), _) if l.name.package.is_some() => Some(l),
                    (_, Some(r)) if r.name.package.is_some() => Some(r),
                    (l, r) => l.or(r),
                }
            }
            Expr::Other(_) => None,
        }
    }

    /// Type of struct field `field` of the named type `base`.
    fn field_type(&self, base: &TypeName, field: &str) -> Result<Indirect, String> {
        let not_found = || format!("{base}.{field}");
        let owner = base
            .package
            .as_deref()
            .and_then(|p| self.index.scope(p))
            .ok_or_else(not_found)?;
        let decl = owner.types.get(&base.name).ok_or_else(not_found)?;
        let (_, ty) = decl
            .fields
            .iter()
            .find(|(name, _)| name == field)
            .ok_or_else(not_found)?;
        self.indirect_type(owner, ty)
    }

    /// Result type of method `method` declared on the named type `base`.
    fn method_type(&self, base: &TypeName, method: &str) -> Result<Indirect, String> {
        let not_found = || format!("{base}.{method}(...)");
        let owner = base
            .package
            .as_deref()
            .and_then(|p| self.index.scope(p))
            .ok_or_else(not_found)?;
        let result = owner
            .methods
            .get(&(base.name.clone(), method.to_string()))
            .and_then(|m| m.result.as_ref())
            .ok_or_else(not_found)?;
        self.indirect_type(owner, result)
    }

    /// Follow field selectors, method calls and dereferences from an
    /// already typed root. Selectors look through pointers.
    fn apply_selectors(&self, expr: &Expr, root: Indirect) -> Result<Indirect, String> {
        match expr {
            Expr::Ident(_) => Ok(root),
            Expr::Selector { operand, field } => {
                let base = self.apply_selectors(operand, root)?;
                self.field_type(&base.name, field)
            }
            Expr::Call { callee } => match callee.as_ref() {
                Expr::Selector { operand, field } => {
                    let base = self.apply_selectors(operand, root)?;
                    self.method_type(&base.name, field)
                }
                _ => Err(expr.to_string()),
            },
            Expr::Deref(inner) => self
                .apply_selectors(inner, root)?
                .pointee()
                .ok_or_else(|| expr.to_string()),
            other => Err(other.to_string()),
        }
    }

    /// Written type of a ranged-over collection.
    fn collection_type(&self, collection: &Expr, binding: &Binding) -> Option<TypeExpr> {
        match (collection, binding) {
            (Expr::Composite(ty), _) => Some(ty.clone()),
            (Expr::Ident(_), Binding::Typed(ty)) => Some(ty.clone()),
            (
                Expr::Ident(_),
                Binding::Inferred {
                    expr: Expr::Composite(ty),
                    ..
                },
            ) => Some(ty.clone()),
            (Expr::Ident(name), Binding::Package) => {
                let var = self.scope.vars.get(name)?;
                match (&var.type_expr, &var.value) {
                    (Some(ty), _) | (None, Some(Expr::Composite(ty))) => Some(ty.clone()),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Type of `expr` whose root identifier is bound by `binding`.
    fn bound_type(&self, expr: &Expr, binding: &Binding) -> Result<Indirect, String> {
        let root = match binding {
            Binding::Package => {
                return self
                    .expr_type(self.scope, expr, 0)
                    .ok_or_else(|| expr.to_string());
            }
            Binding::Typed(ty) => self.indirect_type(self.scope, ty)?,
            Binding::Inferred { expr: init, root } => match root {
                Some(inner) => self.bound_type(init, inner)?,
                None => self
                    .expr_type(self.scope, init, 0)
                    .ok_or_else(|| init.to_string())?,
            },
            Binding::Element {
                collection,
                binding,
                key,
            } => {
                let ty = self
                    .collection_type(collection, binding)
                    .ok_or_else(|| format!("range over {collection}"))?;
                let elem = ty
                    .range_element(*key)
                    .ok_or_else(|| format!("range over {ty}"))?;
                self.indirect_type(self.scope, &elem)?
            }
            Binding::Opaque(why) => return Err(why.clone()),
        };
        self.apply_selectors(expr, root)
    }
}

impl SemanticResolver for GoSemanticResolver<'_> {
    fn module_path(&self) -> &str {
        &self.scope.path
    }

    fn resolve(&self, expr: &Expr) -> Option<ResolvedName> {
        self.resolve_in(self.scope, expr)
    }

    fn constant_type(&self, decl: &ConstDecl) -> Option<TypeName> {
        self.const_type_in(self.scope, decl, 0)
    }

    fn tag_type(&self, switch: &SwitchStmt) -> Result<TypeName, String> {
        match &switch.tag {
            Some(tag) => self
                .bound_type(tag, &switch.tag_binding)
                .and_then(Indirect::into_named),
            None => Err("<none>".to_string()),
        }
    }
}
