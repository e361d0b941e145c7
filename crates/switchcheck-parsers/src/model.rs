//! Syntax model lowered from tree-sitter-go.
//!
//! Only what the switch checker and its resolver need is kept: imports,
//! package-level declarations, constants, and expression switches.

/// How an import binds its local identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportAlias {
    /// `import "x/a"`: bound to the imported package's declared name.
    Default,
    /// `import xa "x/a"`
    Named(String),
    /// `import _ "x/a"`
    Blank,
    /// `import . "x/a"`
    Dot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub path: String,
    pub alias: ImportAlias,
    pub line: u32,
}

impl ImportDecl {
    /// Last segment of the import path, the usual package name.
    pub fn default_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Kind of a basic literal, used for untyped constant types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Int,
    Float,
    Imaginary,
    Rune,
    String,
}

impl LiteralKind {
    pub fn untyped_name(&self) -> &'static str {
        match self {
            LiteralKind::Int => "untyped int",
            LiteralKind::Float => "untyped float",
            LiteralKind::Imaginary => "untyped complex",
            LiteralKind::Rune => "untyped rune",
            LiteralKind::String => "untyped string",
        }
    }
}

/// Expression shapes the resolver understands. Everything else is `Other`
/// with its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    Selector { operand: Box<Expr>, field: String },
    Call { callee: Box<Expr> },
    /// `*p`
    Deref(Box<Expr>),
    Composite(TypeExpr),
    Literal(LiteralKind),
    Binary { left: Box<Expr>, right: Box<Expr> },
    Other(String),
}

impl Expr {
    /// Leftmost identifier: `v` for `v`, `s` for `s.Kind`, `f` for `f()`.
    pub fn root_ident(&self) -> Option<&str> {
        match self {
            Expr::Ident(name) => Some(name),
            Expr::Selector { operand, .. } => operand.root_ident(),
            Expr::Call { callee } => callee.root_ident(),
            Expr::Deref(inner) => inner.root_ident(),
            _ => None,
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Ident(name) => f.write_str(name),
            Expr::Selector { operand, field } => write!(f, "{operand}.{field}"),
            Expr::Call { callee } => write!(f, "{callee}(...)"),
            Expr::Deref(inner) => write!(f, "*{inner}"),
            Expr::Composite(ty) => write!(f, "{ty}{{...}}"),
            Expr::Literal(kind) => f.write_str(kind.untyped_name()),
            Expr::Binary { left, right } => write!(f, "{left} op {right}"),
            Expr::Other(text) => f.write_str(text),
        }
    }
}

/// A type as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `TestKind` or `xa.TestKind` (package is the identifier as written).
    Named {
        package: Option<String>,
        name: String,
    },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    /// `[N]T`, with `len` as written (`...` for `[...]T`).
    Array { len: String, elem: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    /// Func, channel, interface, generic instantiation, ...
    Other(String),
}

impl TypeExpr {
    /// Type of the key (`key = true`) or value variable of a `range` over
    /// this type.
    pub fn range_element(&self, key: bool) -> Option<TypeExpr> {
        match self {
            TypeExpr::Slice(elem) | TypeExpr::Array { elem, .. } => Some(if key {
                TypeExpr::Named {
                    package: None,
                    name: "int".to_string(),
                }
            } else {
                elem.as_ref().clone()
            }),
            TypeExpr::Map { key: k, value } => {
                Some(if key { k.as_ref().clone() } else { value.as_ref().clone() })
            }
            TypeExpr::Pointer(inner) if matches!(inner.as_ref(), TypeExpr::Array { .. }) => {
                inner.range_element(key)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeExpr::Named {
                package: Some(pkg),
                name,
            } => write!(f, "{pkg}.{name}"),
            TypeExpr::Named { package: None, name } => f.write_str(name),
            TypeExpr::Pointer(inner) => write!(f, "*{inner}"),
            TypeExpr::Slice(elem) => write!(f, "[]{elem}"),
            TypeExpr::Array { len, elem } => write!(f, "[{len}]{elem}"),
            TypeExpr::Map { key, value } => write!(f, "map[{key}]{value}"),
            TypeExpr::Other(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstDecl {
    pub name: String,
    /// Explicit type, or the one inherited by implicit repetition.
    pub type_expr: Option<TypeExpr>,
    pub value: Option<Expr>,
    pub line: u32,
    pub package_level: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub name: String,
    pub type_expr: Option<TypeExpr>,
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    /// Named struct fields, empty for non-struct types.
    pub fields: Vec<(String, TypeExpr)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    pub name: String,
    /// Result type when the function returns exactly one value.
    pub result: Option<TypeExpr>,
}

/// A method with a named (possibly pointer) receiver type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Receiver type name without `*`.
    pub receiver: String,
    pub name: String,
    pub result: Option<TypeExpr>,
}

/// What the switch tag's root identifier is bound to in its enclosing scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// `var v T`, parameter `v T`.
    Typed(TypeExpr),
    /// `v := expr` or `var v = expr`. `root` is the local binding of the
    /// expression's own root identifier, if it has one.
    Inferred {
        expr: Expr,
        root: Option<Box<Binding>>,
    },
    /// Key (`key = true`) or value variable of `range collection`.
    /// `binding` is the local binding of the collection's root identifier.
    Element {
        collection: Expr,
        binding: Box<Binding>,
        key: bool,
    },
    /// Bound locally in a way the resolver cannot type (multi-value
    /// assignments, variadic parameters).
    Opaque(String),
    /// Not bound locally: a package-level name or an import alias.
    Package,
}

/// One `switch` statement with a tag expression form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchStmt {
    pub line: u32,
    pub column: u32,
    pub tag: Option<Expr>,
    pub tag_binding: Binding,
    /// Case label expressions across all clauses, in source order.
    pub cases: Vec<Expr>,
    /// Lines of the comment block directly above the statement, markers stripped.
    pub comments: Vec<String>,
}

/// Lowered contents of one `.go` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoFile {
    pub path: String,
    pub package_name: String,
    pub imports: Vec<ImportDecl>,
    pub constants: Vec<ConstDecl>,
    pub vars: Vec<VarDecl>,
    pub types: Vec<TypeDecl>,
    pub funcs: Vec<FuncDecl>,
    pub methods: Vec<MethodDecl>,
    pub switches: Vec<SwitchStmt>,
}

/// A Go package: every file of one directory sharing an import path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoPackage {
    /// Import path, e.g. `x/a` or `github.com/acme/app/kinds`.
    pub path: String,
    pub name: String,
    /// Files sorted by path.
    pub files: Vec<GoFile>,
}

impl GoPackage {
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.files.iter().flat_map(|f| f.imports.iter())
    }

    /// Constants of every file in encounter order.
    pub fn constants(&self) -> impl Iterator<Item = &ConstDecl> {
        self.files.iter().flat_map(|f| f.constants.iter())
    }

    /// Switch statements paired with their file, in source order.
    pub fn switches(&self) -> impl Iterator<Item = (&GoFile, &SwitchStmt)> {
        self.files
            .iter()
            .flat_map(|f| f.switches.iter().map(move |s| (f, s)))
    }
}
