//! Lowering of tree-sitter-go nodes into the syntax model.

use tree_sitter::Node;

use super::comments::CommentMap;
use super::scope;
use crate::model::{
    Binding, ConstDecl, Expr, FuncDecl, GoFile, LiteralKind, MethodDecl, SwitchStmt, TypeDecl,
    TypeExpr, VarDecl,
};
use crate::treesitter::{node_line, node_text};

pub(super) fn lower_type(node: Node<'_>, source: &[u8]) -> TypeExpr {
    match node.kind() {
        "type_identifier" => TypeExpr::Named {
            package: None,
            name: node_text(node, source).to_string(),
        },
        "qualified_type" => {
            let package = node.child_by_field_name("package");
            let name = node.child_by_field_name("name");
            match (package, name) {
                (Some(p), Some(n)) => TypeExpr::Named {
                    package: Some(node_text(p, source).to_string()),
                    name: node_text(n, source).to_string(),
                },
                _ => TypeExpr::Other(node_text(node, source).to_string()),
            }
        }
        "parenthesized_type" => match node.named_child(0) {
            Some(inner) => lower_type(inner, source),
            None => TypeExpr::Other(node_text(node, source).to_string()),
        },
        "pointer_type" => match node.named_child(0) {
            Some(inner) => TypeExpr::Pointer(Box::new(lower_type(inner, source))),
            None => TypeExpr::Other(node_text(node, source).to_string()),
        },
        "slice_type" => match node.child_by_field_name("element") {
            Some(elem) => TypeExpr::Slice(Box::new(lower_type(elem, source))),
            None => TypeExpr::Other(node_text(node, source).to_string()),
        },
        "array_type" | "implicit_length_array_type" => {
            let len = node
                .child_by_field_name("length")
                .map_or("...", |l| node_text(l, source));
            match node.child_by_field_name("element") {
                Some(elem) => TypeExpr::Array {
                    len: len.to_string(),
                    elem: Box::new(lower_type(elem, source)),
                },
                None => TypeExpr::Other(node_text(node, source).to_string()),
            }
        }
        "map_type" => {
            let key = node.child_by_field_name("key");
            let value = node.child_by_field_name("value");
            match (key, value) {
                (Some(k), Some(v)) => TypeExpr::Map {
                    key: Box::new(lower_type(k, source)),
                    value: Box::new(lower_type(v, source)),
                },
                _ => TypeExpr::Other(node_text(node, source).to_string()),
            }
        }
        _ => TypeExpr::Other(node_text(node, source).to_string()),
    }
}

pub(super) fn lower_expr(node: Node<'_>, source: &[u8]) -> Expr {
    match node.kind() {
        "identifier" | "iota" | "true" | "false" | "nil" => {
            Expr::Ident(node_text(node, source).to_string())
        }
        "selector_expression" => {
            let operand = node.child_by_field_name("operand");
            let field = node.child_by_field_name("field");
            match (operand, field) {
                (Some(o), Some(f)) => Expr::Selector {
                    operand: Box::new(lower_expr(o, source)),
                    field: node_text(f, source).to_string(),
                },
                _ => Expr::Other(node_text(node, source).to_string()),
            }
        }
        "call_expression" => match node.child_by_field_name("function") {
            Some(callee) => Expr::Call {
                callee: Box::new(lower_expr(callee, source)),
            },
            None => Expr::Other(node_text(node, source).to_string()),
        },
        "composite_literal" | "type_conversion_expression" => {
            match node.child_by_field_name("type") {
                Some(ty) => Expr::Composite(lower_type(ty, source)),
                None => Expr::Other(node_text(node, source).to_string()),
            }
        }
        "int_literal" => Expr::Literal(LiteralKind::Int),
        "float_literal" => Expr::Literal(LiteralKind::Float),
        "imaginary_literal" => Expr::Literal(LiteralKind::Imaginary),
        "rune_literal" => Expr::Literal(LiteralKind::Rune),
        "interpreted_string_literal" | "raw_string_literal" => Expr::Literal(LiteralKind::String),
        "parenthesized_expression" => match node.named_child(0) {
            Some(inner) => lower_expr(inner, source),
            None => Expr::Other(node_text(node, source).to_string()),
        },
        "unary_expression" => {
            let operator = node
                .child_by_field_name("operator")
                .map(|op| node_text(op, source));
            match (operator, node.child_by_field_name("operand")) {
                (Some("*"), Some(operand)) => Expr::Deref(Box::new(lower_expr(operand, source))),
                (Some("&" | "<-"), _) | (_, None) => {
                    Expr::Other(node_text(node, source).to_string())
                }
                // Sign and complement keep the operand's type.
                (_, Some(operand)) => lower_expr(operand, source),
            }
        }
        "binary_expression" => {
            let left = node.child_by_field_name("left");
            let right = node.child_by_field_name("right");
            match (left, right) {
                (Some(l), Some(r)) => Expr::Binary {
                    left: Box::new(lower_expr(l, source)),
                    right: Box::new(lower_expr(r, source)),
                },
                _ => Expr::Other(node_text(node, source).to_string()),
            }
        }
        _ => Expr::Other(node_text(node, source).to_string()),
    }
}

/// Lowered expressions of an `expression_list` (or a single expression).
pub(super) fn lower_expr_list(node: Node<'_>, source: &[u8]) -> Vec<Expr> {
    if node.kind() != "expression_list" {
        return vec![lower_expr(node, source)];
    }
    let mut cursor = node.walk();
    let exprs = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .map(|c| lower_expr(c, source))
        .collect();
    exprs
}

/// Named nodes stored under a (possibly repeated) field. Comma separators
/// inside a `commaSep1` field are skipped.
pub(super) fn field_names<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let nodes = node
        .children_by_field_name(field, &mut cursor)
        .filter(|n| n.is_named())
        .collect();
    nodes
}

/// `var_spec` nodes of a `var_declaration`, flattening grouped forms.
pub(super) fn var_specs<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    specs_of(node, "var_spec")
}

/// `const_spec` nodes of a `const_declaration`, flattening grouped forms.
pub(super) fn const_specs<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    specs_of(node, "const_spec")
}

fn specs_of<'t>(node: Node<'t>, kind: &str) -> Vec<Node<'t>> {
    let mut specs = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == kind {
            specs.push(child);
        } else if child.kind().strip_suffix("_list") == Some(kind) {
            specs.extend(specs_of(child, kind));
        }
    }
    specs
}

pub(super) struct Lowering<'a> {
    source: &'a [u8],
    comments: CommentMap,
    pub(super) file: GoFile,
}

impl<'a> Lowering<'a> {
    pub(super) fn new(root: Node<'_>, source: &'a [u8], file: GoFile) -> Self {
        Self {
            source,
            comments: CommentMap::build(root, source),
            file,
        }
    }

    pub(super) fn visit(&mut self, node: Node<'_>) {
        let top_level = node.parent().is_some_and(|p| p.kind() == "source_file");
        match node.kind() {
            "const_declaration" => self.lower_consts(node, top_level),
            "var_declaration" if top_level => self.lower_vars(node),
            "type_declaration" if top_level => self.lower_types(node),
            "function_declaration" => self.lower_func(node),
            "method_declaration" => self.lower_method(node),
            "expression_switch_statement" => {
                let stmt = self.lower_switch(node);
                self.file.switches.push(stmt);
            }
            _ => {}
        }
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child);
        }
    }

    /// Applies Go's implicit repetition: a spec with neither type nor values
    /// reuses the previous spec's type and expression list.
    fn lower_consts(&mut self, node: Node<'_>, package_level: bool) {
        let mut prev_type: Option<TypeExpr> = None;
        let mut prev_values: Vec<Expr> = Vec::new();

        for spec in const_specs(node) {
            let mut type_expr = spec
                .child_by_field_name("type")
                .map(|t| lower_type(t, self.source));
            let mut values = spec
                .child_by_field_name("value")
                .map(|v| lower_expr_list(v, self.source))
                .unwrap_or_default();

            if type_expr.is_none() && values.is_empty() {
                type_expr = prev_type.clone();
                values = prev_values.clone();
            } else {
                prev_type = type_expr.clone();
                prev_values = values.clone();
            }

            for (i, name) in field_names(spec, "name").into_iter().enumerate() {
                let name_text = node_text(name, self.source);
                if name_text == "_" {
                    continue;
                }
                self.file.constants.push(ConstDecl {
                    name: name_text.to_string(),
                    type_expr: type_expr.clone(),
                    value: values.get(i).cloned(),
                    line: node_line(name),
                    package_level,
                });
            }
        }
    }

    fn lower_vars(&mut self, node: Node<'_>) {
        for spec in var_specs(node) {
            let type_expr = spec
                .child_by_field_name("type")
                .map(|t| lower_type(t, self.source));
            let values = spec
                .child_by_field_name("value")
                .map(|v| lower_expr_list(v, self.source))
                .unwrap_or_default();
            let names = field_names(spec, "name");
            let single_valued = values.len() == names.len();
            for (i, name) in names.into_iter().enumerate() {
                self.file.vars.push(VarDecl {
                    name: node_text(name, self.source).to_string(),
                    type_expr: type_expr.clone(),
                    value: if single_valued { values.get(i).cloned() } else { None },
                });
            }
        }
    }

    fn lower_types(&mut self, node: Node<'_>) {
        let mut cursor = node.walk();
        for spec in node.named_children(&mut cursor) {
            if !matches!(spec.kind(), "type_spec" | "type_alias") {
                continue;
            }
            let Some(name) = spec.child_by_field_name("name") else {
                continue;
            };
            let fields = spec
                .child_by_field_name("type")
                .filter(|t| t.kind() == "struct_type")
                .map(|t| self.struct_fields(t))
                .unwrap_or_default();
            self.file.types.push(TypeDecl {
                name: node_text(name, self.source).to_string(),
                fields,
            });
        }
    }

    fn struct_fields(&self, struct_type: Node<'_>) -> Vec<(String, TypeExpr)> {
        let mut fields = Vec::new();
        let mut cursor = struct_type.walk();
        for list in struct_type.named_children(&mut cursor) {
            if list.kind() != "field_declaration_list" {
                continue;
            }
            let mut list_cursor = list.walk();
            for decl in list.named_children(&mut list_cursor) {
                if decl.kind() != "field_declaration" {
                    continue;
                }
                let Some(ty) = decl.child_by_field_name("type") else {
                    continue;
                };
                let ty = lower_type(ty, self.source);
                for name in field_names(decl, "name") {
                    fields.push((node_text(name, self.source).to_string(), ty.clone()));
                }
            }
        }
        fields
    }

    fn lower_func(&mut self, node: Node<'_>) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let result = node
            .child_by_field_name("result")
            .and_then(|r| single_result(r, self.source));
        self.file.funcs.push(FuncDecl {
            name: node_text(name, self.source).to_string(),
            result,
        });
    }

    fn lower_method(&mut self, node: Node<'_>) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let Some(receiver) = node
            .child_by_field_name("receiver")
            .and_then(|r| receiver_type_name(r, self.source))
        else {
            return;
        };
        let result = node
            .child_by_field_name("result")
            .and_then(|r| single_result(r, self.source));
        self.file.methods.push(MethodDecl {
            receiver,
            name: node_text(name, self.source).to_string(),
            result,
        });
    }

    fn lower_switch(&self, node: Node<'_>) -> SwitchStmt {
        let tag = node
            .child_by_field_name("value")
            .map(|v| lower_expr(v, self.source));
        let tag_binding = match tag.as_ref().and_then(|t| t.root_ident()) {
            Some(root) => scope::bind(root, node, self.source),
            None => Binding::Package,
        };

        let mut cases = Vec::new();
        let mut cursor = node.walk();
        for clause in node.named_children(&mut cursor) {
            if clause.kind() != "expression_case" {
                continue;
            }
            if let Some(values) = clause.child_by_field_name("value") {
                cases.extend(lower_expr_list(values, self.source));
            }
        }

        let start = node.start_position();
        SwitchStmt {
            line: start.row as u32 + 1,
            column: start.column as u32 + 1,
            tag,
            tag_binding,
            cases,
            comments: self.comments.leading(start.row),
        }
    }
}

/// `T` for a `(r T)`, `(r *T)` or `(r *T[K])` receiver list.
fn receiver_type_name(receiver: Node<'_>, source: &[u8]) -> Option<String> {
    let mut cursor = receiver.walk();
    let param = receiver
        .named_children(&mut cursor)
        .find(|c| c.kind() == "parameter_declaration")?;
    let mut ty = param.child_by_field_name("type")?;
    loop {
        match ty.kind() {
            "type_identifier" => return Some(node_text(ty, source).to_string()),
            "pointer_type" | "parenthesized_type" => ty = ty.named_child(0)?,
            "generic_type" => ty = ty.child_by_field_name("type")?,
            _ => return None,
        }
    }
}

/// Result type of a function returning exactly one value.
fn single_result(result: Node<'_>, source: &[u8]) -> Option<TypeExpr> {
    if result.kind() != "parameter_list" {
        return Some(lower_type(result, source));
    }
    let mut cursor = result.walk();
    let params: Vec<Node<'_>> = result
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "parameter_declaration")
        .collect();
    match params.as_slice() {
        [only] if field_names(*only, "name").len() <= 1 => only
            .child_by_field_name("type")
            .map(|t| lower_type(t, source)),
        _ => None,
    }
}
