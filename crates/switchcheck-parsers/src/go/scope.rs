//! Local binding lookup for switch tags.
//!
//! Walks outward from a statement through enclosing blocks, statement
//! initializers and function signatures, looking for the nearest declaration
//! of a name that precedes the statement.

use tree_sitter::Node;

use super::lower::{const_specs, field_names, lower_expr, lower_expr_list, lower_type, var_specs};
use crate::model::{Binding, Expr};
use crate::treesitter::node_text;

const MAX_BINDING_DEPTH: usize = 8;

pub(super) fn bind(name: &str, at: Node<'_>, source: &[u8]) -> Binding {
    bind_depth(name, at, source, 0)
}

fn bind_depth(name: &str, at: Node<'_>, source: &[u8], depth: usize) -> Binding {
    if depth > MAX_BINDING_DEPTH {
        return Binding::Opaque(name.to_string());
    }

    // `switch v := f(); v {` binds in the statement's own initializer.
    if let Some(binding) = initializer_binding(at, at, name, source, depth) {
        return binding;
    }

    let mut node = at;
    while let Some(parent) = node.parent() {
        match parent.kind() {
            "block" | "statement_list" | "expression_case" | "default_case"
            | "type_case" | "communication_case" => {
                let mut found = None;
                let mut cursor = parent.walk();
                for stmt in parent.named_children(&mut cursor) {
                    if stmt.start_byte() >= node.start_byte() {
                        break;
                    }
                    if let Some(binding) = statement_binding(stmt, name, source, depth) {
                        found = Some(binding);
                    }
                }
                if let Some(binding) = found {
                    return binding;
                }
            }
            "if_statement" | "expression_switch_statement" | "type_switch_statement" => {
                if let Some(binding) = initializer_binding(parent, node, name, source, depth) {
                    return binding;
                }
            }
            "for_statement" => {
                if let Some(binding) = for_binding(parent, name, source, depth) {
                    return binding;
                }
            }
            "function_declaration" | "method_declaration" => {
                return signature_binding(parent, name, source).unwrap_or(Binding::Package);
            }
            "func_literal" => {
                if let Some(binding) = signature_binding(parent, name, source) {
                    return binding;
                }
            }
            "source_file" => return Binding::Package,
            _ => {}
        }
        node = parent;
    }
    Binding::Package
}

/// Binding introduced by `stmt`'s `initializer` field, if it precedes `child`.
fn initializer_binding(
    stmt: Node<'_>,
    child: Node<'_>,
    name: &str,
    source: &[u8],
    depth: usize,
) -> Option<Binding> {
    let init = stmt.child_by_field_name("initializer")?;
    if child.id() != stmt.id() && init.start_byte() >= child.start_byte() {
        return None;
    }
    statement_binding(init, name, source, depth)
}

fn for_binding(stmt: Node<'_>, name: &str, source: &[u8], depth: usize) -> Option<Binding> {
    let mut cursor = stmt.walk();
    for clause in stmt.named_children(&mut cursor) {
        match clause.kind() {
            "for_clause" => {
                let init = clause.child_by_field_name("initializer")?;
                return statement_binding(init, name, source, depth);
            }
            "range_clause" => {
                let left = clause.child_by_field_name("left")?;
                let index = lower_expr_list(left, source)
                    .iter()
                    .position(|e| matches!(e, Expr::Ident(n) if n == name))?;
                let collection = match clause.child_by_field_name("right") {
                    Some(right) => lower_expr(right, source),
                    None => return Some(Binding::Opaque(format!("range variable {name}"))),
                };
                let binding = match collection.root_ident() {
                    Some(root) => bind_depth(root, stmt, source, depth + 1),
                    None => Binding::Package,
                };
                return Some(Binding::Element {
                    collection,
                    binding: Box::new(binding),
                    key: index == 0,
                });
            }
            _ => {}
        }
    }
    None
}

fn statement_binding(stmt: Node<'_>, name: &str, source: &[u8], depth: usize) -> Option<Binding> {
    match stmt.kind() {
        "var_declaration" => var_specs(stmt)
            .into_iter()
            .rev()
            .find_map(|spec| var_spec_binding(spec, name, source, depth)),
        "short_var_declaration" => {
            let left = stmt.child_by_field_name("left")?;
            let right = stmt.child_by_field_name("right")?;
            let lhs = lower_expr_list(left, source);
            let index = lhs
                .iter()
                .position(|e| matches!(e, Expr::Ident(n) if n == name))?;
            let rhs = lower_expr_list(right, source);
            if rhs.len() != lhs.len() {
                return Some(Binding::Opaque(format!("multi-value assignment to {name}")));
            }
            Some(inferred(rhs[index].clone(), stmt, source, depth))
        }
        // Local constants are resolved through the package scope.
        "const_declaration" => {
            let declares = const_specs(stmt).into_iter().any(|spec| {
                field_names(spec, "name")
                    .iter()
                    .any(|n| node_text(*n, source) == name)
            });
            declares.then_some(Binding::Package)
        }
        "labeled_statement" => {
            let mut cursor = stmt.walk();
            let inner = stmt
                .named_children(&mut cursor)
                .find(|c| c.kind() != "label_name");
            inner.and_then(|s| statement_binding(s, name, source, depth))
        }
        _ => None,
    }
}

fn var_spec_binding(spec: Node<'_>, name: &str, source: &[u8], depth: usize) -> Option<Binding> {
    let names = field_names(spec, "name");
    let index = names.iter().position(|n| node_text(*n, source) == name)?;
    if let Some(ty) = spec.child_by_field_name("type") {
        return Some(Binding::Typed(lower_type(ty, source)));
    }
    let values = spec
        .child_by_field_name("value")
        .map(|v| lower_expr_list(v, source))
        .unwrap_or_default();
    if values.len() != names.len() {
        return Some(Binding::Opaque(format!("multi-value declaration of {name}")));
    }
    Some(inferred(values[index].clone(), spec, source, depth))
}

/// `Inferred` binding whose own root identifier is looked up at `at`.
fn inferred(expr: Expr, at: Node<'_>, source: &[u8], depth: usize) -> Binding {
    let root = expr
        .root_ident()
        .map(|r| bind_depth(r, at, source, depth + 1))
        .filter(|b| *b != Binding::Package)
        .map(Box::new);
    Binding::Inferred { expr, root }
}

/// Receiver, parameters and named results of a function.
fn signature_binding(func: Node<'_>, name: &str, source: &[u8]) -> Option<Binding> {
    ["receiver", "parameters", "result"]
        .iter()
        .filter_map(|field| func.child_by_field_name(field))
        .filter(|list| list.kind() == "parameter_list")
        .find_map(|list| parameter_binding(list, name, source))
}

fn parameter_binding(list: Node<'_>, name: &str, source: &[u8]) -> Option<Binding> {
    let mut cursor = list.walk();
    for param in list.named_children(&mut cursor) {
        if !matches!(
            param.kind(),
            "parameter_declaration" | "variadic_parameter_declaration"
        ) {
            continue;
        }
        let declares = field_names(param, "name")
            .iter()
            .any(|n| node_text(*n, source) == name);
        if !declares {
            continue;
        }
        let ty = param.child_by_field_name("type")?;
        if param.kind() == "variadic_parameter_declaration" {
            return Some(Binding::Opaque(format!("...{}", node_text(ty, source))));
        }
        return Some(Binding::Typed(lower_type(ty, source)));
    }
    None
}
