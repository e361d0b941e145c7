//! Package clause and import extraction from tree-sitter query matches.

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

use crate::model::{ImportAlias, ImportDecl};
use crate::treesitter::{node_line, node_text};

/// Returns the declared package name and the file's imports in source order.
pub(super) fn extract_header(
    query: &Query,
    root: Node<'_>,
    source: &[u8],
) -> (Option<String>, Vec<ImportDecl>) {
    let mut cursor = QueryCursor::new();
    let capture_names = query.capture_names();
    let mut matches = cursor.matches(query, root, source);

    let mut package_name = None;
    let mut imports = Vec::new();

    while let Some(m) = matches.next() {
        let mut path = None;
        let mut spec = None;

        for cap in m.captures {
            match capture_names[cap.index as usize] {
                "package.name" => {
                    package_name = Some(node_text(cap.node, source).to_string());
                }
                "import.path" => {
                    let raw = node_text(cap.node, source);
                    path = Some(raw.trim_matches('"').trim_matches('`').to_string());
                }
                "import" => spec = Some(cap.node),
                _ => {}
            }
        }

        if let (Some(path), Some(spec)) = (path, spec) {
            imports.push(ImportDecl {
                path,
                alias: import_alias(spec, source),
                line: node_line(spec),
            });
        }
    }

    imports.sort_by_key(|i| i.line);
    (package_name, imports)
}

fn import_alias(spec: Node<'_>, source: &[u8]) -> ImportAlias {
    let Some(name) = spec.child_by_field_name("name") else {
        return ImportAlias::Default;
    };
    match name.kind() {
        "blank_identifier" => ImportAlias::Blank,
        "dot" => ImportAlias::Dot,
        _ => match node_text(name, source) {
            "_" => ImportAlias::Blank,
            "." => ImportAlias::Dot,
            alias => ImportAlias::Named(alias.to_string()),
        },
    }
}
