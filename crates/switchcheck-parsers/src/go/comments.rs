//! Comment-to-statement association.
//!
//! A statement's comment block is the run of own-line comments ending on the
//! line directly above it, with no blank line in between.

use std::collections::HashMap;

use tree_sitter::Node;

use crate::treesitter::node_text;

struct CommentBlock {
    start_row: usize,
    lines: Vec<String>,
}

pub(super) struct CommentMap {
    by_end_row: HashMap<usize, CommentBlock>,
}

impl CommentMap {
    pub(super) fn build(root: Node<'_>, source: &[u8]) -> Self {
        let mut by_end_row = HashMap::new();
        collect(root, source, &mut by_end_row);
        Self { by_end_row }
    }

    /// Comment lines directly above `row` (0-based), top to bottom.
    pub(super) fn leading(&self, row: usize) -> Vec<String> {
        let mut blocks = Vec::new();
        let mut next = row;
        while next > 0 {
            match self.by_end_row.get(&(next - 1)) {
                Some(block) => {
                    blocks.push(block);
                    next = block.start_row;
                }
                None => break,
            }
        }
        blocks
            .into_iter()
            .rev()
            .flat_map(|b| b.lines.iter().cloned())
            .collect()
    }
}

fn collect(node: Node<'_>, source: &[u8], out: &mut HashMap<usize, CommentBlock>) {
    if node.kind() == "comment" {
        if starts_own_line(node, source) {
            out.insert(
                node.end_position().row,
                CommentBlock {
                    start_row: node.start_position().row,
                    lines: comment_lines(node_text(node, source)),
                },
            );
        }
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(child, source, out);
    }
}

/// True when only whitespace precedes the comment on its first line.
fn starts_own_line(node: Node<'_>, source: &[u8]) -> bool {
    let start = node.start_byte();
    source[..start]
        .iter()
        .rev()
        .take_while(|b| **b != b'\n')
        .all(|b| b.is_ascii_whitespace())
}

/// Strip comment markers and surrounding whitespace from each line.
pub(super) fn comment_lines(raw: &str) -> Vec<String> {
    if let Some(line) = raw.strip_prefix("//") {
        return vec![line.trim().to_string()];
    }
    let body = raw
        .strip_prefix("/*")
        .and_then(|r| r.strip_suffix("*/"))
        .unwrap_or(raw);
    let mut lines: Vec<String> = body.lines().map(|l| l.trim().to_string()).collect();
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}
