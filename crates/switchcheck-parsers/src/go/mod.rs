//! Go front end: tree-sitter-go parsing, lowering, and semantic resolution.

mod comments;
mod imports;
mod lower;
mod scope;
pub mod semantic;

use std::path::Path;

use tree_sitter::Query;

use crate::model::GoFile;
use crate::queries;
use crate::treesitter::{language_for_name, ParseError, TreeSitterParser};

pub use semantic::{GoSemanticResolver, PackageIndex};

/// Parses Go files into the [`GoFile`] model.
///
/// Not `Sync`; create one per worker thread.
pub struct GoFrontEnd {
    parser: TreeSitterParser,
    query: Query,
}

impl GoFrontEnd {
    pub fn new() -> Result<Self, ParseError> {
        let lang = language_for_name("go")?;
        let query = queries::query_for_language(&lang, "go").map_err(ParseError::Query)?;
        Ok(Self {
            parser: TreeSitterParser::new(),
            query,
        })
    }

    /// Parse and lower one file. `path` is only used for display.
    pub fn parse_file(&mut self, path: &Path, content: &str) -> Result<GoFile, ParseError> {
        let source = content.as_bytes();
        let tree = self.parser.parse("go", source)?;
        let root = tree.root_node();
        let shown_path = path.to_string_lossy().to_string();

        if root.has_error() {
            tracing::debug!(file = %shown_path, "syntax errors present; lowering what parsed");
        }

        let (package_name, imports) = imports::extract_header(&self.query, root, source);
        let package_name = package_name.ok_or_else(|| ParseError::MissingPackageClause {
            path: shown_path.clone(),
        })?;

        let file = GoFile {
            path: shown_path,
            package_name,
            imports,
            ..Default::default()
        };
        let mut lowering = lower::Lowering::new(root, source, file);
        lowering.visit(root);
        Ok(lowering.file)
    }
}
