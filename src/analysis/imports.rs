//! Import extraction using tree-sitter for Python.
//!
//! This module parses a single source file and collects the module names
//! referenced by its `import` and `from ... import` statements, wherever they
//! appear in the file (module level, inside functions, classes or
//! conditionals).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree, TreeCursor};

/// Errors that can occur during import extraction.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode {path}: not valid UTF-8 source")]
    Decode { path: PathBuf },

    #[error("Syntax error in {path} at line {line}, column {column}")]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("Failed to parse file: {path}")]
    ParseError { path: PathBuf },

    #[error("Tree-sitter language initialization failed")]
    LanguageInit,
}

impl AnalysisError {
    /// Returns true if the file was read but is not valid Python source.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::Decode { .. }
                | AnalysisError::Syntax { .. }
                | AnalysisError::ParseError { .. }
        )
    }
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// The kind of import statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import a.b.c` or `import a.b.c as d`
    Plain,
    /// `from a.b import c`, `from . import c`, `from __future__ import c`
    From,
}

impl ImportKind {
    /// Map a tree-sitter node kind to the import statement it represents.
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "import_statement" => Some(ImportKind::Plain),
            "import_from_statement" | "future_import_statement" => Some(ImportKind::From),
            _ => None,
        }
    }
}

/// A single module reference found in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Dotted module name as written, e.g. `os.path`. Empty for `from . import x`.
    pub module: String,
    /// The kind of statement this came from
    pub kind: ImportKind,
    /// Number of leading dots of a relative from-import (0 for absolute imports)
    pub level: usize,
    /// Line number in the source file (1-indexed)
    pub line: usize,
}

impl Import {
    /// Returns true for relative from-imports such as `from .models import User`.
    pub fn is_relative(&self) -> bool {
        self.level > 0
    }
}

/// Extracts imports from Python source files.
///
/// Holds one configured tree-sitter parser, so a single extractor should be
/// reused across the files of a scan.
pub struct ImportExtractor {
    parser: Parser,
}

impl ImportExtractor {
    /// Create a new ImportExtractor.
    pub fn new() -> AnalysisResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|_| AnalysisError::LanguageInit)?;

        Ok(Self { parser })
    }

    /// Read and analyze a single file.
    pub fn extract_file(&mut self, path: &Path) -> AnalysisResult<Vec<Import>> {
        let bytes = fs::read(path).map_err(|source| AnalysisError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|_| AnalysisError::Decode {
            path: path.to_path_buf(),
        })?;

        self.extract_source(&content, path)
    }

    /// Analyze source code directly. `path` is only used in error messages.
    pub fn extract_source(&mut self, source: &str, path: &Path) -> AnalysisResult<Vec<Import>> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| AnalysisError::ParseError {
                path: path.to_path_buf(),
            })?;

        let root = tree.root_node();
        if root.has_error() {
            let (line, column) = first_error(root)
                .map(|n| (n.start_position().row + 1, n.start_position().column + 1))
                .unwrap_or((1, 1));
            return Err(AnalysisError::Syntax {
                path: path.to_path_buf(),
                line,
                column,
            });
        }

        Ok(self.extract_imports(&tree, source))
    }

    /// Extract imports from a parsed tree.
    ///
    /// Walks the tree in document order with a single cursor and no
    /// recursion, so arbitrarily deep nesting cannot exhaust the stack.
    fn extract_imports(&self, tree: &Tree, source: &str) -> Vec<Import> {
        let mut imports = Vec::new();
        let mut cursor = tree.walk();

        loop {
            let node = cursor.node();
            match ImportKind::from_node_kind(node.kind()) {
                Some(ImportKind::Plain) => self.parse_plain_import(&node, source, &mut imports),
                Some(ImportKind::From) => {
                    if let Some(import) = self.parse_from_import(&node, source) {
                        imports.push(import);
                    }
                }
                None => {
                    if cursor.goto_first_child() {
                        continue;
                    }
                }
            }

            if !advance(&mut cursor) {
                return imports;
            }
        }
    }

    /// `import a, b.c as d` yields one entry per imported name.
    fn parse_plain_import(&self, node: &Node, source: &str, imports: &mut Vec<Import>) {
        let line = node.start_position().row + 1;
        let mut cursor = node.walk();

        for name in node.children_by_field_name("name", &mut cursor) {
            let dotted = match name.kind() {
                "aliased_import" => name.child_by_field_name("name"),
                "dotted_name" => Some(name),
                _ => None,
            };

            if let Some(module) = dotted.and_then(|d| self.dotted_name(&d, source)) {
                imports.push(Import {
                    module,
                    kind: ImportKind::Plain,
                    level: 0,
                    line,
                });
            }
        }
    }

    /// `from a.b import c, d` yields `a.b` once.
    fn parse_from_import(&self, node: &Node, source: &str) -> Option<Import> {
        let line = node.start_position().row + 1;

        if node.kind() == "future_import_statement" {
            return Some(Import {
                module: "__future__".to_string(),
                kind: ImportKind::From,
                level: 0,
                line,
            });
        }

        let module_node = node.child_by_field_name("module_name")?;
        let (module, level) = match module_node.kind() {
            "dotted_name" => (self.dotted_name(&module_node, source)?, 0),
            "relative_import" => self.relative_import(&module_node, source),
            _ => return None,
        };

        Some(Import {
            module,
            kind: ImportKind::From,
            level,
            line,
        })
    }

    /// Split `..pkg.mod` into (`pkg.mod`, 2). `from . import x` gives ("", 1).
    fn relative_import(&self, node: &Node, source: &str) -> (String, usize) {
        let mut module = String::new();
        let mut level = 0;
        let mut cursor = node.walk();

        for child in node.children(&mut cursor) {
            match child.kind() {
                "import_prefix" => {
                    level = self
                        .node_text(&child, source)
                        .map(|t| t.chars().filter(|c| *c == '.').count())
                        .unwrap_or(0);
                }
                "dotted_name" => {
                    module = self.dotted_name(&child, source).unwrap_or_default();
                }
                _ => {}
            }
        }

        (module, level)
    }

    /// Rebuild a dotted name from its identifiers, dropping any whitespace
    /// or comments the source put between the segments.
    fn dotted_name(&self, node: &Node, source: &str) -> Option<String> {
        let mut cursor = node.walk();
        let segments: Vec<&str> = node
            .children(&mut cursor)
            .filter(|child| child.kind() == "identifier")
            .filter_map(|child| self.node_text(&child, source))
            .collect();

        if segments.is_empty() {
            None
        } else {
            Some(segments.join("."))
        }
    }

    /// Extract the text content of a node.
    fn node_text<'a>(&self, node: &Node, source: &'a str) -> Option<&'a str> {
        source.get(node.start_byte()..node.end_byte())
    }
}

/// Move to the next node in document order that is not below the current
/// one. Returns false once the whole tree has been visited.
fn advance(cursor: &mut TreeCursor) -> bool {
    loop {
        if cursor.goto_next_sibling() {
            return true;
        }
        if !cursor.goto_parent() {
            return false;
        }
    }
}

/// Find the first ERROR or MISSING node in document order.
fn first_error(root: Node) -> Option<Node> {
    let mut cursor = root.walk();

    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        if !advance(&mut cursor) {
            return None;
        }
    }
}

/// Read one file and return the module names it imports, in source order.
pub fn extract(path: &Path) -> AnalysisResult<Vec<String>> {
    let mut extractor = ImportExtractor::new()?;
    let imports = extractor.extract_file(path)?;
    Ok(imports.into_iter().map(|i| i.module).collect())
}
