//! Structured Feedback Module
//!
//! Machine-readable reports of an analysis run: diagnostics with stable
//! error codes, the final symbol table, and optionally the syntax tree.

use serde::Serialize;

use crate::frontend::ast::Node;
use crate::frontend::semantic::Symbol;
use crate::frontend::Analysis;
use crate::utils::{Error, Stage};

/// A single diagnostic
#[derive(Debug, Clone, Serialize)]
pub struct ErrorReport {
    /// Error code (e.g., "E0203")
    pub code: String,
    pub stage: Stage,
    /// Human-readable message
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ErrorReport {
    pub fn from_error(error: &Error) -> Self {
        let span = error.span();
        Self {
            code: error.code().to_string(),
            stage: error.stage(),
            message: error.to_string(),
            line: span.line,
            column: span.column,
        }
    }
}

/// Complete report for one source file
#[derive(Debug, Clone, Serialize)]
pub struct Report<'a> {
    pub success: bool,
    pub source_file: String,
    pub statement_count: usize,
    /// Nodes in the syntax tree, 0 when nothing parsed
    pub node_count: usize,
    pub diagnostics: Vec<ErrorReport>,
    pub symbols: Vec<&'a Symbol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<&'a Node>,
}

impl<'a> Report<'a> {
    pub fn new(analysis: &'a Analysis, source_file: &str) -> Self {
        Self {
            success: analysis.is_ok(),
            source_file: source_file.to_string(),
            statement_count: analysis.statement_count(),
            node_count: analysis.program.as_ref().map_or(0, Node::size),
            diagnostics: analysis.diagnostics.iter().map(ErrorReport::from_error).collect(),
            symbols: analysis.symbols.iter().collect(),
            tree: None,
        }
    }

    /// Include the syntax tree in the report
    pub fn with_tree(mut self, analysis: &'a Analysis) -> Self {
        self.tree = analysis.program.as_ref();
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
