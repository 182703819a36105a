//! Tree Printer - Pretty print the syntax tree
//!
//! One node per line, indented two spaces per level, with the leaf in
//! parentheses when present:
//!
//! ```text
//! program
//!   statement_list
//!     statement
//!       decl
//!         type (int)
//!         name (x)
//! ```

use crate::frontend::ast::{Node, NodeKind};

const INDENT: &str = "  ";

/// Pretty printer for syntax trees
pub struct TreePrinter {
    output: String,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self { output: String::new() }
    }

    /// Print a tree to string
    pub fn print(&mut self, root: &Node) -> String {
        self.output.clear();
        self.print_node(root, 0);
        std::mem::take(&mut self.output)
    }

    fn print_node(&mut self, node: &Node, level: usize) {
        self.output.push_str(&INDENT.repeat(level));
        self.output.push_str(node.kind.as_str());
        if let Some(leaf) = &node.leaf {
            // keep one node per line even for multi-line strings
            let text = leaf.to_string().replace('\n', "\\n");
            self.output.push_str(&format!(" ({})", text));
        }
        self.output.push('\n');

        for child in &node.children {
            self.print_node(child, level + 1);
        }
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

/// Print a syntax tree to string
pub fn print_tree(root: &Node) -> String {
    TreePrinter::new().print(root)
}

/// Recover the kinds of the statements, in order, from printed tree text
pub fn statement_kinds(printed: &str) -> Vec<NodeKind> {
    let mut kinds = Vec::new();
    let mut statement_depth = None;

    for line in printed.lines() {
        let body = line.trim_start_matches(' ');
        let depth = (line.len() - body.len()) / INDENT.len();
        let word = body.split(' ').next().unwrap_or_default();

        if statement_depth == Some(depth.wrapping_sub(1)) {
            if let Ok(kind) = word.parse::<NodeKind>() {
                kinds.push(kind);
            }
        }
        statement_depth = (word == NodeKind::Statement.as_str()).then_some(depth);
    }

    kinds
}
