//! Frontend module - Lexer, Parser, Semantic Analysis

pub mod token;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod semantic;
pub mod tree_printer;

use log::info;

use crate::utils::Error;
use ast::Node;
use lexer::Lexer;
pub use parser::{Options, Recovery};
use parser::Parser;
use semantic::SymbolTable;

/// Result of analyzing one source text
#[derive(Debug)]
pub struct Analysis {
    /// Tree of the statements that succeeded
    pub program: Option<Node>,
    /// Final state of every declared variable
    pub symbols: SymbolTable,
    /// Lexical, syntax and semantic errors, in source order
    pub diagnostics: Vec<Error>,
}

impl Analysis {
    /// True when the source produced no diagnostics at all
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn statement_count(&self) -> usize {
        self.program.as_ref().map_or(0, |p| p.statements().count())
    }
}

/// Analyze source text with default options
pub fn analyze(source: &str) -> Analysis {
    analyze_with(source, Options::default())
}

/// Analyze source text into a fresh symbol table
pub fn analyze_with(source: &str, options: Options) -> Analysis {
    let mut symbols = SymbolTable::new();
    let mut parser = Parser::new(Lexer::new(source)).with_options(options);
    let (program, diagnostics) = parser.parse_into(&mut symbols);

    info!(
        "analyzed {} statement(s), {} symbol(s), {} diagnostic(s)",
        program.as_ref().map_or(0, |p| p.statements().count()),
        symbols.len(),
        diagnostics.len()
    );

    Analysis {
        program,
        symbols,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn test_runs_do_not_share_symbols() {
        let first = analyze("int x; x = 1;");
        let second = analyze("int x; x = 2;");

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(first.symbols.get("x").unwrap().value, Some(Value::Integer(1)));
        assert_eq!(second.symbols.get("x").unwrap().value, Some(Value::Integer(2)));
    }

    #[test]
    fn test_halt_option() {
        let source = "x = 1; int y;";

        let halted = analyze_with(source, Options { recovery: Recovery::Halt });
        assert_eq!(halted.statement_count(), 0);
        assert!(halted.symbols.is_empty());

        let continued = analyze(source);
        assert_eq!(continued.statement_count(), 1);
        assert_eq!(continued.diagnostics.len(), 1);
    }
}
