//! exprc - front-end for a small typed expression language
//!
//! Lexes, parses and type checks programs made of declarations
//! (`int x;`) and assignments (`x = 2 + 3 * 4;`). Expressions are
//! evaluated while the tree is built, and every assignment is checked
//! against the variable's declared type.
//!
//! ```
//! let analysis = exprc::analyze("float y; y = 5.2 + 3;");
//! assert!(analysis.is_ok());
//! assert_eq!(analysis.symbols.get("y").unwrap().value, Some(exprc::Value::Float(8.2)));
//! ```

pub mod feedback;
pub mod frontend;
pub mod types;
pub mod utils;

pub use frontend::ast::{BinOp, Leaf, Node, NodeKind};
pub use frontend::semantic::{Symbol, SymbolTable};
pub use frontend::tree_printer::{print_tree, statement_kinds};
pub use frontend::{analyze, analyze_with, Analysis, Options, Recovery};
pub use types::{TypeName, Value};
pub use utils::{Error, Result, Span, Stage};
