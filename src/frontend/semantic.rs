//! Semantic Analysis for exprc
//!
//! Performs:
//! - Symbol table management (one flat namespace)
//! - Type checking and conversion on assignment

use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use crate::types::{convert, TypeName, Value};
use crate::utils::{Error, Result, Span};

// ==================== Symbol Table ====================

/// Symbol information
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeName,
    pub value: Option<Value>,
    /// Where the variable was declared
    pub span: Span,
}

/// Symbol table: name to declared type and current value.
///
/// Symbols are kept in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable with no value
    pub fn declare(&mut self, name: &str, ty: TypeName, span: Span) -> Result<()> {
        if self.index.contains_key(name) {
            return Err(Error::DuplicateDeclaration {
                name: name.to_string(),
                span,
            });
        }
        debug!("declare {} {} (line {})", ty, name, span.line);
        self.index.insert(name.to_string(), self.symbols.len());
        self.symbols.push(Symbol {
            name: name.to_string(),
            ty,
            value: None,
            span,
        });
        Ok(())
    }

    /// Check `value` against the declared type of `name` and store it.
    ///
    /// On failure the previous value is left untouched.
    pub fn assign(&mut self, name: &str, value: Value, span: Span) -> Result<&Value> {
        let Some(&slot) = self.index.get(name) else {
            return Err(Error::UndeclaredVariable {
                name: name.to_string(),
                span,
            });
        };
        let symbol = &mut self.symbols[slot];
        let converted = convert(name, value, symbol.ty, span)?;
        debug!("assign {} = {} (line {})", name, converted, span.line);
        Ok(&*symbol.value.insert(converted))
    }

    /// Look up a symbol
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&slot| &self.symbols[slot])
    }

    /// Current value of a declared and assigned variable
    pub fn read(&self, name: &str, span: Span) -> Result<&Value> {
        let symbol = self.get(name).ok_or_else(|| Error::UndeclaredVariable {
            name: name.to_string(),
            span,
        })?;
        symbol.value.as_ref().ok_or_else(|| Error::UninitializedVariable {
            name: name.to_string(),
            span,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> Span {
        Span::new(1, 1)
    }

    #[test]
    fn test_declare_has_no_value() {
        let mut table = SymbolTable::new();
        table.declare("x", TypeName::Int, span()).unwrap();

        let symbol = table.get("x").unwrap();
        assert_eq!(symbol.ty, TypeName::Int);
        assert_eq!(symbol.value, None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_duplicate_declaration() {
        let mut table = SymbolTable::new();
        table.declare("x", TypeName::Int, span()).unwrap();
        let result = table.declare("x", TypeName::Float, span());

        assert!(matches!(result, Err(Error::DuplicateDeclaration { ref name, .. }) if name == "x"));
        assert_eq!(table.get("x").unwrap().ty, TypeName::Int);
    }

    #[test]
    fn test_assign_undeclared() {
        let mut table = SymbolTable::new();
        let result = table.assign("y", Value::Integer(1), span());

        assert!(matches!(result, Err(Error::UndeclaredVariable { .. })));
        assert!(table.is_empty());
    }

    #[test]
    fn test_assign_converts() {
        let mut table = SymbolTable::new();
        table.declare("y", TypeName::Float, span()).unwrap();

        assert_eq!(table.assign("y", Value::Integer(3), span()), Ok(&Value::Float(3.0)));
        assert_eq!(table.get("y").unwrap().value, Some(Value::Float(3.0)));
    }

    #[test]
    fn test_failed_assign_keeps_previous_value() {
        let mut table = SymbolTable::new();
        table.declare("x", TypeName::Int, span()).unwrap();
        table.assign("x", Value::Integer(4), span()).unwrap();

        let result = table.assign("x", Value::Float(1.5), span());
        assert!(matches!(result, Err(Error::TypeMismatch { expected: TypeName::Int, .. })));
        assert_eq!(table.get("x").unwrap().value, Some(Value::Integer(4)));
    }

    #[test]
    fn test_read() {
        let mut table = SymbolTable::new();
        table.declare("w", TypeName::String, span()).unwrap();

        assert!(matches!(table.read("w", span()), Err(Error::UninitializedVariable { .. })));
        assert!(matches!(table.read("v", span()), Err(Error::UndeclaredVariable { .. })));

        table.assign("w", Value::Text("hola".into()), span()).unwrap();
        assert_eq!(table.read("w", span()), Ok(&Value::Text("hola".into())));
    }

    #[test]
    fn test_declaration_order() {
        let mut table = SymbolTable::new();
        for name in ["b", "a", "c"] {
            table.declare(name, TypeName::Char, span()).unwrap();
        }
        let names: Vec<_> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }
}
