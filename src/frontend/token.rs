//! Token definitions for exprc

use std::fmt;

use crate::types::TypeName;
use crate::utils::Span;

/// A token produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(span: Span) -> Self {
        Self { kind: TokenKind::Eof, span }
    }
}

/// Token kinds
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ============ Type Keywords ============
    /// int
    Int,
    /// float
    Float,
    /// char
    Char,
    /// string
    String,

    // ============ Reserved Words ============
    /// if
    If,
    /// else
    Else,
    /// while
    While,
    /// for
    For,
    /// return
    Return,

    // ============ Identifiers and Literals ============
    /// Identifier (variable name)
    Ident(String),
    /// Integer literal
    IntLit(i64),
    /// Floating-point literal
    FloatLit(f64),
    /// Character literal
    CharLit(char),
    /// String literal
    StringLit(String),

    // ============ Operators ============
    /// =
    Eq,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// ;
    Semicolon,

    // ============ Special ============
    /// End of file
    Eof,
}

impl TokenKind {
    /// Try to convert an identifier to a keyword
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        match s {
            "int" => Some(TokenKind::Int),
            "float" => Some(TokenKind::Float),
            "char" => Some(TokenKind::Char),
            "string" => Some(TokenKind::String),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "while" => Some(TokenKind::While),
            "for" => Some(TokenKind::For),
            "return" => Some(TokenKind::Return),
            _ => None,
        }
    }

    /// The declared type named by a type keyword
    pub fn type_name(&self) -> Option<TypeName> {
        match self {
            TokenKind::Int => Some(TypeName::Int),
            TokenKind::Float => Some(TypeName::Float),
            TokenKind::Char => Some(TypeName::Char),
            TokenKind::String => Some(TypeName::String),
            _ => None,
        }
    }

    /// Check if this token is a reserved word without semantics
    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            TokenKind::If | TokenKind::Else | TokenKind::While | TokenKind::For | TokenKind::Return
        )
    }

    /// Grammar terminal name of the token kind
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Char => "CHAR",
            TokenKind::String => "STRING",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Return => "RETURN",
            TokenKind::Ident(_) => "NAME",
            TokenKind::IntLit(_) => "NUMBER",
            TokenKind::FloatLit(_) => "FLOAT_NUMBER",
            TokenKind::CharLit(_) => "CHAR_VALUE",
            TokenKind::StringLit(_) => "STRING_VALUE",
            TokenKind::Eq => "EQUALS",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "TIMES",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Eof => "EOF",
        }
    }
}

/// Source text of the token, as shown in syntax errors
impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => f.write_str(name),
            TokenKind::IntLit(n) => write!(f, "{}", n),
            TokenKind::FloatLit(x) => write!(f, "{}", x),
            TokenKind::CharLit(c) => write!(f, "'{}'", c),
            TokenKind::StringLit(s) => write!(f, "\"{}\"", s),
            TokenKind::Eq => f.write_str("="),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::Semicolon => f.write_str(";"),
            TokenKind::Eof => f.write_str("end of input"),
            keyword => f.write_str(&keyword.name().to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_round_trip_through_display() {
        for word in ["int", "float", "char", "string", "if", "else", "while", "for", "return"] {
            let kind = TokenKind::keyword_from_str(word).unwrap();
            assert_eq!(kind.to_string(), word);
        }
        assert_eq!(TokenKind::keyword_from_str("integer"), None);
    }

    #[test]
    fn test_type_keywords() {
        assert_eq!(TokenKind::Float.type_name(), Some(TypeName::Float));
        assert_eq!(TokenKind::While.type_name(), None);
        assert!(TokenKind::While.is_reserved());
    }
}
