//! Error handling for exprc

use crate::frontend::ast::BinOp;
use crate::types::TypeName;
use crate::utils::Span;
use serde::Serialize;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Compiler error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ==================== Lexer Errors ====================

    #[error("Illegal character '{ch}' on line {}", .span.line)]
    IllegalCharacter { ch: char, span: Span },

    #[error("Illegal literal '{text}' on line {}: {reason}", .span.line)]
    IllegalLiteral {
        text: String,
        reason: String,
        span: Span,
    },

    // ==================== Parser Errors ====================

    #[error("Syntax error at '{got}' on line {}: expected {expected}", .span.line)]
    UnexpectedToken {
        expected: String,
        got: String,
        span: Span,
    },

    #[error("Syntax error: unexpected end of input, expected {expected} (possibly a missing ';' on line {})", .span.line)]
    UnexpectedEof { expected: String, span: Span },

    // ==================== Semantic Errors ====================

    #[error("Variable '{name}' already declared (line {})", .span.line)]
    DuplicateDeclaration { name: String, span: Span },

    #[error("Variable '{name}' not declared (line {})", .span.line)]
    UndeclaredVariable { name: String, span: Span },

    #[error("Variable '{name}' used before being assigned (line {})", .span.line)]
    UninitializedVariable { name: String, span: Span },

    #[error("Type mismatch for '{name}' on line {}: expected {expected}, got {got}", .span.line)]
    TypeMismatch {
        name: String,
        expected: TypeName,
        got: String,
        span: Span,
    },

    #[error("Unknown type: {name}")]
    UnknownType { name: String, span: Span },

    #[error("Division by zero on line {}", .span.line)]
    DivisionByZero { span: Span },

    #[error("Integer overflow evaluating '{op}' on line {}", .span.line)]
    IntegerOverflow { op: BinOp, span: Span },

    #[error("Operator '{op}' cannot be applied to {left} and {right} (line {})", .span.line)]
    InvalidOperands {
        op: BinOp,
        left: String,
        right: String,
        span: Span,
    },
}

/// The compilation stage an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
}

impl Error {
    /// Get the span associated with this error
    pub fn span(&self) -> Span {
        match self {
            Self::IllegalCharacter { span, .. } => *span,
            Self::IllegalLiteral { span, .. } => *span,
            Self::UnexpectedToken { span, .. } => *span,
            Self::UnexpectedEof { span, .. } => *span,
            Self::DuplicateDeclaration { span, .. } => *span,
            Self::UndeclaredVariable { span, .. } => *span,
            Self::UninitializedVariable { span, .. } => *span,
            Self::TypeMismatch { span, .. } => *span,
            Self::UnknownType { span, .. } => *span,
            Self::DivisionByZero { span } => *span,
            Self::IntegerOverflow { span, .. } => *span,
            Self::InvalidOperands { span, .. } => *span,
        }
    }

    /// Get the stage that produced this error
    pub fn stage(&self) -> Stage {
        match self {
            Self::IllegalCharacter { .. } | Self::IllegalLiteral { .. } => Stage::Lexical,
            Self::UnexpectedToken { .. } | Self::UnexpectedEof { .. } => Stage::Syntax,
            _ => Stage::Semantic,
        }
    }

    /// Stable error code for machine-readable reports
    pub fn code(&self) -> &'static str {
        match self {
            Self::IllegalCharacter { .. } => "E0001",
            Self::IllegalLiteral { .. } => "E0002",
            Self::UnexpectedToken { .. } => "E0100",
            Self::UnexpectedEof { .. } => "E0101",
            Self::DuplicateDeclaration { .. } => "E0200",
            Self::UndeclaredVariable { .. } => "E0201",
            Self::UninitializedVariable { .. } => "E0202",
            Self::TypeMismatch { .. } => "E0203",
            Self::UnknownType { .. } => "E0204",
            Self::DivisionByZero { .. } => "E0205",
            Self::IntegerOverflow { .. } => "E0206",
            Self::InvalidOperands { .. } => "E0207",
        }
    }
}
