//! Type System for exprc
//!
//! Declared variable types and the conversion rules applied on assignment.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::types::Value;
use crate::utils::{Error, Result, Span};

/// Type a variable can be declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeName {
    Int,
    Float,
    Char,
    String,
}

impl TypeName {
    /// Keyword spelling of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Char => "char",
            Self::String => "string",
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "char" => Ok(Self::Char),
            "string" => Ok(Self::String),
            _ => Err(Error::UnknownType {
                name: s.to_string(),
                span: Span::dummy(),
            }),
        }
    }
}

/// Check `value` against the declared type of `name` and coerce it.
///
/// - `int` accepts integers only, no narrowing from float
/// - `float` accepts integers and floats, always stored as float
/// - `char` accepts a single character
/// - `string` accepts text (a lone character is text of length one)
pub fn convert(name: &str, value: Value, target: TypeName, span: Span) -> Result<Value> {
    let converted = match (target, value) {
        (TypeName::Int, Value::Integer(n)) => Some(Value::Integer(n)),
        (TypeName::Float, Value::Integer(n)) => Some(Value::Float(n as f64)),
        (TypeName::Float, Value::Float(x)) => Some(Value::Float(x)),
        (TypeName::Char, Value::Character(c)) => Some(Value::Character(c)),
        (TypeName::Char, Value::Text(ref s)) => single_char(s).map(Value::Character),
        (TypeName::String, Value::Text(s)) => Some(Value::Text(s)),
        (TypeName::String, Value::Character(c)) => Some(Value::Text(c.to_string())),
        (_, other) => {
            return Err(Error::TypeMismatch {
                name: name.to_string(),
                expected: target,
                got: other.type_label().to_string(),
                span,
            })
        }
    };

    converted.ok_or_else(|| Error::TypeMismatch {
        name: name.to_string(),
        expected: target,
        got: "string".to_string(),
        span,
    })
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(value: Value, target: TypeName) -> Result<Value> {
        convert("v", value, target, Span::dummy())
    }

    #[test]
    fn test_int_rejects_float() {
        assert_eq!(check(Value::Integer(4), TypeName::Int), Ok(Value::Integer(4)));
        assert!(matches!(
            check(Value::Float(4.0), TypeName::Int),
            Err(Error::TypeMismatch { expected: TypeName::Int, .. })
        ));
    }

    #[test]
    fn test_float_widens_integer() {
        assert_eq!(check(Value::Integer(3), TypeName::Float), Ok(Value::Float(3.0)));
        assert!(matches!(
            check(Value::Text("3".into()), TypeName::Float),
            Err(Error::TypeMismatch { expected: TypeName::Float, .. })
        ));
    }

    #[test]
    fn test_char_needs_exactly_one_character() {
        assert_eq!(check(Value::Character('a'), TypeName::Char), Ok(Value::Character('a')));
        assert_eq!(check(Value::Text("b".into()), TypeName::Char), Ok(Value::Character('b')));
        assert!(matches!(
            check(Value::Text("ab".into()), TypeName::Char),
            Err(Error::TypeMismatch { expected: TypeName::Char, .. })
        ));
        assert!(matches!(
            check(Value::Integer(97), TypeName::Char),
            Err(Error::TypeMismatch { expected: TypeName::Char, .. })
        ));
    }

    #[test]
    fn test_string_accepts_text_only() {
        assert_eq!(
            check(Value::Text("hola".into()), TypeName::String),
            Ok(Value::Text("hola".into()))
        );
        assert_eq!(check(Value::Character('x'), TypeName::String), Ok(Value::Text("x".into())));
        assert!(matches!(
            check(Value::Float(1.5), TypeName::String),
            Err(Error::TypeMismatch { expected: TypeName::String, ref got, .. }) if got == "float"
        ));
    }

    #[test]
    fn test_unknown_type_tag() {
        assert_eq!("float".parse::<TypeName>(), Ok(TypeName::Float));
        assert!(matches!(
            "double".parse::<TypeName>(),
            Err(Error::UnknownType { ref name, .. }) if name == "double"
        ));
    }
}
