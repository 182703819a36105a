//! Runtime values produced by literals and constant folding

use std::fmt;

use serde::Serialize;

use crate::frontend::ast::BinOp;
use crate::utils::{Error, Result, Span};

/// Longest text a repetition may produce, in bytes
pub const MAX_TEXT_LEN: usize = 1 << 20;

/// A fully evaluated value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Value {
    Integer(i64),
    Float(f64),
    Character(char),
    Text(String),
}

impl Value {
    /// Name of the value's kind, as used in diagnostics
    pub fn type_label(&self) -> &'static str {
        match self {
            Self::Integer(_) => "int",
            Self::Float(_) => "float",
            Self::Character(_) => "char",
            Self::Text(_) => "string",
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            Self::Character(c) => Some(c.to_string()),
            Self::Text(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Self::Integer(n) => *n == 0,
            Self::Float(x) => *x == 0.0,
            _ => false,
        }
    }

    /// Apply a binary operator to two evaluated operands.
    ///
    /// Integer arithmetic is checked. `/` is true division and always
    /// yields a float. Text supports `+` (concatenation) and `*` with a
    /// non-negative integer (repetition). A repetition longer than
    /// [`MAX_TEXT_LEN`] is an `IntegerOverflow`.
    pub fn binary(op: BinOp, left: &Value, right: &Value, span: Span) -> Result<Value> {
        if op == BinOp::Div && right.is_zero() && left.as_f64().is_some() {
            return Err(Error::DivisionByZero { span });
        }

        if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
            let checked = match op {
                BinOp::Add => Some(a.checked_add(*b)),
                BinOp::Sub => Some(a.checked_sub(*b)),
                BinOp::Mul => Some(a.checked_mul(*b)),
                BinOp::Div => None,
            };
            if let Some(result) = checked {
                return result
                    .map(Value::Integer)
                    .ok_or(Error::IntegerOverflow { op, span });
            }
        }

        if let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) {
            let result = match op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                BinOp::Mul => a * b,
                BinOp::Div => a / b,
            };
            return Ok(Value::Float(result));
        }

        match Self::text_binary(op, left, right, span)? {
            Some(value) => Ok(value),
            None => Err(Error::InvalidOperands {
                op,
                left: left.type_label().to_string(),
                right: right.type_label().to_string(),
                span,
            }),
        }
    }

    /// `Ok(None)` when the operands are not a valid text combination
    fn text_binary(op: BinOp, left: &Value, right: &Value, span: Span) -> Result<Option<Value>> {
        match (op, left, right) {
            (BinOp::Add, _, _) => {
                let (Some(mut text), Some(tail)) = (left.as_text(), right.as_text()) else {
                    return Ok(None);
                };
                text.push_str(&tail);
                Ok(Some(Value::Text(text)))
            }
            (BinOp::Mul, Value::Integer(n), other) | (BinOp::Mul, other, Value::Integer(n)) => {
                let (Ok(count), Some(text)) = (usize::try_from(*n), other.as_text()) else {
                    return Ok(None);
                };
                match text.len().checked_mul(count) {
                    Some(len) if len <= MAX_TEXT_LEN => Ok(Some(Value::Text(text.repeat(count)))),
                    _ => Err(Error::IntegerOverflow { op, span }),
                }
            }
            _ => Ok(None),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            // shortest round-trip form, always with a '.' or exponent
            Self::Float(x) => write!(f, "{:?}", x),
            Self::Character(c) => write!(f, "{}", c),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(op: BinOp, left: Value, right: Value) -> Result<Value> {
        Value::binary(op, &left, &right, Span::new(1, 1))
    }

    #[test]
    fn test_integer_arithmetic_stays_integral() {
        assert_eq!(eval(BinOp::Add, Value::Integer(2), Value::Integer(3)), Ok(Value::Integer(5)));
        assert_eq!(eval(BinOp::Sub, Value::Integer(2), Value::Integer(3)), Ok(Value::Integer(-1)));
        assert_eq!(eval(BinOp::Mul, Value::Integer(4), Value::Integer(3)), Ok(Value::Integer(12)));
    }

    #[test]
    fn test_mixed_arithmetic_widens() {
        match eval(BinOp::Add, Value::Float(5.2), Value::Integer(3)) {
            Ok(Value::Float(x)) => assert!((x - 8.2).abs() < 1e-9),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_division_is_true_division() {
        assert_eq!(eval(BinOp::Div, Value::Integer(4), Value::Integer(2)), Ok(Value::Float(2.0)));
        assert_eq!(eval(BinOp::Div, Value::Integer(7), Value::Integer(2)), Ok(Value::Float(3.5)));
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            eval(BinOp::Div, Value::Integer(1), Value::Integer(0)),
            Err(Error::DivisionByZero { .. })
        ));
        assert!(matches!(
            eval(BinOp::Div, Value::Float(1.5), Value::Float(0.0)),
            Err(Error::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_overflow_is_reported() {
        assert!(matches!(
            eval(BinOp::Mul, Value::Integer(i64::MAX), Value::Integer(2)),
            Err(Error::IntegerOverflow { op: BinOp::Mul, .. })
        ));
    }

    #[test]
    fn test_text_operations() {
        assert_eq!(
            eval(BinOp::Add, Value::Text("ho".into()), Value::Character('l')),
            Ok(Value::Text("hol".into()))
        );
        assert_eq!(
            eval(BinOp::Mul, Value::Integer(3), Value::Text("ab".into())),
            Ok(Value::Text("ababab".into()))
        );
        assert!(matches!(
            eval(BinOp::Sub, Value::Text("a".into()), Value::Integer(1)),
            Err(Error::InvalidOperands { op: BinOp::Sub, .. })
        ));
        assert!(matches!(
            eval(BinOp::Div, Value::Text("a".into()), Value::Integer(0)),
            Err(Error::InvalidOperands { .. })
        ));
    }

    #[test]
    fn test_repetition_limits() {
        assert!(matches!(
            eval(BinOp::Mul, Value::Text("ab".into()), Value::Integer(i64::MAX)),
            Err(Error::IntegerOverflow { op: BinOp::Mul, .. })
        ));
        assert!(matches!(
            eval(BinOp::Mul, Value::Integer(10_000_000_000), Value::Character('a')),
            Err(Error::IntegerOverflow { .. })
        ));
        assert!(matches!(
            eval(BinOp::Mul, Value::Text("a".into()), Value::Integer(-1)),
            Err(Error::InvalidOperands { op: BinOp::Mul, .. })
        ));

        let longest = eval(BinOp::Mul, Value::Character('x'), Value::Integer(MAX_TEXT_LEN as i64));
        assert!(matches!(longest, Ok(Value::Text(ref s)) if s.len() == MAX_TEXT_LEN));
        assert!(matches!(
            eval(BinOp::Mul, Value::Character('x'), Value::Integer(MAX_TEXT_LEN as i64 + 1)),
            Err(Error::IntegerOverflow { .. })
        ));
        assert_eq!(
            eval(BinOp::Mul, Value::Text("ab".into()), Value::Integer(0)),
            Ok(Value::Text(String::new()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Float(8.0).to_string(), "8.0");
        assert_eq!(Value::Float(8.2).to_string(), "8.2");
        assert_eq!(Value::Float(1e20).to_string(), "1e20");
        assert_eq!(Value::Integer(4).to_string(), "4");
        assert_eq!(Value::Text("hola".into()).to_string(), "hola");
    }
}
