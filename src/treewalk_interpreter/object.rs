use super::builtins::Builtin;
use super::errors::{EvalError, RuntimeResult};
use super::function::MonkeyFn;
use crate::monkey_frontend::grammar::{InfixOperator, PrefixOperator};

use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Array(Vec<Object>),
    Function(MonkeyFn),
    Builtin(&'static Builtin),
    Null,
    Error(String),
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::String(_) => "STRING",
            Object::Array(_) => "ARRAY",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Null => "NULL",
            Object::Error(_) => "ERROR",
        }
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    pub fn apply_infix_op(op: InfixOperator, lhs: Object, rhs: Object) -> RuntimeResult<Object> {
        match (lhs, rhs) {
            (Object::Integer(a), Object::Integer(b)) => integer_infix_op(op, a, b),
            (Object::Boolean(a), Object::Boolean(b)) => match op {
                InfixOperator::EqualTo => Ok(Object::Boolean(a == b)),
                InfixOperator::NotEqualTo => Ok(Object::Boolean(a != b)),
                _ => Err(EvalError::UnknownInfixOperator("BOOLEAN", op, "BOOLEAN")),
            },
            (Object::String(a), Object::String(b)) => match op {
                InfixOperator::Add => Ok(Object::String(a + &b)),
                InfixOperator::EqualTo => Ok(Object::Boolean(a == b)),
                InfixOperator::NotEqualTo => Ok(Object::Boolean(a != b)),
                _ => Err(EvalError::UnknownInfixOperator("STRING", op, "STRING")),
            },
            (lhs, rhs) if lhs.type_name() != rhs.type_name() => Err(EvalError::TypeMismatch(
                lhs.type_name(),
                op,
                rhs.type_name(),
            )),
            (lhs, rhs) => Err(EvalError::UnknownInfixOperator(
                lhs.type_name(),
                op,
                rhs.type_name(),
            )),
        }
    }

    /// `!` collapses every value other than `false` and `null` to `false`.
    pub fn apply_prefix_op(op: PrefixOperator, value: Object) -> RuntimeResult<Object> {
        match op {
            PrefixOperator::Negate => match value {
                Object::Integer(n) => Ok(Object::Integer(n.wrapping_neg())),
                _ => Err(EvalError::UnknownPrefixOperator(op, value.type_name())),
            },
            PrefixOperator::LogicalNot => {
                Ok(Object::Boolean(matches!(value, Object::Boolean(false) | Object::Null)))
            }
        }
    }

    /// Indexing past either end yields null. Strings are indexed by byte.
    pub fn index(lhs: Object, index: Object) -> RuntimeResult<Object> {
        match (lhs, index) {
            (Object::Array(elements), Object::Integer(i)) => Ok(usize::try_from(i)
                .ok()
                .and_then(|i| elements.get(i))
                .cloned()
                .unwrap_or(Object::Null)),
            (Object::String(s), Object::Integer(i)) => Ok(usize::try_from(i)
                .ok()
                .and_then(|i| byte_slice(&s, i))
                .unwrap_or(Object::Null)),
            (Object::Array(_) | Object::String(_), index) => Err(EvalError::IndexNotInteger(index)),
            (lhs, _) => Err(EvalError::NotIndexable(lhs)),
        }
    }
}

/// One-byte substring at `idx`, if it falls on character boundaries.
pub fn byte_slice(s: &str, idx: usize) -> Option<Object> {
    let end = idx.checked_add(1)?;
    s.get(idx..end).map(|c| Object::String(c.to_owned()))
}

fn integer_infix_op(op: InfixOperator, a: i64, b: i64) -> RuntimeResult<Object> {
    let result = match op {
        InfixOperator::Add => Object::Integer(a.wrapping_add(b)),
        InfixOperator::Subtract => Object::Integer(a.wrapping_sub(b)),
        InfixOperator::Multiply => Object::Integer(a.wrapping_mul(b)),
        InfixOperator::Divide => {
            if b == 0 {
                return Err(EvalError::DivisionByZero);
            }
            Object::Integer(a.wrapping_div(b))
        }
        InfixOperator::EqualTo => Object::Boolean(a == b),
        InfixOperator::NotEqualTo => Object::Boolean(a != b),
        InfixOperator::GreaterThan => Object::Boolean(a > b),
        InfixOperator::GreaterEq => Object::Boolean(a >= b),
        InfixOperator::LessThan => Object::Boolean(a < b),
        InfixOperator::LessEq => Object::Boolean(a <= b),
    };
    Ok(result)
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "{}", n),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::String(s) => write!(f, "\"{}\"", s),
            Object::Array(elements) => {
                let elements: Vec<_> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Object::Function(func) => write!(f, "{}", func),
            Object::Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
            Object::Null => write!(f, "null"),
            Object::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(s: &str) -> Object {
        Object::String(s.to_owned())
    }

    #[test]
    fn test_truthiness() {
        assert!(Object::Integer(0).is_truthy());
        assert!(string("").is_truthy());
        assert!(Object::Array(vec![]).is_truthy());
        assert!(!Object::Boolean(false).is_truthy());
        assert!(!Object::Null.is_truthy());
    }

    #[test]
    fn test_bang_operator() {
        let not = |value| Object::apply_prefix_op(PrefixOperator::LogicalNot, value);
        assert_eq!(not(Object::Boolean(true)), Ok(Object::Boolean(false)));
        assert_eq!(not(Object::Boolean(false)), Ok(Object::Boolean(true)));
        assert_eq!(not(Object::Null), Ok(Object::Boolean(true)));
        assert_eq!(not(Object::Integer(5)), Ok(Object::Boolean(false)));
        assert_eq!(not(Object::Integer(0)), Ok(Object::Boolean(false)));
    }

    #[test]
    fn test_integer_arithmetic() {
        let apply = |op, a, b| Object::apply_infix_op(op, Object::Integer(a), Object::Integer(b));
        assert_eq!(apply(InfixOperator::Divide, -7, 2), Ok(Object::Integer(-3)));
        assert_eq!(
            apply(InfixOperator::Add, i64::MAX, 1),
            Ok(Object::Integer(i64::MIN))
        );
        assert_eq!(
            apply(InfixOperator::Divide, 1, 0),
            Err(EvalError::DivisionByZero)
        );
        assert_eq!(apply(InfixOperator::LessEq, 1, 2), Ok(Object::Boolean(true)));
    }

    #[test]
    fn test_mismatched_operands() {
        assert_eq!(
            Object::apply_infix_op(InfixOperator::Add, Object::Integer(5), Object::Boolean(true)),
            Err(EvalError::TypeMismatch("INTEGER", InfixOperator::Add, "BOOLEAN"))
        );
        assert_eq!(
            Object::apply_infix_op(InfixOperator::EqualTo, Object::Null, Object::Null),
            Err(EvalError::UnknownInfixOperator("NULL", InfixOperator::EqualTo, "NULL"))
        );
        assert_eq!(
            Object::apply_infix_op(InfixOperator::Add, string("foo"), string("bar")),
            Ok(string("foobar"))
        );
    }

    #[test]
    fn test_indexing() {
        let array = Object::Array(vec![Object::Integer(1), Object::Integer(2)]);
        assert_eq!(
            Object::index(array.clone(), Object::Integer(1)),
            Ok(Object::Integer(2))
        );
        assert_eq!(Object::index(array.clone(), Object::Integer(2)), Ok(Object::Null));
        assert_eq!(Object::index(array, Object::Integer(-1)), Ok(Object::Null));

        assert_eq!(
            Object::index(string("foobar"), Object::Integer(5)),
            Ok(string("r"))
        );
        // Second byte of a two byte character.
        assert_eq!(Object::index(string("é"), Object::Integer(1)), Ok(Object::Null));

        assert_eq!(
            Object::index(Object::Boolean(true), Object::Integer(-1)),
            Err(EvalError::NotIndexable(Object::Boolean(true)))
        );
    }

    #[test]
    fn test_inspect() {
        let array = Object::Array(vec![Object::Integer(1), string("two"), Object::Null]);
        assert_eq!(array.to_string(), "[1, \"two\", null]");
        assert_eq!(Object::Error("boom".to_owned()).to_string(), "ERROR: boom");
        assert_eq!(Object::Boolean(false).to_string(), "false");
    }
}
