use super::object::Object;
use crate::monkey_frontend::grammar::{InfixOperator, PrefixOperator};

use thiserror::Error;

#[derive(Debug, PartialEq, Clone, Error)]
pub enum EvalError {
    #[error("type mismatch: {0} {} {2}", .1.symbol())]
    TypeMismatch(&'static str, InfixOperator, &'static str),
    #[error("unknown operator: {0} {} {2}", .1.symbol())]
    UnknownInfixOperator(&'static str, InfixOperator, &'static str),
    #[error("unknown operator: {}{1}", .0.symbol())]
    UnknownPrefixOperator(PrefixOperator, &'static str),
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    #[error("identifier already declared: {0}")]
    AlreadyDeclared(String),
    #[error("not a function: {0}")]
    NotAFunction(&'static str),
    #[error("Index must be an integer. Found {0} ({})", .0.type_name())]
    IndexNotInteger(Object),
    #[error("Expected array. Found {0} ({})", .0.type_name())]
    NotIndexable(Object),
    #[error("division by zero")]
    DivisionByZero,
    #[error("wrong number of arguments. got={got}, want={want}")]
    WrongArity { got: usize, want: usize },
    #[error("argument to `{0}` not supported, got {1}")]
    UnsupportedArgument(&'static str, &'static str),
    #[error("argument to `push` must be ARRAY, got {0}")]
    PushTarget(&'static str),
}

pub type RuntimeResult<T> = Result<T, EvalError>;

/// Reasons for abandoning the evaluation of a statement list early. A
/// `Return` is caught at the nearest function call or at the program root.
#[derive(Debug, PartialEq)]
pub enum Interrupt {
    Return(Object),
    Error(EvalError),
}

impl From<EvalError> for Interrupt {
    fn from(error: EvalError) -> Self {
        Interrupt::Error(error)
    }
}

pub type EvalResult<T> = Result<T, Interrupt>;

impl Interrupt {
    /// Settles an interrupt at a call boundary: returned values become the
    /// result, errors keep propagating.
    pub fn into_result(self) -> RuntimeResult<Object> {
        match self {
            Interrupt::Return(value) => Ok(value),
            Interrupt::Error(error) => Err(error),
        }
    }
}
