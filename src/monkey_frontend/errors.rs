use super::span::Span;
use super::token::TokenKind;

use thiserror::Error;

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ParserErrorType {
    #[error("Expect next token to be {expected}. Found {found}")]
    ExpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },
    #[error("No prefixParseFn for {0}")]
    NoPrefixParseFn(TokenKind),
    #[error("Failed to parse int: {0}")]
    InvalidInteger(String),
}

/// A syntax error together with the location of the offending token.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
#[error("{error}")]
pub struct ParserError {
    pub span: Span,
    pub error: ParserErrorType,
}

pub type ParserResult<T> = Result<T, ParserError>;

impl ParserError {
    pub fn new(span: Span, error: ParserErrorType) -> Self {
        ParserError { span, error }
    }

    pub fn line(&self) -> usize {
        self.span.start_pos.line_no
    }
}
