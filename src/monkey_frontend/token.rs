use super::span::Span;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TokenKind {
    Illegal,
    EndOfFile,

    // Literals.
    Identifier,
    Int,
    String,

    // Operators.
    Assign,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Bang,
    LeftAngle,
    RightAngle,
    LeftAngleEq,
    RightAngleEq,
    DoubleEq,
    BangEq,

    // Delimiters.
    Comma,
    Semicolon,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,

    // Keywords.
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::EndOfFile => "EOF",
            TokenKind::Identifier => "IDENT",
            TokenKind::Int => "INT",
            TokenKind::String => "STRING",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Bang => "!",
            TokenKind::LeftAngle => "<",
            TokenKind::RightAngle => ">",
            TokenKind::LeftAngleEq => "<=",
            TokenKind::RightAngleEq => ">=",
            TokenKind::DoubleEq => "==",
            TokenKind::BangEq => "!=",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
        };
        write!(f, "{}", name)
    }
}

/// A lexical unit. Identity is `kind` plus `literal`; the span is only
/// carried for diagnostics.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            literal: literal.into(),
            span,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.literal == other.literal
    }
}

impl Eq for Token {}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}: {}}}", self.kind, self.literal)
    }
}

/// Classifies an identifier as a keyword or a plain identifier.
pub fn lookup_ident(ident: &str) -> TokenKind {
    match ident {
        "fn" => TokenKind::Function,
        "let" => TokenKind::Let,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "return" => TokenKind::Return,
        _ => TokenKind::Identifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ident() {
        assert_eq!(lookup_ident("fn"), TokenKind::Function);
        assert_eq!(lookup_ident("return"), TokenKind::Return);
        assert_eq!(lookup_ident("returns"), TokenKind::Identifier);
        assert_eq!(lookup_ident("Let"), TokenKind::Identifier);
    }

    #[test]
    fn test_identity_ignores_span() {
        use super::super::span::CodePosition;

        let far = Span::new(CodePosition::new(9, 2, 4), CodePosition::new(10, 2, 5));
        let a = Token::new(TokenKind::Plus, "+", Span::default());
        let b = Token::new(TokenKind::Plus, "+", far);

        assert_eq!(a, b);
        assert_eq!(a.to_string(), "{+: +}");
        assert_eq!(TokenKind::BangEq.to_string(), "!=");
    }
}
