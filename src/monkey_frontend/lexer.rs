use super::cursor::Cursor;
use super::span::Span;
use super::token::{lookup_ident, Token, TokenKind};

pub struct Lexer<'src> {
    source: &'src str,
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer from source.
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            cursor: Cursor::new(source),
        }
    }

    /// Returns the next token. Once the input is exhausted every call
    /// yields an EOF token.
    pub fn next_token(&mut self) -> Token {
        // Get rid of whitespace.
        self.cursor.take_while(is_whitespace_char);

        let start_pos = self.cursor.get_position();
        let (kind, start_idx) = self.lex_token();
        let end_pos = self.cursor.get_position();

        let literal = match kind {
            // Strip the surrounding quotes.
            TokenKind::String => &self.source[start_idx + 1..end_pos.byte_pos - 1],
            _ => &self.source[start_idx..end_pos.byte_pos],
        };

        Token::new(kind, literal, Span::new(start_pos, end_pos))
    }

    fn lex_token(&mut self) -> (TokenKind, usize) {
        let (byte_idx, ch) = match self.cursor.take() {
            Some(t) => t,
            None => return (TokenKind::EndOfFile, self.source.len()),
        };

        let kind = match ch {
            // Single-character tokens.
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,

            // Potentially two character tokens.
            '=' => self.look_for_eq_sign(TokenKind::Assign, TokenKind::DoubleEq),
            '!' => self.look_for_eq_sign(TokenKind::Bang, TokenKind::BangEq),
            '<' => self.look_for_eq_sign(TokenKind::LeftAngle, TokenKind::LeftAngleEq),
            '>' => self.look_for_eq_sign(TokenKind::RightAngle, TokenKind::RightAngleEq),

            '"' => self.lex_string(),

            _ if is_digit_char(ch) => {
                self.cursor.take_while(is_digit_char);
                TokenKind::Int
            }

            _ if is_identifier_char(ch) => {
                self.cursor.take_while(is_identifier_char);
                let end_idx = self.cursor.byte_pos();
                lookup_ident(&self.source[byte_idx..end_idx])
            }

            _ => TokenKind::Illegal,
        };

        (kind, byte_idx)
    }

    /// Checks if next char is '='. If so, consume it and return t2.
    /// Otherwise, return t1.
    fn look_for_eq_sign(&mut self, t1: TokenKind, t2: TokenKind) -> TokenKind {
        if self.cursor.take_if('=') {
            t2
        } else {
            t1
        }
    }

    /// Scans up to the closing '"'. Without one the rest of the input
    /// becomes an illegal token.
    fn lex_string(&mut self) -> TokenKind {
        self.cursor.take_until(|ch| ch == '"');

        if self.cursor.take_if('"') {
            TokenKind::String
        } else {
            TokenKind::Illegal
        }
    }

    /// Returns an iterator version of lexer.
    pub fn iter(self) -> LexerIterator<'src> {
        LexerIterator { lexer: self }
    }
}

pub struct LexerIterator<'src> {
    lexer: Lexer<'src>,
}

impl<'src> Iterator for LexerIterator<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lexer.next_token();

        if token.is(TokenKind::EndOfFile) {
            return None;
        }

        Some(token)
    }
}

fn is_whitespace_char(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}

fn is_digit_char(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(TokenKind, String)> {
        Lexer::new(source)
            .iter()
            .map(|t| (t.kind, t.literal))
            .collect()
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|(kind, _)| kind).collect()
    }

    #[test]
    fn test_program_tokens() {
        let source = r#"let five = 5;
let add = fn(x, y) {
    x + y;
};
let result = add(five, ten);
"foo bar";
[1, 2];"#;

        let expected = vec![
            (TokenKind::Let, "let"),
            (TokenKind::Identifier, "five"),
            (TokenKind::Assign, "="),
            (TokenKind::Int, "5"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Let, "let"),
            (TokenKind::Identifier, "add"),
            (TokenKind::Assign, "="),
            (TokenKind::Function, "fn"),
            (TokenKind::LeftParen, "("),
            (TokenKind::Identifier, "x"),
            (TokenKind::Comma, ","),
            (TokenKind::Identifier, "y"),
            (TokenKind::RightParen, ")"),
            (TokenKind::LeftBrace, "{"),
            (TokenKind::Identifier, "x"),
            (TokenKind::Plus, "+"),
            (TokenKind::Identifier, "y"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RightBrace, "}"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Let, "let"),
            (TokenKind::Identifier, "result"),
            (TokenKind::Assign, "="),
            (TokenKind::Identifier, "add"),
            (TokenKind::LeftParen, "("),
            (TokenKind::Identifier, "five"),
            (TokenKind::Comma, ","),
            (TokenKind::Identifier, "ten"),
            (TokenKind::RightParen, ")"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::String, "foo bar"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::LeftBracket, "["),
            (TokenKind::Int, "1"),
            (TokenKind::Comma, ","),
            (TokenKind::Int, "2"),
            (TokenKind::RightBracket, "]"),
            (TokenKind::Semicolon, ";"),
        ];

        let expected: Vec<_> = expected
            .into_iter()
            .map(|(kind, literal)| (kind, literal.to_owned()))
            .collect();
        assert_eq!(lex(source), expected);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("!-/*5; 5 < 10 > 5; 10 == 10; 10 != 9; 1 <= 2 >= 1 = !"),
            vec![
                TokenKind::Bang,
                TokenKind::Minus,
                TokenKind::Slash,
                TokenKind::Asterisk,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::LeftAngle,
                TokenKind::Int,
                TokenKind::RightAngle,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::DoubleEq,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::BangEq,
                TokenKind::Int,
                TokenKind::Semicolon,
                TokenKind::Int,
                TokenKind::LeftAngleEq,
                TokenKind::Int,
                TokenKind::RightAngleEq,
                TokenKind::Int,
                TokenKind::Assign,
                TokenKind::Bang,
            ]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("if else return true false fn let foo_bar"),
            vec![
                TokenKind::If,
                TokenKind::Else,
                TokenKind::Return,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Function,
                TokenKind::Let,
                TokenKind::Identifier,
            ]
        );

        // Digits end an identifier.
        assert_eq!(
            lex("a1"),
            vec![
                (TokenKind::Identifier, "a".to_owned()),
                (TokenKind::Int, "1".to_owned())
            ]
        );
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("  x ");
        assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
        for _ in 0..3 {
            let token = lexer.next_token();
            assert_eq!(token.kind, TokenKind::EndOfFile);
            assert_eq!(token.literal, "");
        }
    }

    #[test]
    fn test_illegal_input() {
        assert_eq!(
            lex("5 @ 3"),
            vec![
                (TokenKind::Int, "5".to_owned()),
                (TokenKind::Illegal, "@".to_owned()),
                (TokenKind::Int, "3".to_owned()),
            ]
        );

        assert_eq!(
            lex(r#"let s = "abc"#),
            vec![
                (TokenKind::Let, "let".to_owned()),
                (TokenKind::Identifier, "s".to_owned()),
                (TokenKind::Assign, "=".to_owned()),
                (TokenKind::Illegal, "\"abc".to_owned()),
            ]
        );
    }

    #[test]
    fn test_spans() {
        let mut lexer = Lexer::new("let\n  answer");
        lexer.next_token();
        let token = lexer.next_token();
        assert_eq!(token.span.start_pos.line_no, 2);
        assert_eq!(token.span.start_pos.column_no, 3);
        assert_eq!(token.span.extract_string("let\n  answer"), Some("answer"));
    }
}
