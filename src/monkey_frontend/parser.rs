use super::errors::{ParserError, ParserErrorType, ParserResult};
use super::grammar::{Block, Expr, ExprType, FuncInfo, Identifier, Literal, Program};
use super::grammar::{PrefixOperator, Stmt, StmtType};
use super::lexer::Lexer;
use super::parser_utils::{ParserOperator, Precedence};
use super::span::Span;
use super::token::{Token, TokenKind};

use tracing::debug;

pub struct Parser<'s> {
    lexer: Lexer<'s>,
    current: Token,
    previous: Token,
    errors: Vec<ParserError>,
    block_depth: usize,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str) -> Self {
        let dummy_token = Token::new(TokenKind::Illegal, "<parser token>", Span::default());

        Parser {
            lexer: Lexer::new(source),
            current: dummy_token.clone(),
            previous: dummy_token,
            errors: vec![],
            block_depth: 0,
        }
    }

    /// Advances the stream.
    fn bump(&mut self) {
        std::mem::swap(&mut self.previous, &mut self.current);
        self.current = self.lexer.next_token();
    }

    /// Checks whether or not the current token is of the given kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    /// Checks whether or not the current token is of the given kind.
    /// If true consume it and return true, else return false.
    fn check_consume(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            return true;
        }
        false
    }

    fn expect(&mut self, expected: TokenKind) {
        debug_assert_eq!(self.current.kind, expected);
        self.bump();
    }

    /// Consumes the current token if it has the expected kind. Otherwise
    /// the stream is left untouched and an error is returned.
    fn consume(&mut self, expected: TokenKind) -> ParserResult<()> {
        if self.check_consume(expected) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: TokenKind) -> ParserError {
        ParserError::new(
            self.current.span,
            ParserErrorType::ExpectedToken {
                expected,
                found: self.current.kind,
            },
        )
    }

    /// Parses the whole token stream. Statements that fail to parse are
    /// left out of the program and their errors are returned alongside it.
    pub fn parse_program(mut self) -> (Program, Vec<ParserError>) {
        self.bump();

        let mut stmts = vec![];

        while !self.check(TokenKind::EndOfFile) {
            if let Some(stmt) = self.parse_statement_with_recovery() {
                stmts.push(stmt);
            }
        }

        (Program { stmts }, self.errors)
    }

    /// Skips past the end of the broken statement. Stops before a '}' that
    /// closes the block being parsed so the block itself can still finish.
    fn synchronize(&mut self) {
        let mut nesting = 0usize;

        loop {
            match self.current.kind {
                TokenKind::EndOfFile => return,
                TokenKind::Semicolon if nesting == 0 => {
                    self.bump();
                    return;
                }
                TokenKind::RightBrace if nesting == 0 && self.block_depth > 0 => return,
                TokenKind::LeftBrace => nesting += 1,
                TokenKind::RightBrace => nesting = nesting.saturating_sub(1),
                _ => {}
            }

            self.bump();
        }
    }

    fn emit_error(&mut self, error: ParserError) {
        debug!(line = error.line(), "syntax error: {}", error);
        self.errors.push(error);
    }

    fn parse_statement_with_recovery(&mut self) -> Option<Stmt> {
        match self.parse_statement() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                self.emit_error(err);
                self.synchronize();
                None
            }
        }
    }

    fn parse_statement(&mut self) -> ParserResult<Stmt> {
        let curr_span = self.current.span;

        let stmt_type = match self.current.kind {
            TokenKind::Let => self.parse_let()?,
            TokenKind::Return => {
                self.expect(TokenKind::Return);
                let expr = self.parse_expression()?;
                self.check_consume(TokenKind::Semicolon);
                StmtType::Return(expr)
            }
            TokenKind::LeftBrace => StmtType::Block(self.parse_block()?),
            _ => {
                let expr = self.parse_expression()?;
                self.check_consume(TokenKind::Semicolon);
                StmtType::Expression(expr)
            }
        };

        Ok(to_stmt(stmt_type, curr_span.extend(self.previous.span)))
    }

    fn parse_let(&mut self) -> ParserResult<StmtType> {
        self.expect(TokenKind::Let);
        let name = self.parse_identifier()?;
        self.consume(TokenKind::Assign)?;
        let expr = self.parse_expression()?;
        self.check_consume(TokenKind::Semicolon);

        Ok(StmtType::Let(name, expr))
    }

    fn parse_block(&mut self) -> ParserResult<Block> {
        let curr_span = self.current.span;
        self.consume(TokenKind::LeftBrace)?;

        self.block_depth += 1;
        let mut stmts = vec![];
        while !self.check(TokenKind::RightBrace) && !self.check(TokenKind::EndOfFile) {
            if let Some(stmt) = self.parse_statement_with_recovery() {
                stmts.push(stmt);
            }
        }
        self.block_depth -= 1;

        // End of input also closes a block
        self.check_consume(TokenKind::RightBrace);
        Ok(Block::new(stmts, curr_span.extend(self.previous.span)))
    }

    /// Parse expression with precedence.
    pub fn parse_expression(&mut self) -> ParserResult<Expr> {
        self.run_pratt_parse_algo(Precedence::Lowest)
    }

    /// Pratt parsing algo.
    fn run_pratt_parse_algo(&mut self, min_precedence: Precedence) -> ParserResult<Expr> {
        let prefix_op = match self.current.kind {
            TokenKind::Bang => Some(PrefixOperator::LogicalNot),
            TokenKind::Minus => Some(PrefixOperator::Negate),
            _ => None,
        };

        let mut lhs = match prefix_op {
            Some(op) => {
                let curr_span = self.current.span;
                self.bump();
                let expr = self.run_pratt_parse_algo(Precedence::Prefix)?;
                to_expr(
                    ExprType::Prefix(op, Box::new(expr)),
                    curr_span.extend(self.previous.span),
                )
            }
            None => self.parse_primary()?,
        };

        while let Some(op) = ParserOperator::from_token(self.current.kind) {
            if !op.is_higher_precedence(min_precedence) {
                break;
            }

            self.bump();
            let precedence = op.precedence();
            let lhs_span = lhs.span;

            let new_lhs = match op {
                ParserOperator::Infix(op) => {
                    let rhs = self.run_pratt_parse_algo(precedence)?;
                    ExprType::Infix(op, Box::new(lhs), Box::new(rhs))
                }
                ParserOperator::Call => {
                    let args = self.parse_comma_sep(TokenKind::RightParen, Self::parse_expression)?;
                    ExprType::Call(Box::new(lhs), args)
                }
                ParserOperator::Index => {
                    let index = self.parse_expression()?;
                    self.consume(TokenKind::RightBracket)?;
                    ExprType::Index(Box::new(lhs), Box::new(index))
                }
            };

            lhs = to_expr(new_lhs, lhs_span.extend(self.previous.span));
        }

        Ok(lhs)
    }

    /// Parse an expression that starts with the current token.
    fn parse_primary(&mut self) -> ParserResult<Expr> {
        let curr_span = self.current.span;

        let expr = match self.current.kind {
            TokenKind::Int => {
                let value = self.current.literal.parse::<i64>().map_err(|_| {
                    ParserError::new(
                        curr_span,
                        ParserErrorType::InvalidInteger(self.current.literal.clone()),
                    )
                })?;
                self.bump();
                from_literal(Literal::Integer(value))
            }
            TokenKind::True => {
                self.bump();
                from_literal(Literal::Boolean(true))
            }
            TokenKind::False => {
                self.bump();
                from_literal(Literal::Boolean(false))
            }
            TokenKind::String => {
                self.bump();
                from_literal(Literal::Str(self.previous.literal.clone()))
            }
            TokenKind::Identifier => ExprType::Identifier(self.parse_identifier()?),
            TokenKind::LeftParen => {
                self.bump();
                let sub_expr = self.parse_expression()?;
                self.consume(TokenKind::RightParen)?;
                return Ok(sub_expr);
            }
            TokenKind::LeftBracket => {
                self.bump();
                let elements =
                    self.parse_comma_sep(TokenKind::RightBracket, Self::parse_expression)?;
                ExprType::Array(elements)
            }
            TokenKind::If => self.parse_if()?,
            TokenKind::Function => ExprType::Function(self.parse_func_info()?),
            kind => {
                return Err(ParserError::new(
                    curr_span,
                    ParserErrorType::NoPrefixParseFn(kind),
                ))
            }
        };

        Ok(to_expr(expr, curr_span.extend(self.previous.span)))
    }

    fn parse_if(&mut self) -> ParserResult<ExprType> {
        self.expect(TokenKind::If);
        self.consume(TokenKind::LeftParen)?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RightParen)?;

        let consequence = self.parse_block()?;
        let alternative = if self.check_consume(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(ExprType::If(Box::new(condition), consequence, alternative))
    }

    /// Parse function literal into func info struct.
    fn parse_func_info(&mut self) -> ParserResult<FuncInfo> {
        let curr_span = self.current.span;

        self.expect(TokenKind::Function);
        self.consume(TokenKind::LeftParen)?;
        let params = self.parse_comma_sep(TokenKind::RightParen, Self::parse_identifier)?;
        let body = self.parse_block()?;

        Ok(FuncInfo::new(
            params,
            body,
            curr_span.extend(self.previous.span),
        ))
    }

    fn parse_identifier(&mut self) -> ParserResult<Identifier> {
        if !self.check(TokenKind::Identifier) {
            return Err(self.unexpected(TokenKind::Identifier));
        }

        self.bump();
        Ok(Identifier::new(
            self.previous.literal.clone(),
            self.previous.span,
        ))
    }

    /// Parses `item, item, ...` up to and including the closing token. The
    /// opening token must already be consumed.
    fn parse_comma_sep<T, F>(&mut self, close: TokenKind, parser: F) -> ParserResult<Vec<T>>
    where
        F: Fn(&mut Parser<'s>) -> ParserResult<T>,
    {
        let mut items = vec![];
        if self.check_consume(close) {
            return Ok(items);
        }

        items.push(parser(self)?);

        while !self.check_consume(close) {
            if !self.check_consume(TokenKind::Comma) {
                return Err(self.unexpected(close));
            }
            items.push(parser(self)?);
        }

        Ok(items)
    }
}

fn from_literal(l: Literal) -> ExprType {
    ExprType::Literal(l)
}

fn to_stmt(stmt: StmtType, span: Span) -> Stmt {
    Stmt::new(stmt, span)
}

fn to_expr(expr: ExprType, span: Span) -> Expr {
    Expr::new(expr, span)
}
