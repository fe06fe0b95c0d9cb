use super::grammar::InfixOperator;
use super::token::TokenKind;

/// Tokens that may continue an expression once its left side is parsed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParserOperator {
    Infix(InfixOperator),
    Call,
    Index,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Precedence {
    // Lowest precedence
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call, // Highest precedence
}

impl ParserOperator {
    pub fn from_token(kind: TokenKind) -> Option<ParserOperator> {
        if let Some(op) = Self::try_infix(kind) {
            return Some(ParserOperator::Infix(op));
        }

        match kind {
            TokenKind::LeftParen => Some(ParserOperator::Call),
            TokenKind::LeftBracket => Some(ParserOperator::Index),
            _ => None,
        }
    }

    fn try_infix(kind: TokenKind) -> Option<InfixOperator> {
        let op = match kind {
            TokenKind::Plus => InfixOperator::Add,
            TokenKind::Minus => InfixOperator::Subtract,
            TokenKind::Asterisk => InfixOperator::Multiply,
            TokenKind::Slash => InfixOperator::Divide,
            TokenKind::DoubleEq => InfixOperator::EqualTo,
            TokenKind::BangEq => InfixOperator::NotEqualTo,
            TokenKind::RightAngle => InfixOperator::GreaterThan,
            TokenKind::RightAngleEq => InfixOperator::GreaterEq,
            TokenKind::LeftAngle => InfixOperator::LessThan,
            TokenKind::LeftAngleEq => InfixOperator::LessEq,
            _ => return None,
        };
        Some(op)
    }

    /// Every operator is left associative, so an operator only binds when
    /// it is strictly tighter than the surrounding context.
    pub fn is_higher_precedence(&self, min_precedence: Precedence) -> bool {
        self.precedence() > min_precedence
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            ParserOperator::Infix(op) => match op {
                InfixOperator::Add | InfixOperator::Subtract => Precedence::Sum,
                InfixOperator::Multiply | InfixOperator::Divide => Precedence::Product,
                InfixOperator::EqualTo | InfixOperator::NotEqualTo => Precedence::Equals,
                InfixOperator::GreaterEq
                | InfixOperator::LessEq
                | InfixOperator::GreaterThan
                | InfixOperator::LessThan => Precedence::LessGreater,
            },
            ParserOperator::Call | ParserOperator::Index => Precedence::Call,
        }
    }
}
