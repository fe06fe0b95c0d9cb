use super::span::Span;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrefixOperator {
    Negate,
    LogicalNot,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterEq,
    LessThan,
    LessEq,
}

/// Root of a parsed source text.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Stmt {
    pub stmt: StmtType,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone)]
pub enum StmtType {
    Let(Identifier, Expr),
    Return(Expr),
    Expression(Expr),
    Block(Block),
}

/// Statements between a pair of braces.
#[derive(Debug, PartialEq, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Expr {
    pub expr: ExprType,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExprType {
    Identifier(Identifier),
    Literal(Literal),
    Array(Vec<Expr>),
    Prefix(PrefixOperator, Box<Expr>),
    Infix(InfixOperator, Box<Expr>, Box<Expr>),
    If(Box<Expr>, Block, Option<Block>),
    Function(FuncInfo),
    Call(Box<Expr>, Vec<Expr>),
    Index(Box<Expr>, Box<Expr>),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FuncInfo {
    pub params: Vec<Identifier>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Integer(i64),
    Boolean(bool),
    Str(String),
}

impl PrefixOperator {
    pub fn symbol(&self) -> &str {
        match self {
            PrefixOperator::LogicalNot => "!",
            PrefixOperator::Negate => "-",
        }
    }
}

impl InfixOperator {
    pub fn symbol(&self) -> &str {
        match self {
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::EqualTo => "==",
            InfixOperator::NotEqualTo => "!=",
            InfixOperator::GreaterThan => ">",
            InfixOperator::GreaterEq => ">=",
            InfixOperator::LessThan => "<",
            InfixOperator::LessEq => "<=",
        }
    }
}

impl Identifier {
    pub fn new(name: String, span: Span) -> Self {
        Self { name, span }
    }
}

impl Stmt {
    pub fn new(stmt: StmtType, span: Span) -> Self {
        Stmt { stmt, span }
    }
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Block { stmts, span }
    }
}

impl FuncInfo {
    pub fn new(params: Vec<Identifier>, body: Block, span: Span) -> Self {
        FuncInfo { params, body, span }
    }
}

impl Expr {
    pub fn new(expr: ExprType, span: Span) -> Self {
        Expr { expr, span }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for stmt in self.stmts.iter() {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.stmt {
            StmtType::Let(name, expr) => write!(f, "let {} = {}", name, expr),
            StmtType::Return(expr) => write!(f, "return {};", expr),
            StmtType::Expression(expr) => write!(f, "{}", expr),
            StmtType::Block(block) => write!(f, "{{{}}}", block),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for stmt in self.stmts.iter() {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Str(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl fmt::Display for FuncInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let params: Vec<_> = self.params.iter().map(|p| p.name.as_str()).collect();
        write!(f, "fn ({}) {{\n\t{}\n}}", params.join(","), self.body)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.expr {
            ExprType::Identifier(ident) => write!(f, "{}", ident),
            ExprType::Literal(l) => write!(f, "{}", l),
            ExprType::Array(elements) => write!(f, "[{}]", join_exprs(elements)),
            ExprType::Prefix(op, expr) => write!(f, "({}{})", op.symbol(), expr),
            ExprType::Infix(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            ExprType::If(condition, consequence, alternative) => {
                write!(f, "if ({}) {{\n{}\n}}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{\n{}\n}}", alternative)?;
                }
                Ok(())
            }
            ExprType::Function(func_info) => write!(f, "{}", func_info),
            ExprType::Call(callee, args) => write!(f, "{}({})", callee, join_exprs(args)),
            ExprType::Index(lhs, index) => write!(f, "({}[{}])", lhs, index),
        }
    }
}

fn join_exprs(exprs: &[Expr]) -> String {
    let exprs: Vec<_> = exprs.iter().map(|e| e.to_string()).collect();
    exprs.join(", ")
}
