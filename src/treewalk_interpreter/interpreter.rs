use super::builtins;
use super::environment::Environment;
use super::errors::{EvalError, EvalResult, Interrupt, RuntimeResult};
use super::function::MonkeyFn;
use super::object::Object;
use crate::monkey_frontend::grammar::{
    Block, Expr, ExprType, Identifier, InfixOperator, Literal, PrefixOperator, Program, Stmt,
    StmtType,
};

use tracing::debug;

pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            env: Environment::new(),
        }
    }

    pub fn swap_env(&mut self, mut env: Environment) -> Environment {
        std::mem::swap(&mut self.env, &mut env);
        // Hand back the previous env
        env
    }

    /// Evaluates a program against the interpreter's top-level environment,
    /// which persists between calls. Errors are folded into an error value.
    pub fn eval_program(&mut self, program: &Program) -> Object {
        match self.run(program) {
            Ok(value) => value,
            Err(error) => Object::Error(error.to_string()),
        }
    }

    /// Like `eval_program`, but hands evaluation errors back as `Err`.
    pub fn run(&mut self, program: &Program) -> RuntimeResult<Object> {
        let result = self
            .eval_statements(&program.stmts)
            .or_else(|interrupt| interrupt.into_result());

        if let Err(error) = &result {
            debug!("evaluation failed: {}", error);
        }
        result
    }

    /// Value of the last statement, or null for an empty list.
    pub(crate) fn eval_statements(&mut self, stmts: &[Stmt]) -> EvalResult<Object> {
        let mut result = Object::Null;
        for stmt in stmts.iter() {
            result = self.eval_statement(stmt)?;
        }
        Ok(result)
    }

    pub(crate) fn eval_statement(&mut self, stmt: &Stmt) -> EvalResult<Object> {
        match &stmt.stmt {
            StmtType::Expression(expr) => self.eval_expression(expr),
            StmtType::Let(name, expr) => {
                let value = self.eval_expression(expr)?;
                self.env.define(name.name.clone(), value)?;
                Ok(Object::Null)
            }
            StmtType::Return(expr) => {
                let value = self.eval_expression(expr)?;
                Err(Interrupt::Return(value))
            }
            StmtType::Block(block) => self.eval_block(block),
        }
    }

    /// Blocks share the frame they appear in; only calls open new frames.
    fn eval_block(&mut self, block: &Block) -> EvalResult<Object> {
        self.eval_statements(&block.stmts)
    }

    pub(crate) fn eval_expression(&mut self, expr: &Expr) -> EvalResult<Object> {
        match &expr.expr {
            ExprType::Literal(l) => Ok(self.eval_literal(l)),
            ExprType::Identifier(ident) => Ok(self.env_var_lookup(ident)?),
            ExprType::Array(elements) => Ok(Object::Array(self.eval_expressions(elements)?)),
            ExprType::Prefix(op, expr) => self.eval_prefix_operator(*op, expr),
            ExprType::Infix(op, lhs, rhs) => self.eval_infix_operator(*op, lhs, rhs),
            ExprType::If(condition, consequence, alternative) => {
                self.eval_if_else(condition, consequence, alternative.as_ref())
            }
            ExprType::Function(func_info) => Ok(Object::Function(MonkeyFn::new(
                func_info.clone(),
                self.env.clone(),
            ))),
            ExprType::Call(callee, args) => self.eval_func_call(callee, args),
            ExprType::Index(lhs, index) => {
                let lhs = self.eval_expression(lhs)?;
                let index = self.eval_expression(index)?;
                Ok(Object::index(lhs, index)?)
            }
        }
    }

    fn eval_literal(&self, l: &Literal) -> Object {
        match l {
            Literal::Integer(n) => Object::Integer(*n),
            Literal::Boolean(b) => Object::Boolean(*b),
            Literal::Str(s) => Object::String(s.clone()),
        }
    }

    fn eval_expressions(&mut self, exprs: &[Expr]) -> EvalResult<Vec<Object>> {
        let mut values = Vec::with_capacity(exprs.len());
        for expr in exprs.iter() {
            values.push(self.eval_expression(expr)?);
        }
        Ok(values)
    }

    /// Local bindings win over builtins of the same name.
    fn env_var_lookup(&self, ident: &Identifier) -> RuntimeResult<Object> {
        if let Some(value) = self.env.get(&ident.name) {
            return Ok(value);
        }

        match builtins::lookup(&ident.name) {
            Some(builtin) => Ok(Object::Builtin(builtin)),
            None => Err(EvalError::IdentifierNotFound(ident.name.clone())),
        }
    }

    fn eval_if_else(
        &mut self,
        condition: &Expr,
        consequence: &Block,
        alternative: Option<&Block>,
    ) -> EvalResult<Object> {
        if self.eval_expression(condition)?.is_truthy() {
            return self.eval_block(consequence);
        }
        if let Some(alternative) = alternative {
            return self.eval_block(alternative);
        }

        Ok(Object::Null)
    }

    fn eval_infix_operator(
        &mut self,
        op: InfixOperator,
        lhs: &Expr,
        rhs: &Expr,
    ) -> EvalResult<Object> {
        let lhs = self.eval_expression(lhs)?;
        let rhs = self.eval_expression(rhs)?;
        Ok(Object::apply_infix_op(op, lhs, rhs)?)
    }

    fn eval_prefix_operator(&mut self, op: PrefixOperator, expr: &Expr) -> EvalResult<Object> {
        let value = self.eval_expression(expr)?;
        Ok(Object::apply_prefix_op(op, value)?)
    }

    fn eval_func_call(&mut self, callee: &Expr, raw_args: &[Expr]) -> EvalResult<Object> {
        let callee = self.eval_expression(callee)?;
        let args = self.eval_expressions(raw_args)?;

        let result = match callee {
            Object::Function(func) => func.execute(args, self),
            Object::Builtin(builtin) => builtin.execute(args),
            other => Err(EvalError::NotAFunction(other.type_name())),
        };

        Ok(result?)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
