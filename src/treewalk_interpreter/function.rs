use super::environment::Environment;
use super::errors::RuntimeResult;
use super::interpreter::Interpreter;
use super::object::Object;
use crate::monkey_frontend::grammar::FuncInfo;

use std::fmt;
use std::rc::Rc;
use tracing::trace;

pub struct MonkeyFnData {
    func_info: FuncInfo,
    closure: Environment,
}

/// A function literal paired with the environment it was evaluated in.
#[derive(Clone)]
pub struct MonkeyFn(Rc<MonkeyFnData>);

impl MonkeyFn {
    pub fn new(func_info: FuncInfo, closure: Environment) -> Self {
        let data = MonkeyFnData { func_info, closure };
        MonkeyFn(Rc::new(data))
    }

    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.0.func_info.params.iter().map(|p| p.name.as_str())
    }

    /// Runs the body in a fresh frame enclosed by the captured environment.
    /// Surplus arguments are dropped and missing ones are left unbound.
    pub fn execute(&self, args: Vec<Object>, interpreter: &mut Interpreter) -> RuntimeResult<Object> {
        trace!(
            params = self.0.func_info.params.len(),
            args = args.len(),
            line = self.0.func_info.span.start_pos.line_no,
            "applying function"
        );

        // Create a new environment pointing to surrounding closure
        let env = Environment::with_enclosing(&self.0.closure);

        for (param, arg) in self.0.func_info.params.iter().zip(args.into_iter()) {
            env.define(param.name.clone(), arg)?;
        }

        let prev_env = interpreter.swap_env(env);
        let result = interpreter.eval_statements(&self.0.func_info.body.stmts);
        interpreter.swap_env(prev_env);

        result.or_else(|interrupt| interrupt.into_result())
    }
}

impl fmt::Display for MonkeyFn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let params: Vec<_> = self.params().collect();
        write!(
            f,
            "fn ({}) {{\n{}\n}}",
            params.join(","),
            self.0.func_info.body
        )
    }
}

impl fmt::Debug for MonkeyFn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let params: Vec<_> = self.params().collect();
        write!(f, "<fn ({})>", params.join(","))
    }
}

impl PartialEq<MonkeyFn> for MonkeyFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for MonkeyFn {}
