mod builtins;
mod environment;
mod errors;
mod function;
mod interpreter;
mod object;

pub use builtins::{Builtin, BUILTINS};
pub use errors::{EvalError, RuntimeResult};
pub use function::MonkeyFn;
pub use interpreter::Interpreter;
pub use object::Object;
