use super::errors::{EvalError, RuntimeResult};
use super::object::{byte_slice, Object};

use std::fmt;

type FnType = fn(Vec<Object>) -> RuntimeResult<Object>;

/// A host function reachable by name once environment lookup fails.
pub struct Builtin {
    pub name: &'static str,
    pub arity: usize,
    func: FnType,
}

pub static BUILTINS: [Builtin; 4] = [
    Builtin {
        name: "len",
        arity: 1,
        func: len,
    },
    Builtin {
        name: "first",
        arity: 1,
        func: first,
    },
    Builtin {
        name: "last",
        arity: 1,
        func: last,
    },
    Builtin {
        name: "push",
        arity: 2,
        func: push,
    },
];

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.name == name)
}

impl Builtin {
    pub fn execute(&self, args: Vec<Object>) -> RuntimeResult<Object> {
        if self.arity == args.len() {
            (self.func)(args)
        } else {
            Err(EvalError::WrongArity {
                got: args.len(),
                want: self.arity,
            })
        }
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<builtin {}>", self.name)
    }
}

impl PartialEq<Builtin> for Builtin {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for Builtin {}

fn len(args: Vec<Object>) -> RuntimeResult<Object> {
    match args.as_slice() {
        [Object::String(s)] => Ok(Object::Integer(s.len() as i64)),
        [Object::Array(elements)] => Ok(Object::Integer(elements.len() as i64)),
        [other] => Err(EvalError::UnsupportedArgument("len", other.type_name())),
        _ => unreachable!("arity is checked by Builtin::execute"),
    }
}

fn first(args: Vec<Object>) -> RuntimeResult<Object> {
    match args.as_slice() {
        [Object::String(s)] => Ok(byte_slice(s, 0).unwrap_or(Object::Null)),
        [Object::Array(elements)] => Ok(elements.first().cloned().unwrap_or(Object::Null)),
        [other] => Err(EvalError::UnsupportedArgument("first", other.type_name())),
        _ => unreachable!("arity is checked by Builtin::execute"),
    }
}

fn last(args: Vec<Object>) -> RuntimeResult<Object> {
    match args.as_slice() {
        [Object::String(s)] => Ok(s
            .len()
            .checked_sub(1)
            .and_then(|idx| byte_slice(s, idx))
            .unwrap_or(Object::Null)),
        [Object::Array(elements)] => Ok(elements.last().cloned().unwrap_or(Object::Null)),
        [other] => Err(EvalError::UnsupportedArgument("last", other.type_name())),
        _ => unreachable!("arity is checked by Builtin::execute"),
    }
}

/// Appends to a copy of the array; the argument itself is left unchanged.
fn push(args: Vec<Object>) -> RuntimeResult<Object> {
    let [target, value]: [Object; 2] = match args.try_into() {
        Ok(pair) => pair,
        Err(_) => unreachable!("arity is checked by Builtin::execute"),
    };

    match target {
        Object::Array(mut elements) => {
            elements.push(value);
            Ok(Object::Array(elements))
        }
        other => Err(EvalError::PushTarget(other.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: Vec<Object>) -> RuntimeResult<Object> {
        lookup(name).unwrap().execute(args)
    }

    fn string(s: &str) -> Object {
        Object::String(s.to_owned())
    }

    fn ints(values: &[i64]) -> Object {
        Object::Array(values.iter().map(|v| Object::Integer(*v)).collect())
    }

    #[test]
    fn test_lookup() {
        assert!(lookup("len").is_some());
        assert!(lookup("puts").is_none());
        assert_eq!(lookup("push").unwrap(), &BUILTINS[3]);
        assert_ne!(lookup("first").unwrap(), lookup("last").unwrap());
    }

    #[test]
    fn test_len() {
        assert_eq!(call("len", vec![string("")]), Ok(Object::Integer(0)));
        assert_eq!(call("len", vec![string("four")]), Ok(Object::Integer(4)));
        assert_eq!(call("len", vec![ints(&[1, 2, 3])]), Ok(Object::Integer(3)));
        assert_eq!(
            call("len", vec![Object::Integer(1)]).unwrap_err().to_string(),
            "argument to `len` not supported, got INTEGER"
        );
        assert_eq!(
            call("len", vec![string("one"), string("two")])
                .unwrap_err()
                .to_string(),
            "wrong number of arguments. got=2, want=1"
        );
    }

    #[test]
    fn test_first_and_last() {
        assert_eq!(call("first", vec![ints(&[1, 2, 3])]), Ok(Object::Integer(1)));
        assert_eq!(call("last", vec![ints(&[1, 2, 3])]), Ok(Object::Integer(3)));
        assert_eq!(call("first", vec![string("bar")]), Ok(string("b")));
        assert_eq!(call("last", vec![string("bar")]), Ok(string("r")));
        assert_eq!(call("first", vec![ints(&[])]), Ok(Object::Null));
        assert_eq!(call("last", vec![string("")]), Ok(Object::Null));
        assert_eq!(
            call("last", vec![Object::Null]),
            Err(EvalError::UnsupportedArgument("last", "NULL"))
        );
    }

    #[test]
    fn test_arity_checked_before_dispatch() {
        for builtin in BUILTINS.iter() {
            let args = vec![Object::Null; builtin.arity + 1];
            assert_eq!(
                builtin.execute(args),
                Err(EvalError::WrongArity {
                    got: builtin.arity + 1,
                    want: builtin.arity
                })
            );
            assert_eq!(
                builtin.execute(vec![]),
                Err(EvalError::WrongArity {
                    got: 0,
                    want: builtin.arity
                })
            );
        }
    }

    #[test]
    fn test_push() {
        assert_eq!(
            call("push", vec![ints(&[1, 2, 3]), Object::Integer(2)]),
            Ok(ints(&[1, 2, 3, 2]))
        );
        assert_eq!(
            call("push", vec![Object::Integer(1), Object::Integer(2)])
                .unwrap_err()
                .to_string(),
            "argument to `push` must be ARRAY, got INTEGER"
        );
        assert_eq!(
            call("push", vec![ints(&[])]),
            Err(EvalError::WrongArity { got: 1, want: 2 })
        );
    }
}
