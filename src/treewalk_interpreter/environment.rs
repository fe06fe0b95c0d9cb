use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::errors::{EvalError, RuntimeResult};
use super::object::Object;

/// Shared handle to one scope frame. Clones point at the same frame.
#[derive(Clone)]
pub struct Environment {
    env_ptr: Rc<RefCell<EnvironmentData>>,
}

struct EnvironmentData {
    values: HashMap<String, Object>,
    enclosing: Option<Environment>,
}

impl Environment {
    pub fn new() -> Self {
        let env_data = EnvironmentData {
            values: HashMap::new(),
            enclosing: None,
        };
        Environment {
            env_ptr: Rc::new(RefCell::new(env_data)),
        }
    }

    pub fn with_enclosing(env: &Environment) -> Self {
        let env_data = EnvironmentData {
            values: HashMap::new(),
            enclosing: Some(env.clone()),
        };
        Environment {
            env_ptr: Rc::new(RefCell::new(env_data)),
        }
    }

    /// Binds a name in this frame. Names already bound here cannot be
    /// rebound; names from enclosing frames are shadowed.
    pub fn define(&self, name: String, value: Object) -> RuntimeResult<()> {
        let mut env_data = self.env_ptr.borrow_mut();
        if env_data.values.contains_key(&name) {
            return Err(EvalError::AlreadyDeclared(name));
        }
        env_data.values.insert(name, value);
        Ok(())
    }

    /// Looks a name up through this frame and then its enclosing frames.
    pub fn get(&self, name: &str) -> Option<Object> {
        let env_data = self.env_ptr.borrow();
        match env_data.values.get(name) {
            Some(obj) => Some(obj.clone()),
            None => env_data.enclosing.as_ref()?.get(name),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let env_data = self.env_ptr.borrow();
        let mut names: Vec<_> = env_data.values.keys().collect();
        names.sort();
        write!(f, "<env {:?}>", names)
    }
}
