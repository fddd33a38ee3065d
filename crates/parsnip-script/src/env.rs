//! Lexically scoped environments.

use std::rc::Rc;

use indexmap::IndexMap;

use crate::eval::EvalError;
use crate::value::Value;

/// An ordered list of scopes. Scope 0 is the global scope; the last scope
/// is the active innermost one.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<IndexMap<String, Rc<Value>>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            scopes: vec![IndexMap::new()],
        }
    }

    /// Look a name up in the innermost scope, then in the global scope.
    pub fn resolve(&self, name: &str) -> Result<Rc<Value>, EvalError> {
        if let Some(value) = self.scopes.last().and_then(|scope| scope.get(name)) {
            return Ok(value.clone());
        }
        if let Some(value) = self.scopes.first().and_then(|scope| scope.get(name)) {
            return Ok(value.clone());
        }
        Err(EvalError::UndefinedSymbol(name.to_owned()))
    }

    /// Bind a name in the innermost scope, shadowing any outer binding.
    pub fn bind(&mut self, name: impl Into<String>, value: Rc<Value>) {
        self.scopes
            .last_mut()
            .expect("environment always has a global scope")
            .insert(name.into(), value);
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    /// Remove the innermost scope. The two outermost scopes are never
    /// popped; a pop at depth two or less is a no-op.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 2 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}
