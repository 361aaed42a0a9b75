use std::collections::HashMap;

use crate::{
    eval::prelude::{runtime_error, RuntimeError, RuntimeErrorType},
    lexer::prelude::Token,
};

use super::prelude::Value;

/// Index of a scope inside an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    pub const GLOBAL: ScopeId = ScopeId(0);
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Scope {
    values: HashMap<String, Value>,
    enclosing: Option<ScopeId>,
}

/// Variable storage for a running program.
///
/// Scopes live in an arena and point at their enclosing scope by index. The global
/// scope sits at index 0 and is never dropped; block scopes are pushed on entry and
/// truncated away on exit, so the scope chain always mirrors the block nesting.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            current: ScopeId::GLOBAL,
        }
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    /// Number of scopes on the chain, the global one included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Opens a scope enclosed by the current one. Returns the scope to hand back to
    /// [`Environment::exit_scope`].
    pub fn enter_scope(&mut self) -> ScopeId {
        let previous = self.current;

        self.scopes.push(Scope {
            values: HashMap::new(),
            enclosing: Some(previous),
        });
        self.current = ScopeId(self.scopes.len() - 1);

        log::trace!("entered scope {} (depth {})", self.current.0, self.depth());

        previous
    }

    /// Drops every scope opened since `previous` was current and makes it current again.
    pub fn exit_scope(&mut self, previous: ScopeId) {
        log::trace!("left scope {} for {}", self.current.0, previous.0);

        self.scopes.truncate(previous.0 + 1);
        self.current = previous;
    }

    /// Binds `name` in the current scope. Redefining a name in the same scope
    /// replaces the old value.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        let scope = &mut self.scopes[self.current.0];

        scope.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        match self.resolve(&name.lexeme) {
            Some(id) => Ok(self.scopes[id.0].values[&name.lexeme].clone()),
            None => undefined(name),
        }
    }

    /// Rebinds the nearest existing `name`. Never creates a binding.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        let Some(id) = self.resolve(&name.lexeme) else {
            return undefined(name);
        };

        if let Some(slot) = self.scopes[id.0].values.get_mut(&name.lexeme) {
            *slot = value;
        }

        Ok(())
    }

    fn resolve(&self, name: &str) -> Option<ScopeId> {
        let mut scope = Some(self.current);

        while let Some(id) = scope {
            let current = &self.scopes[id.0];

            if current.values.contains_key(name) {
                return Some(id);
            }

            scope = current.enclosing;
        }

        None
    }
}

fn undefined<T>(name: &Token) -> Result<T, RuntimeError> {
    runtime_error(RuntimeErrorType::UndefinedVariable { name: name.lexeme.clone() }, name)
}
