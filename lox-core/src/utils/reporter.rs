use std::{cell::Cell, fmt::Display, rc::Rc, sync::{Arc, RwLock, RwLockWriteGuard}};

use crate::{
    eval::prelude::RuntimeError,
    lexer::prelude::LexicalError,
    parser::prelude::ParseError,
    utils::prelude::SrcSpan,
};

/// A problem found before execution: either while scanning or while parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    Lexical(LexicalError),
    Parse(ParseError),
}

impl SyntaxError {
    pub fn line(&self) -> usize {
        match self {
            SyntaxError::Lexical(error) => error.line,
            SyntaxError::Parse(error) => error.token.line,
        }
    }

    pub fn location(&self) -> SrcSpan {
        match self {
            SyntaxError::Lexical(error) => error.location,
            SyntaxError::Parse(error) => error.token.location,
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxError::Lexical(error) => write!(f, "{error}"),
            SyntaxError::Parse(error) => write!(f, "{error}"),
        }
    }
}

impl From<LexicalError> for SyntaxError {
    fn from(value: LexicalError) -> Self {
        SyntaxError::Lexical(value)
    }
}

impl From<ParseError> for SyntaxError {
    fn from(value: ParseError) -> Self {
        SyntaxError::Parse(value)
    }
}

/// Destination of the diagnostics produced by the pipeline. The driver owns it.
pub trait ReporterIO {
    fn syntax_error(&self, error: SyntaxError);
    fn runtime_error(&self, error: RuntimeError);
}

#[derive(Debug, Clone, Copy)]
pub struct NullReporterIO;

impl ReporterIO for NullReporterIO {
    fn syntax_error(&self, _error: SyntaxError) {}
    fn runtime_error(&self, _error: RuntimeError) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorReporterIO {
    pub syntax_errors: Arc<RwLock<Vec<SyntaxError>>>,
    pub runtime_errors: Arc<RwLock<Vec<RuntimeError>>>,
}

impl VectorReporterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_syntax_errors(&self) -> Vec<SyntaxError> {
        std::mem::take(&mut *write_lock(&self.syntax_errors))
    }

    pub fn take_runtime_errors(&self) -> Vec<RuntimeError> {
        std::mem::take(&mut *write_lock(&self.runtime_errors))
    }

    pub fn reset(&self) {
        write_lock(&self.syntax_errors).clear();
        write_lock(&self.runtime_errors).clear();
    }
}

fn write_lock<T>(lock: &RwLock<Vec<T>>) -> RwLockWriteGuard<'_, Vec<T>> {
    // a poisoned vector still holds every error pushed before the panic
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ReporterIO for VectorReporterIO {
    fn syntax_error(&self, error: SyntaxError) {
        write_lock(&self.syntax_errors).push(error);
    }

    fn runtime_error(&self, error: RuntimeError) {
        write_lock(&self.runtime_errors).push(error);
    }
}

/// Forwards diagnostics to a sink and remembers how many of each kind went through.
pub struct Reporter {
    syntax_errors: Cell<usize>,
    runtime_errors: Cell<usize>,
    emitter: Rc<dyn ReporterIO>
}

impl Reporter {
    pub fn new(emitter: Rc<dyn ReporterIO>) -> Self {
        Self {
            syntax_errors: Cell::new(0),
            runtime_errors: Cell::new(0),
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(Rc::new(NullReporterIO))
    }

    pub fn syntax_error(&self, error: SyntaxError) {
        self.syntax_errors.set(self.syntax_errors.get() + 1);
        self.emitter.syntax_error(error);
    }

    pub fn runtime_error(&self, error: RuntimeError) {
        self.runtime_errors.set(self.runtime_errors.get() + 1);
        self.emitter.runtime_error(error);
    }

    pub fn syntax_error_count(&self) -> usize {
        self.syntax_errors.get()
    }

    pub fn runtime_error_count(&self) -> usize {
        self.runtime_errors.get()
    }

    pub fn had_syntax_error(&self) -> bool {
        self.syntax_error_count() > 0
    }

    pub fn had_runtime_error(&self) -> bool {
        self.runtime_error_count() > 0
    }

    pub fn reset(&self) {
        self.syntax_errors.set(0);
        self.runtime_errors.set(0);
    }
}
