use std::fmt::Display;

use thiserror::Error;

use crate::lexer::prelude::Token;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeErrorType {
    #[error("Operand must be a number.")]
    OperandMustBeNumber,
    #[error("Operands must be numbers.")]
    OperandsMustBeNumbers,
    #[error("Operands must be two numbers or two strings.")]
    OperandsMustBeNumbersOrStrings,
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable {
        name: String
    },
    #[error("Unknown operator '{operator}'.")]
    UnknownOperator {
        operator: String
    },
    #[error("Failed to write output: {kind}.")]
    Output {
        kind: std::io::ErrorKind
    },
}

/// A fault raised while executing, blamed on the token that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub token: Token,
}

impl RuntimeError {
    pub fn new(error: RuntimeErrorType, token: &Token) -> Self {
        Self { error, token: token.clone() }
    }

    pub fn line(&self) -> usize {
        self.token.line
    }
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n[line {}]", self.error, self.token.line)
    }
}

impl std::error::Error for RuntimeError {}

pub fn runtime_error<T>(error: RuntimeErrorType, token: &Token) -> Result<T, RuntimeError> {
    Err(RuntimeError::new(error, token))
}
