use std::fmt::Display;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnexpectedCharacter { ch: char },
    UnterminatedString,
    InvalidNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub line: usize,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnexpectedCharacter { ch } => {
                ("Unexpected character.", vec![format!("Found `{}` ({:?})", ch, ch)])
            },
            LexicalErrorType::UnterminatedString => {
                ("Unterminated string.", vec!["A string must be closed with `\"`".to_string()])
            },
            LexicalErrorType::InvalidNumber => {
                ("Invalid number literal.", vec![])
            },
        }
    }
}

impl Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.details().0)
    }
}
