use std::fmt::Display;

use crate::lexer::prelude::{Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorType {
    ExpectExpression,
    ExpectVariableName,
    ExpectSemicolon { after: &'static str },
    ExpectLeftParen { after: &'static str },
    ExpectRightParen { after: &'static str },
    ExpectRightBrace,
    InvalidAssignmentTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub token: Token
}

impl ParseError {
    pub fn message(&self) -> String {
        match self.error {
            ParseErrorType::ExpectExpression => "Expect expression.".into(),
            ParseErrorType::ExpectVariableName => "Expect variable name.".into(),
            ParseErrorType::ExpectSemicolon { after } => format!("Expect ';' after {after}."),
            ParseErrorType::ExpectLeftParen { after } => format!("Expect '(' after {after}."),
            ParseErrorType::ExpectRightParen { after } => format!("Expect ')' after {after}."),
            ParseErrorType::ExpectRightBrace => "Expect '}' after block.".into(),
            ParseErrorType::InvalidAssignmentTarget => "Invalid assignment target.".into(),
        }
    }

    /// Where the error happened, relative to the offending token.
    pub fn place(&self) -> String {
        match self.token.kind {
            TokenKind::Eof => " at end".into(),
            _ => format!(" at '{}'", self.token.lexeme),
        }
    }

    /// Human description of the offending token.
    pub fn found(&self) -> String {
        match self.token.kind {
            TokenKind::Eof => "the end of the file".into(),
            TokenKind::Number => "a Number".into(),
            TokenKind::String => "a String".into(),
            TokenKind::Identifier => format!("the identifier `{}`", self.token.lexeme),
            kind if kind.is_reserved_word() => format!("the keyword `{}`", self.token.lexeme),
            _ => format!("`{}`", self.token.lexeme),
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[line {}] Error{}: {}", self.token.line, self.place(), self.message())
    }
}

pub fn parse_error<T>(error: ParseErrorType, token: &Token) -> Result<T, ParseError> {
    Err(ParseError { error, token: token.clone() })
}
