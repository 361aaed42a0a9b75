use crate::{
    lexer::prelude::{Token, TokenKind},
    utils::prelude::Reporter,
};
use super::error::{ParseError, ParseErrorType};
use super::ast::{Expression, Statement};

pub trait Parse<T: Iterator<Item = Token>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<'_, T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub trait InfixParse<T: Iterator<Item = Token>>
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser<'_, T>,
        left: Expression,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub struct Parser<'r, T: Iterator<Item = Token>> {
    pub current_token: Token,
    pub previous_token: Option<Token>,

    tokens: T,
    reporter: &'r Reporter,
}

impl<'r, T: Iterator<Item = Token>> Parser<'r, T> {
    pub fn new(mut input: T, reporter: &'r Reporter) -> Self {
        let current_token = input.next().unwrap_or_else(|| Token::eof(1, 0));

        Self {
            current_token,
            previous_token: None,

            tokens: input,
            reporter,
        }
    }

    /// Parses declarations until the end of input. Statements that fail to parse are
    /// reported and skipped, so the result may be partial.
    pub fn parse(&mut self) -> Vec<Statement> {
        let mut statements = vec![];

        while !self.is_at_end() {
            if let Some(statement) = self.declaration() {
                statements.push(statement);
            }
        }

        log::debug!("parsed {} statements", statements.len());

        statements
    }

    pub fn declaration(&mut self) -> Option<Statement> {
        match Statement::parse(self, None) {
            Ok(statement) => Some(statement),
            Err(err) => {
                self.report(err);
                self.synchronize();

                None
            }
        }
    }

    /// Reports an error without unwinding the current rule.
    pub fn report(&self, error: ParseError) {
        self.reporter.syntax_error(error.into());
    }

    /// Skips tokens until the start of the next statement.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if matches!(&self.previous_token, Some(token) if token.kind == TokenKind::Semicolon) {
                break;
            }

            if self.current_token.kind.starts_statement() {
                break;
            }

            self.advance();
        }

        log::trace!("synchronized at line {} before `{}`", self.current_token.line, self.current_token.lexeme);
    }

    pub fn is_at_end(&self) -> bool {
        self.current_token.is_eof()
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    /// Consumes the current token. The end-of-input token is never consumed.
    pub fn advance(&mut self) -> Token {
        if self.is_at_end() {
            return self.current_token.clone();
        }

        let next = match self.tokens.next() {
            Some(token) => token,
            None => Token::eof(self.current_token.line, self.current_token.location.end),
        };

        let consumed = std::mem::replace(&mut self.current_token, next);
        self.previous_token = Some(consumed.clone());

        consumed
    }

    pub fn expect_one(&mut self, kind: TokenKind, error: ParseErrorType) -> Result<Token, ParseError> {
        if self.check(kind) {
            return Ok(self.advance());
        }

        Err(ParseError {
            error,
            token: self.current_token.clone(),
        })
    }

    pub fn current_precedence(&self) -> Precedence {
        Precedence::from(&self.current_token.kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Precedence {
    Lowest,
    Assign,
    Or,
    And,
    Equality,
    Comparison,
    Term,
    Factor,
    Unary,
}

impl From<&TokenKind> for Precedence {
    fn from(value: &TokenKind) -> Self {
        match value {
            TokenKind::Equal => Self::Assign,
            TokenKind::Or => Self::Or,
            TokenKind::And => Self::And,
            TokenKind::BangEqual | TokenKind::EqualEqual => Self::Equality,
            TokenKind::Greater | TokenKind::GreaterEqual |
            TokenKind::Less | TokenKind::LessEqual => Self::Comparison,
            TokenKind::Minus | TokenKind::Plus => Self::Term,
            TokenKind::Slash | TokenKind::Star => Self::Factor,
            _ => Self::Lowest,
        }
    }
}

pub fn parse_tokens(tokens: Vec<Token>, reporter: &Reporter) -> Vec<Statement> {
    let mut parser = Parser::new(tokens.into_iter(), reporter);

    parser.parse()
}
