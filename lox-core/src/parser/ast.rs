use std::fmt::Display;

use crate::{
    lexer::prelude::{Literal, Token, TokenKind},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
};

// declaration -> "var" IDENTIFIER ( "=" <expression> )? ";" | <statement>
// statement -> <expression_stmt> | <if> | <print> | <block>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(Expression),
    Print(Print),
    Var(VarDeclaration),
    Block(Block),
    If(Conditional),
}

impl<T: Iterator<Item = Token>> Parse<T> for Statement {
    fn parse(
        parser: &mut Parser<'_, T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        match parser.current_token.kind {
            TokenKind::Var => Ok(Self::Var(VarDeclaration::parse(parser, None)?)),
            _ => Self::parse_statement(parser),
        }
    }
}

impl Statement {
    /// Statements allowed where a declaration is not, such as the branches of an `if`.
    pub fn parse_statement<T: Iterator<Item = Token>>(parser: &mut Parser<'_, T>) -> Result<Self, ParseError> {
        let res = match parser.current_token.kind {
            TokenKind::If => Self::If(Conditional::parse(parser, None)?),
            TokenKind::Print => Self::Print(Print::parse(parser, None)?),
            TokenKind::LeftBrace => Self::Block(Block::parse(parser, None)?),
            _ => {
                let expression = Expression::parse(parser, None)?;

                parser.expect_one(
                    TokenKind::Semicolon,
                    ParseErrorType::ExpectSemicolon { after: "expression" }
                )?;

                Self::Expression(expression)
            }
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expression(expression) => write!(f, "(expr {expression})"),
            Self::Print(print) => write!(f, "{print}"),
            Self::Var(declaration) => write!(f, "{declaration}"),
            Self::Block(block) => write!(f, "{block}"),
            Self::If(conditional) => write!(f, "{conditional}"),
        }
    }
}

// print -> "print" <expression> ";"
#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub keyword: Token,
    pub expression: Expression,
}

impl<T: Iterator<Item = Token>> Parse<T> for Print {
    fn parse(
        parser: &mut Parser<'_, T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let keyword = parser.advance();
        let expression = Expression::parse(parser, None)?;

        parser.expect_one(TokenKind::Semicolon, ParseErrorType::ExpectSemicolon { after: "value" })?;

        Ok(Self {
            keyword,
            expression
        })
    }
}

impl Display for Print {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(print {})", self.expression)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaration {
    pub name: Token,
    pub initializer: Option<Expression>,
}

impl<T: Iterator<Item = Token>> Parse<T> for VarDeclaration {
    fn parse(
        parser: &mut Parser<'_, T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.advance();

        let name = parser.expect_one(TokenKind::Identifier, ParseErrorType::ExpectVariableName)?;

        let initializer = match parser.check(TokenKind::Equal) {
            true => {
                parser.advance();
                Some(Expression::parse(parser, None)?)
            },
            false => None
        };

        parser.expect_one(
            TokenKind::Semicolon,
            ParseErrorType::ExpectSemicolon { after: "variable declaration" }
        )?;

        Ok(Self {
            name,
            initializer
        })
    }
}

impl Display for VarDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.initializer {
            Some(initializer) => write!(f, "(var {} {})", self.name.lexeme, initializer),
            None => write!(f, "(var {})", self.name.lexeme),
        }
    }
}

// block -> "{" <declaration>* "}"
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl<T: Iterator<Item = Token>> Parse<T> for Block {
    fn parse(
        parser: &mut Parser<'_, T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.advance();

        let mut statements = vec![];

        while !parser.check(TokenKind::RightBrace) && !parser.is_at_end() {
            if let Some(statement) = parser.declaration() {
                statements.push(statement);
            }
        }

        parser.expect_one(TokenKind::RightBrace, ParseErrorType::ExpectRightBrace)?;

        Ok(Self { statements })
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!(" {statement}"))
            .collect::<String>();

        write!(f, "(block{statements})")
    }
}

// if -> "if" "(" <expression> ")" <statement> ( "else" <statement> )?
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: Expression,
    pub resolution: Box<Statement>,
    pub alternative: Option<Box<Statement>>,
}

impl<T: Iterator<Item = Token>> Parse<T> for Conditional {
    fn parse(
        parser: &mut Parser<'_, T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.advance();

        parser.expect_one(TokenKind::LeftParen, ParseErrorType::ExpectLeftParen { after: "'if'" })?;
        let condition = Expression::parse(parser, None)?;
        parser.expect_one(TokenKind::RightParen, ParseErrorType::ExpectRightParen { after: "if condition" })?;

        let resolution = Box::new(Statement::parse_statement(parser)?);

        // the innermost open `if` takes the `else`
        let alternative = match parser.check(TokenKind::Else) {
            true => {
                parser.advance();
                Some(Box::new(Statement::parse_statement(parser)?))
            },
            false => None
        };

        Ok(Self {
            condition,
            resolution,
            alternative
        })
    }
}

impl Display for Conditional {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.alternative {
            Some(alternative) => write!(f, "(if {} {} {})", self.condition, self.resolution, alternative),
            None => write!(f, "(if {} {})", self.condition, self.resolution),
        }
    }
}

// expression -> <assign> | <logical> | <binary> | <unary> | <primary>
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Binary(Binary),
    Grouping(Box<Expression>),
    Literal(Literal),
    Unary(Unary),
    Variable(Token),
    Assign(Assign),
    Logical(Logical),
}

impl<T: Iterator<Item = Token>> Parse<T> for Expression {
    fn parse(
        parser: &mut Parser<'_, T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = precedence.unwrap_or(Precedence::Lowest);

        let mut expr = Self::parse_prefix(parser)?;

        while precedence < parser.current_precedence() {
            expr = match parser.current_token.kind {
                TokenKind::Equal => Assign::parse_target(parser, expr)?,
                TokenKind::And | TokenKind::Or => Self::Logical(Logical::parse(parser, expr, None)?),
                _ => Self::Binary(Binary::parse(parser, expr, None)?),
            }
        }

        Ok(expr)
    }
}

impl Expression {
    // primary -> NUMBER | STRING | "true" | "false" | "nil" | IDENTIFIER | "(" <expression> ")"
    fn parse_prefix<T: Iterator<Item = Token>>(parser: &mut Parser<'_, T>) -> Result<Self, ParseError> {
        match parser.current_token.kind {
            TokenKind::Bang | TokenKind::Minus => Ok(Self::Unary(Unary::parse(parser, None)?)),
            TokenKind::Number
            | TokenKind::String
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Nil => {
                let token = parser.advance();

                Ok(Self::Literal(token.literal.unwrap_or(Literal::Nil)))
            },
            TokenKind::Identifier => Ok(Self::Variable(parser.advance())),
            TokenKind::LeftParen => {
                parser.advance();

                let expression = Expression::parse(parser, None)?;

                parser.expect_one(
                    TokenKind::RightParen,
                    ParseErrorType::ExpectRightParen { after: "expression" }
                )?;

                Ok(Self::Grouping(Box::new(expression)))
            },
            _ => parse_error(ParseErrorType::ExpectExpression, &parser.current_token)
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binary(binary) => write!(f, "{binary}"),
            Self::Grouping(expression) => write!(f, "(group {expression})"),
            Self::Literal(literal) => match literal {
                Literal::String(value) => write!(f, "\"{value}\""),
                Literal::Number(value) => write!(f, "{value}"),
                literal => write!(f, "{literal}"),
            },
            Self::Unary(unary) => write!(f, "{unary}"),
            Self::Variable(name) => write!(f, "{}", name.lexeme),
            Self::Assign(assign) => write!(f, "{assign}"),
            Self::Logical(logical) => write!(f, "{logical}"),
        }
    }
}

// binary -> <expression> ( "==" | "!=" | ">" | ">=" | "<" | "<=" | "+" | "-" | "*" | "/" ) <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
}

impl<T: Iterator<Item = Token>> InfixParse<T> for Binary {
    fn parse(
        parser: &mut Parser<'_, T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();
        let operator = parser.advance();

        // an operator of the same level ends the right side, so chains are left-associative
        let right = Expression::parse(parser, Some(precedence))?;

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }
}

impl Display for Binary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.operator.lexeme, self.left, self.right)
    }
}

// logical -> <expression> ( "and" | "or" ) <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Logical {
    pub left: Box<Expression>,
    pub operator: Token,
    pub right: Box<Expression>,
}

impl<T: Iterator<Item = Token>> InfixParse<T> for Logical {
    fn parse(
        parser: &mut Parser<'_, T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();
        let operator = parser.advance();
        let right = Expression::parse(parser, Some(precedence))?;

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }
}

impl Display for Logical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.operator.lexeme, self.left, self.right)
    }
}

// unary -> ( "!" | "-" ) <unary>
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub operator: Token,
    pub right: Box<Expression>,
}

impl<T: Iterator<Item = Token>> Parse<T> for Unary {
    fn parse(
        parser: &mut Parser<'_, T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let operator = parser.advance();
        let right = Expression::parse(parser, Some(Precedence::Unary))?;

        Ok(Self {
            operator,
            right: Box::new(right),
        })
    }
}

impl Display for Unary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {})", self.operator.lexeme, self.right)
    }
}

// assign -> IDENTIFIER "=" <assign>
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub name: Token,
    pub value: Box<Expression>,
}

impl Assign {
    /// Parses the right side of `=` after `target` has been parsed. A target that is not a
    /// plain variable is reported and returned unchanged; parsing goes on.
    pub fn parse_target<T: Iterator<Item = Token>>(
        parser: &mut Parser<'_, T>,
        target: Expression
    ) -> Result<Expression, ParseError> {
        let equals = parser.advance();

        // Lowest lets a nested `=` bind again, so assignment is right-associative
        let value = Expression::parse(parser, Some(Precedence::Lowest))?;

        match target {
            Expression::Variable(name) => Ok(Expression::Assign(Self {
                name,
                value: Box::new(value),
            })),
            target => {
                parser.report(ParseError {
                    error: ParseErrorType::InvalidAssignmentTarget,
                    token: equals,
                });

                Ok(target)
            }
        }
    }
}

impl Display for Assign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(= {} {})", self.name.lexeme, self.value)
    }
}
