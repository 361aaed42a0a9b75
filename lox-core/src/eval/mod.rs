
pub mod error;

pub mod prelude {
    pub use super::{
        error::*,
        Interpreter,
    };
}

use std::io::Write;

use crate::{
    environment::prelude::{Environment, Value},
    lexer::prelude::{Token, TokenKind},
    parser::prelude::{Binary, Block, Conditional, Expression, Logical, Print, Statement, Unary, VarDeclaration},
    utils::prelude::Reporter,
};

use self::error::{runtime_error, RuntimeError, RuntimeErrorType};

/// Tree-walking evaluator. Output of `print` goes to `out`; the environment
/// outlives a single [`Interpreter::interpret`] call, so a REPL can keep its globals.
pub struct Interpreter<W: Write> {
    environment: Environment,
    out: W,
}

impl Interpreter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self {
            environment: Environment::new(),
            out,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs `statements` in order. The first runtime error stops the batch and is
    /// handed to `reporter`; output already written stays written.
    pub fn interpret(&mut self, statements: &[Statement], reporter: &Reporter) {
        if let Err(err) = self.execute_all(statements) {
            log::debug!("runtime error at line {}: {}", err.line(), err.error);

            reporter.runtime_error(err);
        }
    }

    pub fn execute_all(&mut self, statements: &[Statement]) -> Result<(), RuntimeError> {
        statements.iter()
            .try_for_each(|statement| self.eval_statement(statement))
    }

    fn eval_statement(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
        match statement {
            Statement::Expression(expression) => {
                self.eval_expression(expression)?;
            },
            Statement::Print(print) => self.eval_print(print)?,
            Statement::Var(declaration) => self.eval_declaration(declaration)?,
            Statement::Block(block) => self.eval_block(block)?,
            Statement::If(conditional) => self.eval_conditional(conditional)?,
        };

        Ok(())
    }

    fn eval_print(&mut self, print: &Print) -> Result<(), RuntimeError> {
        let value = self.eval_expression(&print.expression)?;

        match writeln!(self.out, "{value}") {
            Ok(()) => Ok(()),
            Err(err) => runtime_error(RuntimeErrorType::Output { kind: err.kind() }, &print.keyword),
        }
    }

    fn eval_declaration(&mut self, declaration: &VarDeclaration) -> Result<(), RuntimeError> {
        let value = match &declaration.initializer {
            Some(initializer) => self.eval_expression(initializer)?,
            None => Value::Nil,
        };

        self.environment.define(declaration.name.lexeme.as_str(), value);

        Ok(())
    }

    fn eval_block(&mut self, block: &Block) -> Result<(), RuntimeError> {
        let previous = self.environment.enter_scope();

        let result = self.execute_all(&block.statements);

        // restored on every path, the error included
        self.environment.exit_scope(previous);

        result
    }

    fn eval_conditional(&mut self, conditional: &Conditional) -> Result<(), RuntimeError> {
        if self.eval_expression(&conditional.condition)?.is_truthy() {
            self.eval_statement(&conditional.resolution)
        } else if let Some(alternative) = &conditional.alternative {
            self.eval_statement(alternative)
        } else {
            Ok(())
        }
    }

    fn eval_expression(&mut self, expression: &Expression) -> Result<Value, RuntimeError> {
        match expression {
            Expression::Literal(literal) => Ok(literal.clone().into()),
            Expression::Grouping(inner) => self.eval_expression(inner),
            Expression::Unary(unary) => self.eval_prefix(unary),
            Expression::Binary(binary) => self.eval_infix(binary),
            Expression::Logical(logical) => self.eval_logical(logical),
            Expression::Variable(name) => self.environment.get(name),
            Expression::Assign(assign) => {
                let value = self.eval_expression(&assign.value)?;

                self.environment.assign(&assign.name, value.clone())?;

                Ok(value)
            },
        }
    }

    fn eval_prefix(&mut self, unary: &Unary) -> Result<Value, RuntimeError> {
        let right = self.eval_expression(&unary.right)?;

        match unary.operator.kind {
            TokenKind::Bang => Ok((!right.is_truthy()).into()),
            TokenKind::Minus => {
                let value = number_operand(&unary.operator, &right)?;

                Ok((-value).into())
            },
            _ => unknown_operator(&unary.operator),
        }
    }

    fn eval_infix(&mut self, binary: &Binary) -> Result<Value, RuntimeError> {
        let left = self.eval_expression(&binary.left)?;
        let right = self.eval_expression(&binary.right)?;

        let operator = &binary.operator;

        let value: Value = match operator.kind {
            TokenKind::EqualEqual => (left == right).into(),
            TokenKind::BangEqual => (left != right).into(),
            TokenKind::Plus => match (left, right) {
                (Value::Number { value: l }, Value::Number { value: r }) => (l + r).into(),
                (Value::String { value: l }, Value::String { value: r }) => Value::String { value: l + &r },
                _ => return runtime_error(RuntimeErrorType::OperandsMustBeNumbersOrStrings, operator),
            },
            kind => {
                let (l, r) = number_operands(operator, &left, &right)?;

                match kind {
                    TokenKind::Minus => (l - r).into(),
                    TokenKind::Star => (l * r).into(),
                    TokenKind::Slash => (l / r).into(),
                    TokenKind::Greater => (l > r).into(),
                    TokenKind::GreaterEqual => (l >= r).into(),
                    TokenKind::Less => (l < r).into(),
                    TokenKind::LessEqual => (l <= r).into(),
                    _ => return unknown_operator(operator),
                }
            },
        };

        Ok(value)
    }

    /// `or` and `and` yield one of their operands, not a boolean, and skip the
    /// right side once the left decides the result.
    fn eval_logical(&mut self, logical: &Logical) -> Result<Value, RuntimeError> {
        let left = self.eval_expression(&logical.left)?;

        let decided = match logical.operator.kind {
            TokenKind::Or => left.is_truthy(),
            _ => !left.is_truthy(),
        };

        if decided {
            return Ok(left);
        }

        self.eval_expression(&logical.right)
    }
}

fn unknown_operator<T>(operator: &Token) -> Result<T, RuntimeError> {
    runtime_error(RuntimeErrorType::UnknownOperator { operator: operator.lexeme.clone() }, operator)
}

fn number_operand(operator: &Token, operand: &Value) -> Result<f64, RuntimeError> {
    match operand {
        Value::Number { value } => Ok(*value),
        _ => runtime_error(RuntimeErrorType::OperandMustBeNumber, operator),
    }
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number { value: l }, Value::Number { value: r }) => Ok((*l, *r)),
        _ => runtime_error(RuntimeErrorType::OperandsMustBeNumbers, operator),
    }
}
