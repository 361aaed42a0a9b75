use std::fmt::Display;

use crate::lexer::prelude::Literal;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Boolean {
        value: bool
    },
    Number {
        value: f64,
    },
    String {
        value: String,
    },
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean { value } => write!(f, "{value}"),
            Value::Number { value } => write_number(f, *value),
            Value::String { value } => write!(f, "{value}"),
        }
    }
}

fn write_number(f: &mut std::fmt::Formatter<'_>, value: f64) -> std::fmt::Result {
    if value.is_nan() {
        write!(f, "NaN")
    } else if value.is_infinite() {
        write!(f, "{}Infinity", if value < 0.0 { "-" } else { "" })
    } else if value == 0.0 {
        // negative zero prints as plain zero
        write!(f, "0")
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        // very large and very small magnitudes switch to exponent form, `1e+21`, `1e-7`
        let formatted = format!("{value:e}");

        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => write!(f, "{mantissa}e+{exponent}"),
            _ => write!(f, "{formatted}"),
        }
    } else {
        write!(f, "{value}")
    }
}

impl Value {
    /// `nil` and `false` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Boolean { value: false })
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean { value }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number { value }
    }
}

impl From<Literal> for Value {
    fn from(value: Literal) -> Self {
        match value {
            Literal::Nil => Value::Nil,
            Literal::Bool(value) => Value::Boolean { value },
            Literal::Number(value) => Value::Number { value },
            Literal::String(value) => Value::String { value },
        }
    }
}
