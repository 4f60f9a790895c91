//! Operator table shared by the keypad engine and the batch endpoint

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The four supported binary operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Arithmetic failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("Division by zero is not allowed")]
    DivisionByZero,
    #[error("Result is not a finite number")]
    NonFinite,
    #[error("At least one operand is required")]
    EmptyOperands,
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl Operation {
    /// Parse the wire name used by the batch endpoint
    pub fn from_name(name: &str) -> Result<Self, ArithmeticError> {
        match name {
            "add" => Ok(Operation::Add),
            "subtract" => Ok(Operation::Subtract),
            "multiply" => Ok(Operation::Multiply),
            "divide" => Ok(Operation::Divide),
            other => Err(ArithmeticError::UnsupportedOperation(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }

    /// Apply the operation to two operands.
    ///
    /// Division by zero and non-finite results are the only failures.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, ArithmeticError> {
        let result = match self {
            Operation::Add => lhs + rhs,
            Operation::Subtract => lhs - rhs,
            Operation::Multiply => lhs * rhs,
            Operation::Divide => {
                if rhs == 0.0 {
                    return Err(ArithmeticError::DivisionByZero);
                }
                lhs / rhs
            }
        };
        finite(result)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Left-fold an operand list with `op`.
///
/// Add folds from 0 and multiply from 1. Subtract and divide have no
/// identity and start from the first operand. Divide rejects a zero operand
/// at any position, including the first.
pub fn evaluate_batch(op: Operation, operands: &[f64]) -> Result<f64, ArithmeticError> {
    let Some((&first, rest)) = operands.split_first() else {
        return Err(ArithmeticError::EmptyOperands);
    };

    let result = match op {
        Operation::Add => operands.iter().fold(0.0, |acc, x| acc + x),
        Operation::Multiply => operands.iter().fold(1.0, |acc, x| acc * x),
        Operation::Subtract => rest.iter().fold(first, |acc, x| acc - x),
        Operation::Divide => {
            if operands.iter().any(|x| *x == 0.0) {
                return Err(ArithmeticError::DivisionByZero);
            }
            rest.iter().fold(first, |acc, x| acc / x)
        }
    };
    finite(result)
}

fn finite(value: f64) -> Result<f64, ArithmeticError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ArithmeticError::NonFinite)
    }
}
