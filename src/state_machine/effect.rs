//! Effects produced by state transitions

use crate::arithmetic::Operation;

/// Effects to be executed by the caller after a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// An operation was resolved successfully and may be logged
    RecordCalculation {
        operation: Operation,
        operands: [f64; 2],
        result: f64,
    },
}

impl Effect {
    pub fn record(operation: Operation, lhs: f64, rhs: f64, result: f64) -> Self {
        Effect::RecordCalculation {
            operation,
            operands: [lhs, rhs],
            result,
        }
    }
}
