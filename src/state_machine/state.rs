//! Calculator state types

use crate::arithmetic::Operation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display value shown after a failed operation
pub const ERROR_TOKEN: &str = "Error";

/// Display value of a fresh engine
pub const INITIAL_DISPLAY: &str = "0";

/// Default display-width budget for formatted results
pub const DEFAULT_DISPLAY_WIDTH: usize = 9;

/// Smallest budget that always fits a scientific-notation result
pub const MIN_DISPLAY_WIDTH: usize = 8;

/// Left-hand operand and operator captured when an operator key was pressed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation {
    pub operand: f64,
    pub operator: Operation,
}

/// Full keypad state.
///
/// Owned by whoever drives the engine; never shared between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub display: String,
    #[serde(default)]
    pub pending: Option<PendingOperation>,
    #[serde(default)]
    pub awaiting_second_operand: bool,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}

/// Reasons an externally supplied state is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("display is empty")]
    EmptyDisplay,
    #[error("display is not a number: {0}")]
    NotANumber(String),
    #[error("display has more than one decimal separator: {0}")]
    MultipleSeparators(String),
    #[error("pending operand is not finite")]
    NonFiniteOperand,
    #[error("error state cannot carry a pending operation")]
    PendingInErrorState,
    #[error("display is not in canonical form: {0}")]
    NonCanonical(String),
    #[error("awaiting a second operand without a pending operation")]
    AwaitingWithoutPending,
    #[error("display does not match the pending operand")]
    AwaitingOperandMismatch,
}

impl EngineState {
    pub fn new() -> Self {
        Self {
            display: INITIAL_DISPLAY.to_string(),
            pending: None,
            awaiting_second_operand: false,
        }
    }

    pub(crate) fn error() -> Self {
        Self {
            display: ERROR_TOKEN.to_string(),
            pending: None,
            awaiting_second_operand: false,
        }
    }

    /// The string currently shown
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_error(&self) -> bool {
        self.display == ERROR_TOKEN
    }

    /// Numeric value of the display, `None` in the error state
    pub fn value(&self) -> Option<f64> {
        if self.is_error() {
            return None;
        }
        self.display.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Check the invariants a state must satisfy.
    ///
    /// Used on states that arrive from outside the engine; states produced by
    /// `transition` always pass.
    pub fn validate(&self) -> Result<(), InvalidState> {
        if self.display.is_empty() {
            return Err(InvalidState::EmptyDisplay);
        }
        if self.is_error() {
            if self.pending.is_some() {
                return Err(InvalidState::PendingInErrorState);
            }
            if self.awaiting_second_operand {
                return Err(InvalidState::AwaitingWithoutPending);
            }
            return Ok(());
        }
        if self.display.matches('.').count() > 1 {
            return Err(InvalidState::MultipleSeparators(self.display.clone()));
        }
        let Some(value) = self.value() else {
            return Err(InvalidState::NotANumber(self.display.clone()));
        };
        if !is_canonical(&self.display, value) {
            return Err(InvalidState::NonCanonical(self.display.clone()));
        }
        if let Some(pending) = &self.pending {
            if !pending.operand.is_finite() {
                return Err(InvalidState::NonFiniteOperand);
            }
        }
        if self.awaiting_second_operand {
            // While awaiting, the display still shows the committed operand
            match &self.pending {
                None => return Err(InvalidState::AwaitingWithoutPending),
                Some(pending) if pending.operand.to_bits() != value.to_bits() => {
                    return Err(InvalidState::AwaitingOperandMismatch);
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Whether `display` is text the engine itself could have produced.
///
/// Accepts entries such as `12.` and `-0.5`, and scientific results such as
/// `1.5e-9`. Rejects explicit plus signs, leading zeros, and negative zero.
fn is_canonical(display: &str, value: f64) -> bool {
    let negative = display.starts_with('-');
    if negative && value == 0.0 {
        return false;
    }
    let body = display.strip_prefix('-').unwrap_or(display);
    let (mantissa, exponent) = match body.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (body, None),
    };
    let (integer, fraction) = match mantissa.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (mantissa, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if integer.is_empty() || !all_digits(integer) || !all_digits(fraction) {
        return false;
    }
    if integer.len() > 1 && integer.starts_with('0') {
        return false;
    }
    match exponent {
        None => true,
        Some(exponent) => {
            let digits = exponent.strip_prefix('-').unwrap_or(exponent);
            integer.len() == 1
                && integer != "0"
                && !mantissa.ends_with('.')
                && !digits.is_empty()
                && all_digits(digits)
        }
    }
}

/// Per-engine settings threaded through every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineContext {
    /// Maximum characters a formatted result may occupy
    pub display_width: usize,
}

impl EngineContext {
    pub fn new(display_width: usize) -> Self {
        Self {
            display_width: display_width.max(MIN_DISPLAY_WIDTH),
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_WIDTH)
    }
}
