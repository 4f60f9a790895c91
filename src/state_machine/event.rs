//! Keypad input events

use crate::arithmetic::Operation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A decimal digit, 0 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("digit out of range: {0}")]
pub struct InvalidDigit(pub u8);

impl Digit {
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Self(value))
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<u8> for Digit {
    type Error = InvalidDigit;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value).ok_or(InvalidDigit(value))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

/// Events that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Event {
    Digit(Digit),
    DecimalPoint,
    Operator(Operation),
    Equals,
    Clear,
    ToggleSign,
    Percent,
}

impl Event {
    /// `None` for values above 9
    #[allow(dead_code)] // Used in tests
    pub fn digit(value: u8) -> Option<Self> {
        Digit::new(value).map(Event::Digit)
    }
}
