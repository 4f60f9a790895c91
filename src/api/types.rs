//! API request and response types

use crate::state_machine::{EngineState, Event};
use serde::{Deserialize, Serialize};

/// Request to fold an operation over a list of operands.
///
/// Both fields are optional at the serde level so that a missing field is
/// reported as invalid input rather than a framework rejection.
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    pub operands: Option<Vec<f64>>,
}

/// Result of a batch calculation
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub result: f64,
}

/// Request to drive the keypad engine server-side
#[derive(Debug, Deserialize)]
pub struct KeypadRequest {
    /// State from a previous response; a fresh engine when absent
    #[serde(default)]
    pub state: Option<EngineState>,
    pub events: Vec<Event>,
}

/// Keypad state after applying the requested events
#[derive(Debug, Serialize)]
pub struct KeypadResponse {
    pub display: String,
    pub state: EngineState,
}

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub timestamp: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
