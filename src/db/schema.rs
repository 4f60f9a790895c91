//! Database schema and types

use crate::arithmetic::Operation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS calculation_logs (
    id TEXT PRIMARY KEY,
    operation TEXT NOT NULL,
    operands TEXT NOT NULL,
    result REAL NOT NULL,
    timestamp TEXT NOT NULL,
    seq INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_calculation_logs_recent ON calculation_logs(timestamp DESC, seq DESC);
";

/// Number of log entries returned by the listing endpoint
pub const RECENT_LOG_LIMIT: usize = 50;

/// A persisted calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationLog {
    pub id: String,
    pub operation: Operation,
    pub operands: Vec<f64>,
    pub result: f64,
    pub timestamp: DateTime<Utc>,
}
