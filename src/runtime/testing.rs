//! Mock implementations for testing
//!
//! These mocks enable HTTP-level testing without a real database.

use super::traits::LogStore;
use crate::arithmetic::Operation;
use crate::db::CalculationLog;
use async_trait::async_trait;
use std::sync::Mutex;

// ============================================================================
// Failing Log Store
// ============================================================================

/// Store whose every call fails, for exercising best-effort persistence
pub struct FailingLogStore;

#[async_trait]
impl LogStore for FailingLogStore {
    async fn record(
        &self,
        _operation: Operation,
        _operands: Vec<f64>,
        _result: f64,
    ) -> Result<CalculationLog, String> {
        Err("disk full".to_string())
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<CalculationLog>, String> {
        Err("disk full".to_string())
    }
}

// ============================================================================
// Recording Log Store
// ============================================================================

/// In-memory store that keeps every record
#[derive(Default)]
pub struct InMemoryLogStore {
    logs: Mutex<Vec<CalculationLog>>,
}

impl InMemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<CalculationLog> {
        self.logs.lock().unwrap().clone()
    }
}

#[async_trait]
impl LogStore for InMemoryLogStore {
    async fn record(
        &self,
        operation: Operation,
        operands: Vec<f64>,
        result: f64,
    ) -> Result<CalculationLog, String> {
        let log = CalculationLog {
            id: uuid::Uuid::new_v4().to_string(),
            operation,
            operands,
            result,
            timestamp: chrono::Utc::now(),
        };
        self.logs.lock().unwrap().push(log.clone());
        Ok(log)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<CalculationLog>, String> {
        let logs = self.logs.lock().unwrap();
        Ok(logs.iter().rev().take(limit).cloned().collect())
    }
}
