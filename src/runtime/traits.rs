//! Trait abstractions for log persistence
//!
//! These traits let the HTTP layer be tested with mock stores.

use crate::arithmetic::Operation;
use crate::db::{CalculationLog, Database};
use async_trait::async_trait;
use std::sync::Arc;

/// Storage for the calculation log
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Persist one calculation
    async fn record(
        &self,
        operation: Operation,
        operands: Vec<f64>,
        result: f64,
    ) -> Result<CalculationLog, String>;

    /// Most recent calculations, newest first
    async fn recent(&self, limit: usize) -> Result<Vec<CalculationLog>, String>;
}

#[async_trait]
impl<T: LogStore + ?Sized> LogStore for Arc<T> {
    async fn record(
        &self,
        operation: Operation,
        operands: Vec<f64>,
        result: f64,
    ) -> Result<CalculationLog, String> {
        (**self).record(operation, operands, result).await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<CalculationLog>, String> {
        (**self).recent(limit).await
    }
}

// ============================================================================
// Production Adapter
// ============================================================================

/// Adapter to use Database as a `LogStore`.
///
/// SQLite calls run on the blocking pool so they never stall the executor.
#[derive(Clone)]
pub struct DatabaseLogStore {
    db: Database,
}

impl DatabaseLogStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LogStore for DatabaseLogStore {
    async fn record(
        &self,
        operation: Operation,
        operands: Vec<f64>,
        result: f64,
    ) -> Result<CalculationLog, String> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.insert_log(operation, &operands, result))
            .await
            .map_err(|e| e.to_string())?
            .map_err(|e| e.to_string())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<CalculationLog>, String> {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.recent_logs(limit))
            .await
            .map_err(|e| e.to_string())?
            .map_err(|e| e.to_string())
    }
}
