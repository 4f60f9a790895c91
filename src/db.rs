//! Database module
//!
//! Provides persistence for the calculation log.

mod schema;

pub use schema::*;

use crate::arithmetic::Operation;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Database lock poisoned")]
    Poisoned,
}

pub type DbResult<T> = Result<T, DbError>;

/// Thread-safe database handle
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open or create database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    #[allow(dead_code)] // Used in tests
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::Poisoned)
    }

    fn run_migrations(&self) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ==================== Calculation Log Operations ====================

    /// Record a completed calculation
    pub fn insert_log(
        &self,
        operation: Operation,
        operands: &[f64],
        result: f64,
    ) -> DbResult<CalculationLog> {
        let conn = self.lock()?;
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();
        let operands_json = serde_json::to_string(operands)?;

        conn.execute(
            "INSERT INTO calculation_logs (id, operation, operands, result, timestamp, seq)
             VALUES (?1, ?2, ?3, ?4, ?5, (SELECT COALESCE(MAX(seq), 0) + 1 FROM calculation_logs))",
            params![
                id,
                operation.name(),
                operands_json,
                result,
                now.to_rfc3339_opts(SecondsFormat::Micros, true)
            ],
        )?;

        Ok(CalculationLog {
            id,
            operation,
            operands: operands.to_vec(),
            result,
            timestamp: now,
        })
    }

    /// Most recent calculations, newest first
    pub fn recent_logs(&self, limit: usize) -> DbResult<Vec<CalculationLog>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, operation, operands, result, timestamp
             FROM calculation_logs
             ORDER BY timestamp DESC, seq DESC
             LIMIT ?1",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut logs = Vec::new();
        for row in rows {
            let (id, operation, operands, result, timestamp) = row?;
            let Ok(operation) = Operation::from_name(&operation) else {
                tracing::warn!(id = %id, operation = %operation, "Skipping log with unknown operation");
                continue;
            };
            logs.push(CalculationLog {
                id,
                operation,
                operands: serde_json::from_str(&operands)?,
                result,
                timestamp: parse_datetime(&timestamp),
            });
        }
        Ok(logs)
    }

    /// Total number of stored calculations
    pub fn count_logs(&self) -> DbResult<usize> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM calculation_logs", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}
