//! Runtime services around the pure engine
//!
//! Drives the state machine for a batch of events and executes the effects
//! it produces. Persistence is best-effort: a failing store is logged and
//! never changes what the caller sees.

#[cfg(test)]
pub mod testing;
pub mod traits;

pub use traits::{DatabaseLogStore, LogStore};

use crate::arithmetic::Operation;
use crate::db::CalculationLog;
use crate::state_machine::{transition, Effect, EngineContext, EngineState, Event};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Apply `events` in order, collecting every effect produced
pub fn run_events(
    state: EngineState,
    context: &EngineContext,
    events: impl IntoIterator<Item = Event>,
) -> (EngineState, Vec<Effect>) {
    let mut effects = Vec::new();
    let state = events.into_iter().fold(state, |state, event| {
        let result = transition(&state, context, event);
        effects.extend(result.effects);
        result.new_state
    });
    (state, effects)
}

/// Writes calculation logs in the background
#[derive(Clone)]
pub struct Recorder {
    store: Arc<dyn LogStore>,
}

impl Recorder {
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        Self { store }
    }

    /// Persist a calculation without waiting for the write
    pub fn record_in_background(
        &self,
        operation: Operation,
        operands: Vec<f64>,
        result: f64,
    ) -> JoinHandle<()> {
        let store = self.store.clone();
        tokio::spawn(async move {
            match store.record(operation, operands, result).await {
                Ok(log) => {
                    tracing::debug!(id = %log.id, operation = %operation, result, "Calculation logged");
                }
                Err(e) => {
                    tracing::warn!(operation = %operation, error = %e, "Failed to log calculation");
                }
            }
        })
    }

    /// Execute the effects of a keypad run
    pub fn execute_effects(&self, effects: &[Effect]) {
        for effect in effects {
            match *effect {
                Effect::RecordCalculation {
                    operation,
                    operands,
                    result,
                } => {
                    self.record_in_background(operation, operands.to_vec(), result);
                }
            }
        }
    }

    pub async fn recent(&self, limit: usize) -> Result<Vec<CalculationLog>, String> {
        self.store.recent(limit).await
    }
}
