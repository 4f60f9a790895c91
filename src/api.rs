//! HTTP API for the calculator backend

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::{LogStore, Recorder};
use crate::state_machine::EngineContext;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub recorder: Recorder,
    pub engine: EngineContext,
}

impl AppState {
    pub fn new(store: Arc<dyn LogStore>, engine: EngineContext) -> Self {
        Self {
            recorder: Recorder::new(store),
            engine,
        }
    }
}
