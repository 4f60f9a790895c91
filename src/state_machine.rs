//! Calculator keypad state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! every key press is an [`Event`], and [`transition`] maps the current
//! [`EngineState`] and an event to the next state plus any [`Effect`]s the
//! caller should carry out.

mod effect;
pub mod event;
mod format;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

#[allow(unused_imports)] // Public API re-exports
pub use effect::Effect;
#[allow(unused_imports)]
pub use event::{Digit, Event};
#[allow(unused_imports)]
pub use format::format_number;
#[allow(unused_imports)]
pub use state::{
    EngineContext, EngineState, InvalidState, PendingOperation, DEFAULT_DISPLAY_WIDTH,
    ERROR_TOKEN,
};
#[allow(unused_imports)]
pub use transition::{apply, transition, TransitionResult};
