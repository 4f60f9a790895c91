//! Pure state transition function

use super::format::format_number;
use super::{Effect, EngineContext, EngineState, Event, PendingOperation};

/// Result of a state transition
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    pub new_state: EngineState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: EngineState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    fn unchanged(state: &EngineState) -> Self {
        Self::new(state.clone())
    }
}

/// Pure transition function.
///
/// Given the same inputs it always produces the same outputs. Failures are
/// reported through the error display, never returned.
pub fn transition(state: &EngineState, context: &EngineContext, event: Event) -> TransitionResult {
    // Only Clear leaves the error state
    if state.is_error() && event != Event::Clear {
        return TransitionResult::unchanged(state);
    }

    match event {
        Event::Clear => TransitionResult::new(EngineState::new()),

        Event::Digit(digit) => {
            let mut next = state.clone();
            // A scientific result is not an entry to extend
            if next.awaiting_second_operand || next.display == "0" || next.display.contains('e') {
                next.display = digit.as_char().to_string();
                next.awaiting_second_operand = false;
            } else {
                next.display.push(digit.as_char());
                // Entry that would overflow f64 is ignored
                if next.value().is_none() {
                    return TransitionResult::unchanged(state);
                }
            }
            TransitionResult::new(next)
        }

        Event::DecimalPoint => {
            let mut next = state.clone();
            if next.awaiting_second_operand {
                next.display = "0.".to_string();
                next.awaiting_second_operand = false;
            } else if next.display.contains(['.', 'e']) {
                return TransitionResult::unchanged(state);
            } else {
                next.display.push('.');
            }
            TransitionResult::new(next)
        }

        Event::Operator(operator) => {
            // Re-pressing an operator before a second operand just replaces it
            let mut result = match state.pending {
                Some(pending) if !state.awaiting_second_operand => {
                    resolve(state, context, pending)
                }
                _ => TransitionResult::unchanged(state),
            };

            let next = &mut result.new_state;
            if let Some(operand) = next.value() {
                next.pending = Some(PendingOperation { operand, operator });
                next.awaiting_second_operand = true;
            }
            result
        }

        Event::Equals => match state.pending {
            Some(pending) => resolve(state, context, pending),
            None => TransitionResult::unchanged(state),
        },

        Event::ToggleSign => {
            if state.display == "0" {
                return TransitionResult::unchanged(state);
            }
            reformat(state, context, |v| -v)
        }

        Event::Percent => reformat(state, context, |v| v / 100.0),
    }
}

/// Convenience wrapper using the default context and dropping effects
#[allow(dead_code)] // The server drives `transition` to see effects
pub fn apply(state: &EngineState, event: Event) -> EngineState {
    transition(state, &EngineContext::default(), event).new_state
}

/// Compute `pending.operand OP display` and show the result.
///
/// Leaves no pending operation behind; the caller may set a new one.
fn resolve(state: &EngineState, context: &EngineContext, pending: PendingOperation) -> TransitionResult {
    let Some(rhs) = state.value() else {
        return TransitionResult::new(EngineState::error());
    };

    match pending.operator.apply(pending.operand, rhs) {
        Ok(result) => {
            let next = EngineState {
                display: format_number(result, context.display_width),
                pending: None,
                awaiting_second_operand: false,
            };
            TransitionResult::new(next).with_effect(Effect::record(
                pending.operator,
                pending.operand,
                rhs,
                result,
            ))
        }
        Err(_) => TransitionResult::new(EngineState::error()),
    }
}

fn reformat(state: &EngineState, context: &EngineContext, f: impl Fn(f64) -> f64) -> TransitionResult {
    let Some(value) = state.value() else {
        return TransitionResult::unchanged(state);
    };
    let mut next = state.clone();
    next.display = format_number(f(value), context.display_width);
    // The transformed value is the operand now being entered
    next.awaiting_second_operand = false;
    TransitionResult::new(next)
}
