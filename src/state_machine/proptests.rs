//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::arithmetic::Operation;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_digit() -> impl Strategy<Value = Digit> {
    (0u8..=9).prop_filter_map("digit", Digit::new)
}

fn arb_operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Add),
        Just(Operation::Subtract),
        Just(Operation::Multiply),
        Just(Operation::Divide),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        4 => arb_digit().prop_map(Event::Digit),
        1 => Just(Event::DecimalPoint),
        2 => arb_operation().prop_map(Event::Operator),
        1 => Just(Event::Equals),
        1 => Just(Event::Clear),
        1 => Just(Event::ToggleSign),
        1 => Just(Event::Percent),
    ]
}

fn arb_non_clear_event() -> impl Strategy<Value = Event> {
    arb_event().prop_filter("not clear", |e| *e != Event::Clear)
}

fn run(events: &[Event]) -> EngineState {
    let ctx = EngineContext::default();
    events
        .iter()
        .fold(EngineState::new(), |state, event| {
            transition(&state, &ctx, *event).new_state
        })
}

fn error_state() -> EngineState {
    let ctx = EngineContext::default();
    [
        Event::digit(1),
        Some(Event::Operator(Operation::Divide)),
        Event::digit(0),
        Some(Event::Equals),
    ]
    .into_iter()
    .flatten()
    .fold(EngineState::new(), |state, event| {
        transition(&state, &ctx, event).new_state
    })
}

// ============================================================================
// Invariant Checks
// ============================================================================

fn is_valid_state(state: &EngineState) -> bool {
    state.validate().is_ok()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Invariant 1: Valid state after any transition
    #[test]
    fn prop_transitions_preserve_validity(events in proptest::collection::vec(arb_event(), 0..40)) {
        let ctx = EngineContext::default();
        let mut state = EngineState::new();

        for event in events {
            state = transition(&state, &ctx, event).new_state;
            prop_assert!(is_valid_state(&state), "Invalid state after {:?}: {:?}", event, state);
        }
    }

    // Invariant 2: Clear always returns to the initial state
    #[test]
    fn prop_clear_resets(events in proptest::collection::vec(arb_event(), 0..30)) {
        let state = run(&events);
        let cleared = apply(&state, Event::Clear);
        prop_assert_eq!(&cleared, &EngineState::new());
        prop_assert_eq!(apply(&cleared, Event::Clear), EngineState::new());
    }

    // Invariant 3: Error state absorbs everything except Clear
    #[test]
    fn prop_error_state_is_sticky(events in proptest::collection::vec(arb_non_clear_event(), 1..20)) {
        let error = error_state();
        prop_assert!(error.is_error());
        let after = events.iter().fold(error.clone(), |state, event| apply(&state, *event));
        prop_assert_eq!(after, error);
    }

    // Invariant 4: Pure digit entry is concatenation with leading zeros collapsed
    #[test]
    fn prop_digit_entry_concatenates(digits in proptest::collection::vec(arb_digit(), 1..15)) {
        let events: Vec<Event> = digits.iter().copied().map(Event::Digit).collect();
        let state = run(&events);

        let typed: String = digits.iter().map(|d| d.as_char()).collect();
        let trimmed = typed.trim_start_matches('0');
        let expected = if trimmed.is_empty() { "0" } else { trimmed };
        prop_assert_eq!(state.display(), expected);
    }

    // Invariant 5: Transitions are deterministic
    #[test]
    fn prop_transition_is_deterministic(
        events in proptest::collection::vec(arb_event(), 0..30),
        next in arb_event(),
    ) {
        let state = run(&events);
        let ctx = EngineContext::default();
        prop_assert_eq!(transition(&state, &ctx, next), transition(&state, &ctx, next));
    }

    // Invariant 6: Operator never changes the display unless it resolves a chain
    #[test]
    fn prop_operator_keeps_display_when_awaiting(
        events in proptest::collection::vec(arb_event(), 0..30),
        first in arb_operation(),
        second in arb_operation(),
    ) {
        let state = apply(&run(&events), Event::Operator(first));
        prop_assume!(!state.is_error());
        let again = apply(&state, Event::Operator(second));
        prop_assert_eq!(again.display(), state.display());
        prop_assert_eq!(again.pending.map(|p| p.operator), Some(second));
    }

    // Invariant 7: Formatted results fit the display budget
    #[test]
    fn prop_results_fit_width(
        events in proptest::collection::vec(arb_event(), 0..30),
        width in 8usize..16,
    ) {
        let ctx = EngineContext::new(width);
        let mut state = EngineState::new();
        for event in events {
            let result = transition(&state, &ctx, event);
            let resolved = !result.effects.is_empty();
            state = result.new_state;
            if resolved {
                prop_assert!(state.display().len() <= width, "{} exceeds {}", state.display(), width);
            }
        }
    }

    // Invariant 8: Every recorded effect matches the operator table
    #[test]
    fn prop_effects_match_arithmetic(events in proptest::collection::vec(arb_event(), 0..40)) {
        let ctx = EngineContext::default();
        let mut state = EngineState::new();
        for event in events {
            let result = transition(&state, &ctx, event);
            for effect in &result.effects {
                let Effect::RecordCalculation { operation, operands, result: value } = *effect;
                prop_assert_eq!(operation.apply(operands[0], operands[1]), Ok(value));
            }
            state = result.new_state;
        }
    }

    // Invariant 9: While awaiting, the display is the committed first operand
    #[test]
    fn prop_awaiting_shows_pending_operand(events in proptest::collection::vec(arb_event(), 0..40)) {
        let ctx = EngineContext::default();
        let mut state = EngineState::new();
        for event in events {
            state = transition(&state, &ctx, event).new_state;
            if state.awaiting_second_operand {
                let operand = state.pending.map(|p| p.operand.to_bits());
                prop_assert!(operand.is_some(), "Awaiting without pending after {:?}", event);
                prop_assert_eq!(operand, state.value().map(f64::to_bits), "after {:?}: {:?}", event, state);
            }
        }
    }

    // Invariant 10: Formatting output always parses back
    #[test]
    fn prop_format_parses(value in proptest::num::f64::NORMAL, width in 8usize..20) {
        let s = format_number(value, width);
        prop_assert!(s.len() <= width);
        prop_assert!(s.parse::<f64>().is_ok());
    }
}
