//! Property-based tests for the calculator state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_operator() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Subtract),
        Just(Operator::Multiply),
        Just(Operator::Divide),
    ]
}

fn arb_digit_event() -> impl Strategy<Value = Event> {
    (0u8..10).prop_map(|digit| Event::Digit { digit })
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_digit_event(),
        Just(Event::DecimalPoint),
        Just(Event::ToggleSign),
        Just(Event::DeleteLast),
        Just(Event::Clear),
        arb_operator().prop_map(|operator| Event::ChooseOperator { operator }),
        Just(Event::Evaluate),
    ]
}

/// Events that are never `Clear`, for probing the error state's self-loops.
fn arb_non_clear_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_digit_event(),
        Just(Event::DecimalPoint),
        Just(Event::ToggleSign),
        Just(Event::DeleteLast),
        arb_operator().prop_map(|operator| Event::ChooseOperator { operator }),
        Just(Event::Evaluate),
    ]
}

/// A digit string that the entry rules echo verbatim: nonzero lead digit,
/// up to `1 + max_extra` characters.
fn arb_digits(max_extra: usize) -> impl Strategy<Value = String> {
    ("[1-9]", proptest::collection::vec(0u8..10, 0..=max_extra)).prop_map(|(lead, rest)| {
        let mut text = lead;
        for d in rest {
            text.push(char::from(b'0' + d));
        }
        text
    })
}

/// Entry-sized digit strings, up to the 16-char cap.
fn arb_typed_digits() -> impl Strategy<Value = String> {
    arb_digits(MAX_ENTRY_LEN - 1)
}

fn type_digits(state: &CalcState, digits: &str) -> CalcState {
    digits.chars().fold(state.clone(), |state, c| {
        transition(
            &state,
            Event::Digit {
                digit: c as u8 - b'0',
            },
        )
    })
}

fn error_state() -> CalcState {
    let mut state = type_digits(&CalcState::default(), "1");
    state = transition(
        &state,
        Event::ChooseOperator {
            operator: Operator::Divide,
        },
    );
    state = transition(&state, Event::Digit { digit: 0 });
    transition(&state, Event::Evaluate)
}

// ============================================================================
// State Validity Checkers
// ============================================================================

/// The entry line is the sentinel or a syntactically valid partial number:
/// optional sign, digits with at most one dot, no surplus leading zero,
/// and at most 16 characters past the sign.
fn is_valid_entry(entry: &str) -> bool {
    if entry == ERROR_ENTRY {
        return true;
    }
    let digits = entry.strip_prefix('-').unwrap_or(entry);
    if digits.is_empty() || digits.len() > MAX_ENTRY_LEN {
        return false;
    }
    if digits.chars().any(|c| !c.is_ascii_digit() && c != '.') {
        return false;
    }
    if digits.matches('.').count() > 1 {
        return false;
    }
    // "0" and "0.xxx" are fine; "07" is not. A signed zero deleted down
    // from "-0." can pick up trailing digits ("-07"), so the rule only
    // binds unsigned entries.
    if entry == digits && digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.") {
        return false;
    }
    !digits.starts_with('.')
}

fn is_valid_state(state: &CalcState) -> bool {
    if !is_valid_entry(&state.entry) {
        return false;
    }
    // Operator and pending are set and cleared together.
    if state.operator.is_some() != state.pending.is_some() {
        return false;
    }
    // The error state always arrives with a blank pending side.
    if state.is_error() && (state.pending.is_some() || !state.overwrite) {
        return false;
    }
    true
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Invariant 1: Valid state after any event sequence
    #[test]
    fn prop_transitions_preserve_validity(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = CalcState::default();
        for event in events {
            state = transition(&state, event);
            prop_assert!(is_valid_state(&state), "Invalid state: {:?}", state);
        }
    }

    // Invariant 2: Typed digit sequences echo verbatim on the display
    #[test]
    fn prop_typed_digits_echo(digits in arb_typed_digits()) {
        let state = type_digits(&CalcState::default(), &digits);
        prop_assert_eq!(state.display_current(), digits.as_str());
        prop_assert!(!state.overwrite);
    }

    // Invariant 3: The 17th digit is a silent no-op
    #[test]
    fn prop_seventeenth_digit_is_noop(digits in arb_typed_digits(), extra in 0u8..10) {
        let mut state = type_digits(&CalcState::default(), &digits);
        while state.entry.len() < MAX_ENTRY_LEN {
            state = transition(&state, Event::Digit { digit: 1 });
        }
        let after = transition(&state, Event::Digit { digit: extra });
        prop_assert_eq!(after, state);
    }

    // Invariant 4: Operator substitution leaves pending and entry alone
    #[test]
    fn prop_operator_substitution(
        digits in arb_typed_digits(),
        first in arb_operator(),
        second in arb_operator()
    ) {
        let typed = type_digits(&CalcState::default(), &digits);
        let chosen = transition(&typed, Event::ChooseOperator { operator: first });
        let swapped = transition(&chosen, Event::ChooseOperator { operator: second });
        prop_assert_eq!(swapped.operator, Some(second));
        prop_assert_eq!(swapped.pending, chosen.pending);
        prop_assert_eq!(&swapped.entry, &chosen.entry);
        prop_assert!(swapped.overwrite);
    }

    // Invariant 5: The error state absorbs every event except Clear
    #[test]
    fn prop_error_absorbs_non_clear_events(events in proptest::collection::vec(arb_non_clear_event(), 1..20)) {
        let error = error_state();
        prop_assert!(error.is_error());
        let mut state = error.clone();
        for event in events {
            state = transition(&state, event);
            prop_assert_eq!(&state, &error);
        }
        prop_assert_eq!(transition(&state, Event::Clear), CalcState::default());
    }

    // Invariant 6: Clear is idempotent from any reachable state
    #[test]
    fn prop_clear_idempotent(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut state = CalcState::default();
        for event in events {
            state = transition(&state, event);
        }
        let once = transition(&state, Event::Clear);
        let twice = transition(&once, Event::Clear);
        prop_assert_eq!(&once, &CalcState::default());
        prop_assert_eq!(once, twice);
    }

    // Invariant 7: Toggle sign round-trips on any non-zero entry
    #[test]
    fn prop_toggle_sign_round_trips(digits in arb_typed_digits()) {
        let state = type_digits(&CalcState::default(), &digits);
        let twice = transition(&transition(&state, Event::ToggleSign), Event::ToggleSign);
        prop_assert_eq!(twice, state);
    }

    // Invariant 8: Delete-last after a result or clear is a no-op
    #[test]
    fn prop_delete_last_noop_while_overwrite(digits in arb_typed_digits(), op in arb_operator()) {
        // overwrite via a fresh operator choice
        let typed = type_digits(&CalcState::default(), &digits);
        let chosen = transition(&typed, Event::ChooseOperator { operator: op });
        prop_assert!(chosen.overwrite);
        prop_assert_eq!(transition(&chosen, Event::DeleteLast), chosen);
        // and via the initial state
        let initial = CalcState::default();
        prop_assert_eq!(transition(&initial, Event::DeleteLast), initial);
    }

    // Invariant 9: Delete-last undoes the digit it follows
    #[test]
    fn prop_delete_last_undoes_typing(digits in arb_typed_digits(), extra in 0u8..10) {
        let state = type_digits(&CalcState::default(), &digits);
        prop_assume!(state.entry.len() < MAX_ENTRY_LEN);
        let typed = transition(&state, Event::Digit { digit: extra });
        prop_assert_eq!(transition(&typed, Event::DeleteLast), state);
    }

    // Invariant 10: Add then subtract the same operand returns to the start
    // (operands stay small enough for exact integer arithmetic)
    #[test]
    fn prop_add_then_subtract_cancels(a in arb_digits(7), b in arb_digits(7)) {
        let mut state = type_digits(&CalcState::default(), &a);
        state = transition(&state, Event::ChooseOperator { operator: Operator::Add });
        state = type_digits(&state, &b);
        state = transition(&state, Event::ChooseOperator { operator: Operator::Subtract });
        state = type_digits(&state, &b);
        state = transition(&state, Event::Evaluate);
        prop_assert_eq!(state.display_current(), a.as_str());
    }

    // Invariant 11: Division by a non-zero right operand never errors
    #[test]
    fn prop_divide_nonzero_never_errors(a in arb_typed_digits(), b in arb_typed_digits()) {
        let mut state = type_digits(&CalcState::default(), &a);
        state = transition(&state, Event::ChooseOperator { operator: Operator::Divide });
        state = type_digits(&state, &b);
        state = transition(&state, Event::Evaluate);
        prop_assert!(!state.is_error());
        prop_assert_eq!(state.pending, None);
        prop_assert_eq!(state.operator, None);
    }
}

// ============================================================================
// Sequence Tests - Multi-Step Scenarios
// ============================================================================

/// End-to-end: 12 + 8 = shows 20 with a clean slate.
#[test]
fn test_twelve_plus_eight() {
    let mut state = CalcState::default();
    state = transition(&state, Event::Digit { digit: 1 });
    state = transition(&state, Event::Digit { digit: 2 });
    state = transition(
        &state,
        Event::ChooseOperator {
            operator: Operator::Add,
        },
    );
    assert_eq!(state.display_pending(), "12 +");
    state = transition(&state, Event::Digit { digit: 8 });
    state = transition(&state, Event::Evaluate);
    assert_eq!(state.display_current(), "20");
    assert_eq!(state.display_pending(), "");
    assert_eq!(state.pending, None);
    assert_eq!(state.operator, None);
    assert!(state.overwrite);
}

/// Chained evaluation is left-to-right, no precedence: 6 + 3 * 2 = 18.
#[test]
fn test_chained_evaluation_has_no_precedence() {
    let mut state = CalcState::default();
    state = transition(&state, Event::Digit { digit: 6 });
    state = transition(
        &state,
        Event::ChooseOperator {
            operator: Operator::Add,
        },
    );
    state = transition(&state, Event::Digit { digit: 3 });
    state = transition(
        &state,
        Event::ChooseOperator {
            operator: Operator::Multiply,
        },
    );
    assert_eq!(state.display_pending(), "9 ×");
    state = transition(&state, Event::Digit { digit: 2 });
    state = transition(&state, Event::Evaluate);
    assert_eq!(state.display_current(), "18");
}

/// 1 / 0 = errors; recovery is exactly one Clear away.
#[test]
fn test_division_by_zero_and_recovery() {
    let mut state = CalcState::default();
    state = transition(&state, Event::Digit { digit: 1 });
    state = transition(
        &state,
        Event::ChooseOperator {
            operator: Operator::Divide,
        },
    );
    state = transition(&state, Event::Digit { digit: 0 });
    state = transition(&state, Event::Evaluate);
    assert_eq!(state.display_current(), "Error");
    assert_eq!(state.display_pending(), "");

    state = transition(&state, Event::Clear);
    assert_eq!(state, CalcState::default());
}

/// Typing a decimal entry, negating it, and halving it.
#[test]
fn test_decimal_and_sign_workflow() {
    let mut state = CalcState::default();
    state = transition(&state, Event::Digit { digit: 2 });
    state = transition(&state, Event::DecimalPoint);
    state = transition(&state, Event::Digit { digit: 5 });
    assert_eq!(state.display_current(), "2.5");
    state = transition(&state, Event::ToggleSign);
    assert_eq!(state.display_current(), "-2.5");
    state = transition(
        &state,
        Event::ChooseOperator {
            operator: Operator::Divide,
        },
    );
    assert_eq!(state.display_pending(), "-2.5 ÷");
    state = transition(&state, Event::Digit { digit: 2 });
    state = transition(&state, Event::Evaluate);
    assert_eq!(state.display_current(), "-1.25");
}

/// Evaluate with a stale entry: 5 + = uses the untouched entry as the
/// right operand, matching the fold rules.
#[test]
fn test_evaluate_right_after_operator_choice() {
    let mut state = CalcState::default();
    state = transition(&state, Event::Digit { digit: 5 });
    state = transition(
        &state,
        Event::ChooseOperator {
            operator: Operator::Add,
        },
    );
    // No new digits; entry still reads "5".
    state = transition(&state, Event::Evaluate);
    assert_eq!(state.display_current(), "10");
}
