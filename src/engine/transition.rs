//! Pure state transition function

use super::event::Event;
use super::state::{format_for_display, CalcState, Operator, ERROR_ENTRY, MAX_ENTRY_LEN};
use thiserror::Error;

/// Failure raised inside [`compute`]. Division by zero is the only error
/// the calculator knows; everything else malformed is a silent no-op at
/// the transition layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComputeError {
    #[error("division by zero")]
    DivisionByZero,
}

/// Pure transition function
///
/// Given the current state and one event, produce the next state. This
/// function is pure - given the same inputs, it always produces the same
/// outputs, with no I/O side effects. Every event is total: inputs that
/// make no sense in the current state return the state unchanged instead
/// of failing.
pub fn transition(state: &CalcState, event: Event) -> CalcState {
    // Once the entry shows the error sentinel, only Clear does anything.
    if state.is_error() && event != Event::Clear {
        return state.clone();
    }

    match event {
        Event::Digit { digit } => append_digit(state, digit),
        Event::DecimalPoint => append_decimal_point(state),
        Event::ToggleSign => toggle_sign(state),
        Event::DeleteLast => delete_last(state),
        Event::Clear => CalcState::default(),
        Event::ChooseOperator { operator } => choose_operator(state, operator),
        Event::Evaluate => evaluate(state),
    }
}

/// The arithmetic core. Callers only ever pass one of the four operators.
pub fn compute(a: f64, b: f64, op: Operator) -> Result<f64, ComputeError> {
    match op {
        Operator::Add => Ok(a + b),
        Operator::Subtract => Ok(a - b),
        Operator::Multiply => Ok(a * b),
        Operator::Divide => {
            if b == 0.0 {
                Err(ComputeError::DivisionByZero)
            } else {
                Ok(a / b)
            }
        }
    }
}

// ============================================================
// Entry Editing
// ============================================================

fn append_digit(state: &CalcState, digit: u8) -> CalcState {
    // Callers only pass 0-9; anything else is dropped like an unmapped key.
    if digit > 9 {
        return state.clone();
    }
    let digit = char::from(b'0' + digit);

    let mut next = state.clone();
    if state.overwrite {
        next.entry = digit.to_string();
        next.overwrite = false;
        return next;
    }
    if state.entry.len() >= MAX_ENTRY_LEN {
        // Silent cap, not an error.
        return next;
    }
    if state.entry == "0" {
        // Replace the leading zero instead of producing "07".
        next.entry = digit.to_string();
    } else {
        next.entry.push(digit);
    }
    next
}

fn append_decimal_point(state: &CalcState) -> CalcState {
    let mut next = state.clone();
    if state.overwrite {
        next.entry = "0.".to_string();
        next.overwrite = false;
        return next;
    }
    if state.entry.contains('.') || state.entry.len() >= MAX_ENTRY_LEN {
        return next;
    }
    next.entry.push('.');
    next
}

fn toggle_sign(state: &CalcState) -> CalcState {
    if state.entry == "0" {
        return state.clone();
    }
    let mut next = state.clone();
    next.entry = match state.entry.strip_prefix('-') {
        Some(stripped) => stripped.to_string(),
        None => format!("-{}", state.entry),
    };
    next
}

fn delete_last(state: &CalcState) -> CalcState {
    // Right after a result, an operator choice, or a clear there is
    // nothing to delete.
    if state.overwrite {
        return state.clone();
    }
    let mut next = state.clone();
    if state.entry.len() <= 1 || (state.entry.len() == 2 && state.entry.starts_with('-')) {
        next.entry = "0".to_string();
        next.overwrite = true;
    } else {
        next.entry.pop();
    }
    next
}

// ============================================================
// Operator Choice and Evaluation
// ============================================================

fn choose_operator(state: &CalcState, operator: Operator) -> CalcState {
    let mut next = state.clone();
    match (state.pending, state.operator) {
        (None, _) => {
            next.pending = Some(state.entry_value());
        }
        (Some(pending), Some(current_op)) if !state.overwrite => {
            // A fresh right operand has been typed: fold it in before
            // switching to the new operator.
            match compute(pending, state.entry_value(), current_op) {
                Ok(value) => {
                    next.pending = Some(value);
                    next.entry = format_for_display(value);
                }
                Err(ComputeError::DivisionByZero) => return error_state(),
            }
        }
        // No new operand since the last choice: substitute the operator
        // in place, leaving pending and entry untouched.
        _ => {}
    }
    next.operator = Some(operator);
    next.overwrite = true;
    next
}

fn evaluate(state: &CalcState) -> CalcState {
    let (Some(pending), Some(operator)) = (state.pending, state.operator) else {
        return state.clone();
    };
    match compute(pending, state.entry_value(), operator) {
        Ok(value) => {
            let mut next = state.clone();
            next.entry = format_for_display(value);
            next.pending = None;
            next.operator = None;
            next.overwrite = true;
            next
        }
        Err(ComputeError::DivisionByZero) => error_state(),
    }
}

/// Shared landing state for a failed computation. Recovery is only via
/// Clear.
fn error_state() -> CalcState {
    CalcState {
        entry: ERROR_ENTRY.to_string(),
        pending: None,
        operator: None,
        overwrite: true,
    }
}
