//! Input events fed to the calculator

use super::state::Operator;
use serde::{Deserialize, Serialize};

/// Normalized input events that trigger state transitions.
///
/// Callers (the keyboard handler, the replay stream) map raw input to one
/// of these before calling [`transition`](super::transition); the engine
/// never sees a key code or a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A digit key, 0-9.
    Digit { digit: u8 },
    /// The decimal point key.
    DecimalPoint,
    /// Flip the sign of the current entry.
    ToggleSign,
    /// Drop the last typed character.
    DeleteLast,
    /// Reset everything to the default state.
    Clear,
    /// Select the operator applied to the next computation.
    ChooseOperator { operator: Operator },
    /// The "=" key.
    Evaluate,
}
