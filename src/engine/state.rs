//! Calculator state types

use serde::{Deserialize, Serialize};

/// Maximum number of characters the entry line will grow to while typing.
pub const MAX_ENTRY_LEN: usize = 16;

/// Sentinel entry text shown after a failed computation.
pub const ERROR_ENTRY: &str = "Error";

/// Binary operator awaiting its right operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Parse a raw operator key, accepting the display glyphs for
    /// multiply and divide alongside the ASCII symbols.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '+' => Some(Operator::Add),
            '-' | '\u{2212}' => Some(Operator::Subtract),
            '*' | '×' | 'x' | 'X' => Some(Operator::Multiply),
            '/' | '÷' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Glyph used when rendering the pending line.
    pub fn glyph(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }
}

/// Calculator state
///
/// One record, replaced wholesale on every event. `entry` is kept as text
/// so the display shows exactly the digits the user typed, including a
/// trailing decimal point.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcState {
    /// The value being typed or the last computed result.
    pub entry: String,
    /// Left operand held over from a previous operator choice.
    pub pending: Option<f64>,
    /// Operator awaiting its right operand.
    pub operator: Option<Operator>,
    /// The next digit starts a fresh entry instead of extending this one.
    pub overwrite: bool,
}

impl Default for CalcState {
    fn default() -> Self {
        Self {
            entry: "0".to_string(),
            pending: None,
            operator: None,
            overwrite: true,
        }
    }
}

impl CalcState {
    /// Check if the last computation failed. Only `Clear` leaves this
    /// state; every other event is absorbed.
    pub fn is_error(&self) -> bool {
        self.entry == ERROR_ENTRY
    }

    /// Numeric value of the entry line.
    ///
    /// The transition rules keep `entry` parseable whenever this is read
    /// (partial forms like `"0."` and `"-3."` parse under the f64
    /// grammar), so the zero fallback is never observed in practice.
    pub fn entry_value(&self) -> f64 {
        self.entry.parse().unwrap_or(0.0)
    }

    /// Text for the current-entry display line.
    pub fn display_current(&self) -> &str {
        &self.entry
    }

    /// Text for the pending-expression display line. Empty until an
    /// operator has been chosen.
    pub fn display_pending(&self) -> String {
        match (self.pending, self.operator) {
            (Some(pending), Some(op)) => {
                format!("{} {}", format_for_display(pending), op.glyph())
            }
            _ => String::new(),
        }
    }
}

/// Render a computed value for the entry line.
///
/// Plain decimal notation, clipped to [`MAX_ENTRY_LEN`] characters.
/// Clipping keeps the display bounded at the cost of dropping precision
/// from very long results.
pub fn format_for_display(value: f64) -> String {
    // -0 renders as 0
    let value = if value == 0.0 { 0.0 } else { value };
    let mut text = value.to_string();
    text.truncate(MAX_ENTRY_LEN);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = CalcState::default();
        assert_eq!(state.entry, "0");
        assert_eq!(state.pending, None);
        assert_eq!(state.operator, None);
        assert!(state.overwrite);
        assert!(!state.is_error());
    }

    #[test]
    fn test_operator_key_normalization() {
        assert_eq!(Operator::from_key('+'), Some(Operator::Add));
        assert_eq!(Operator::from_key('-'), Some(Operator::Subtract));
        assert_eq!(Operator::from_key('\u{2212}'), Some(Operator::Subtract));
        assert_eq!(Operator::from_key('*'), Some(Operator::Multiply));
        assert_eq!(Operator::from_key('x'), Some(Operator::Multiply));
        assert_eq!(Operator::from_key('X'), Some(Operator::Multiply));
        assert_eq!(Operator::from_key('×'), Some(Operator::Multiply));
        assert_eq!(Operator::from_key('/'), Some(Operator::Divide));
        assert_eq!(Operator::from_key('÷'), Some(Operator::Divide));
        assert_eq!(Operator::from_key('='), None);
        assert_eq!(Operator::from_key('7'), None);
    }

    #[test]
    fn test_display_pending_empty_without_operator() {
        assert_eq!(CalcState::default().display_pending(), "");
    }

    #[test]
    fn test_display_pending_renders_value_and_glyph() {
        let state = CalcState {
            entry: "0".to_string(),
            pending: Some(12.5),
            operator: Some(Operator::Multiply),
            overwrite: true,
        };
        assert_eq!(state.display_pending(), "12.5 ×");
    }

    #[test]
    fn test_entry_value_parses_partial_forms() {
        let mut state = CalcState::default();
        state.entry = "0.".to_string();
        assert_eq!(state.entry_value(), 0.0);
        state.entry = "-3.".to_string();
        assert_eq!(state.entry_value(), -3.0);
        state.entry = "12.75".to_string();
        assert_eq!(state.entry_value(), 12.75);
    }

    #[test]
    fn test_format_for_display_integers_have_no_fraction() {
        assert_eq!(format_for_display(18.0), "18");
        assert_eq!(format_for_display(-4.0), "-4");
        assert_eq!(format_for_display(0.5), "0.5");
    }

    #[test]
    fn test_format_for_display_negative_zero() {
        assert_eq!(format_for_display(-0.0), "0");
    }

    #[test]
    fn test_format_for_display_truncates_to_sixteen_chars() {
        // 0.1 + 0.2 in f64 prints as 0.30000000000000004 (19 chars)
        let text = format_for_display(0.1 + 0.2);
        assert_eq!(text, "0.30000000000000");
        assert_eq!(text.len(), MAX_ENTRY_LEN);
    }
}
