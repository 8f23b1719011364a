//! Line-oriented wire format for driving the calculator from scripts
//!
//! Each input line is one JSON-encoded [`Event`]; after every event the
//! resulting display snapshot is echoed back as one JSON line. Exposed as
//! the `replay` subcommand so sequences can be piped in for debugging:
//!
//! ```text
//! $ tally replay <<'EOF'
//! {"type": "digit", "digit": 7}
//! {"type": "choose_operator", "operator": "multiply"}
//! {"type": "digit", "digit": 6}
//! {"type": "evaluate"}
//! EOF
//! ```

use crate::engine::{transition, CalcState, Event};
use serde::Serialize;
use std::io::{BufRead, Write};
use thiserror::Error;

/// Observable display state after an event, the read half of the
/// engine's boundary.
#[derive(Debug, Serialize)]
pub struct DisplaySnapshot {
    /// Rendered pending operand and operator glyph, empty when none.
    pub pending: String,
    /// The literal entry text, including the error sentinel.
    pub current: String,
}

impl DisplaySnapshot {
    pub fn of(state: &CalcState) -> Self {
        Self {
            pending: state.display_pending(),
            current: state.display_current().to_string(),
        }
    }
}

/// Errors from the replay runner
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("line {line}: {source}")]
    BadEvent {
        line: usize,
        source: serde_json::Error,
    },
    #[error("encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Apply newline-delimited JSON events from `input`, starting at the
/// default state, writing one [`DisplaySnapshot`] line per event to
/// `output`. Blank lines are skipped; the first malformed line aborts
/// the run. Returns the final state.
pub fn replay(input: impl BufRead, mut output: impl Write) -> Result<CalcState, ReplayError> {
    let mut state = CalcState::default();
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: Event = serde_json::from_str(&line).map_err(|source| ReplayError::BadEvent {
            line: index + 1,
            source,
        })?;
        state = transition(&state, event);
        tracing::debug!(?event, entry = %state.entry, "applied event");
        serde_json::to_writer(&mut output, &DisplaySnapshot::of(&state))?;
        output.write_all(b"\n")?;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Operator;

    fn run(script: &str) -> (CalcState, Vec<String>) {
        let mut output = Vec::new();
        let state = replay(script.as_bytes(), &mut output).expect("replay failed");
        let lines = String::from_utf8(output)
            .expect("snapshot output is utf-8")
            .lines()
            .map(str::to_string)
            .collect();
        (state, lines)
    }

    #[test]
    fn test_replay_twelve_plus_eight() {
        let script = r#"
{"type": "digit", "digit": 1}
{"type": "digit", "digit": 2}
{"type": "choose_operator", "operator": "add"}
{"type": "digit", "digit": 8}
{"type": "evaluate"}
"#;
        let (state, lines) = run(script);
        assert_eq!(state.display_current(), "20");
        assert_eq!(state.pending, None);
        assert_eq!(state.operator, None);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], r#"{"pending":"12 +","current":"12"}"#);
        assert_eq!(lines[4], r#"{"pending":"","current":"20"}"#);
    }

    #[test]
    fn test_replay_division_by_zero_shows_sentinel() {
        let script = r#"
{"type": "digit", "digit": 1}
{"type": "choose_operator", "operator": "divide"}
{"type": "digit", "digit": 0}
{"type": "evaluate"}
"#;
        let (state, lines) = run(script);
        assert!(state.is_error());
        assert_eq!(lines[3], r#"{"pending":"","current":"Error"}"#);
    }

    #[test]
    fn test_replay_skips_blank_lines() {
        let script = "\n\n{\"type\": \"digit\", \"digit\": 9}\n\n";
        let (state, lines) = run(script);
        assert_eq!(state.display_current(), "9");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_replay_reports_bad_line_number() {
        let script = "{\"type\": \"digit\", \"digit\": 3}\nnot json\n";
        let err = replay(script.as_bytes(), &mut Vec::new()).unwrap_err();
        match err {
            ReplayError::BadEvent { line, .. } => assert_eq!(line, 2),
            other => panic!("expected BadEvent, got {other:?}"),
        }
    }

    #[test]
    fn test_event_round_trips_through_json() {
        let events = [
            Event::Digit { digit: 4 },
            Event::DecimalPoint,
            Event::ToggleSign,
            Event::DeleteLast,
            Event::Clear,
            Event::ChooseOperator {
                operator: Operator::Divide,
            },
            Event::Evaluate,
        ];
        for event in events {
            let encoded = serde_json::to_string(&event).expect("encode");
            let decoded: Event = serde_json::from_str(&encoded).expect("decode");
            assert_eq!(decoded, event);
        }
    }
}
