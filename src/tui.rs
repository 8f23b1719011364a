//! Terminal front-end
//!
//! Maps key presses to engine events and renders the two-line display
//! plus a key legend. All calculator behavior lives in [`crate::engine`];
//! this module only translates input and draws whatever state the engine
//! hands back.

use crate::engine::{transition, CalcState, Event, Operator};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{DefaultTerminal, Frame};

/// Key legend rendered under the display, mirroring a desk calculator.
const KEY_ROWS: [&str; 5] = [
    "AC   ±   DEL  ÷",
    " 7   8    9   ×",
    " 4   5    6   -",
    " 1   2    3   +",
    " 0   .    =    ",
];

pub fn run() -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal) -> std::io::Result<()> {
    let mut state = CalcState::default();
    loop {
        terminal.draw(|frame| draw(frame, &state))?;

        let TermEvent::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_quit(&key) {
            tracing::info!("quit requested");
            return Ok(());
        }
        let Some(calc_event) = map_key(&key) else {
            continue;
        };
        let next = transition(&state, calc_event);
        if next.is_error() && !state.is_error() {
            tracing::warn!(event = ?calc_event, "computation failed");
        }
        state = next;
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q'))
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
}

/// Translate a terminal key into an engine event: digits, `.`, the four
/// operators (`x` works for multiply), Enter/`=` to evaluate, Backspace
/// to delete, Esc to clear, `n` to flip the sign.
fn map_key(key: &KeyEvent) -> Option<Event> {
    match key.code {
        KeyCode::Char(c @ '0'..='9') => Some(Event::Digit {
            digit: c as u8 - b'0',
        }),
        KeyCode::Char('.') => Some(Event::DecimalPoint),
        KeyCode::Char('n' | 'N') => Some(Event::ToggleSign),
        KeyCode::Backspace => Some(Event::DeleteLast),
        KeyCode::Esc => Some(Event::Clear),
        KeyCode::Enter | KeyCode::Char('=') => Some(Event::Evaluate),
        KeyCode::Char(c) => Operator::from_key(c).map(|operator| Event::ChooseOperator { operator }),
        _ => None,
    }
}

fn draw(frame: &mut Frame, state: &CalcState) {
    let [display_area, keys_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Min(KEY_ROWS.len() as u16 + 3)])
            .areas(frame.area());

    let pending = Line::from(state.display_pending()).style(Style::default().fg(Color::DarkGray));
    let current = Line::from(state.display_current().to_string())
        .style(Style::default().add_modifier(Modifier::BOLD));
    let display = Paragraph::new(vec![pending, current])
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL).title("tally"));
    frame.render_widget(display, display_area);

    let mut rows: Vec<Line> = KEY_ROWS.iter().map(|row| Line::from(*row)).collect();
    rows.push(Line::from(""));
    rows.push(
        Line::from("q quit · Esc clear · n sign · Backspace delete")
            .style(Style::default().fg(Color::DarkGray)),
    );
    let keys = Paragraph::new(rows)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(keys, keys_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digit_keys_map_to_digit_events() {
        for (c, digit) in ('0'..='9').zip(0u8..) {
            assert_eq!(
                map_key(&press(KeyCode::Char(c))),
                Some(Event::Digit { digit })
            );
        }
    }

    #[test]
    fn test_operator_keys_map_through_normalization() {
        assert_eq!(
            map_key(&press(KeyCode::Char('+'))),
            Some(Event::ChooseOperator {
                operator: Operator::Add
            })
        );
        assert_eq!(
            map_key(&press(KeyCode::Char('-'))),
            Some(Event::ChooseOperator {
                operator: Operator::Subtract
            })
        );
        for c in ['*', 'x', 'X'] {
            assert_eq!(
                map_key(&press(KeyCode::Char(c))),
                Some(Event::ChooseOperator {
                    operator: Operator::Multiply
                })
            );
        }
        assert_eq!(
            map_key(&press(KeyCode::Char('/'))),
            Some(Event::ChooseOperator {
                operator: Operator::Divide
            })
        );
    }

    #[test]
    fn test_control_keys_map_to_engine_events() {
        assert_eq!(map_key(&press(KeyCode::Char('.'))), Some(Event::DecimalPoint));
        assert_eq!(map_key(&press(KeyCode::Char('n'))), Some(Event::ToggleSign));
        assert_eq!(map_key(&press(KeyCode::Char('N'))), Some(Event::ToggleSign));
        assert_eq!(map_key(&press(KeyCode::Backspace)), Some(Event::DeleteLast));
        assert_eq!(map_key(&press(KeyCode::Esc)), Some(Event::Clear));
        assert_eq!(map_key(&press(KeyCode::Enter)), Some(Event::Evaluate));
        assert_eq!(map_key(&press(KeyCode::Char('='))), Some(Event::Evaluate));
    }

    #[test]
    fn test_unmapped_keys_are_dropped() {
        assert_eq!(map_key(&press(KeyCode::Char('a'))), None);
        assert_eq!(map_key(&press(KeyCode::Tab)), None);
        assert_eq!(map_key(&press(KeyCode::F(1))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&press(KeyCode::Char('q'))));
        assert!(is_quit(&press(KeyCode::Char('Q'))));
        assert!(is_quit(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit(&press(KeyCode::Char('c'))));
    }
}
