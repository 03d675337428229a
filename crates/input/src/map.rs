//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction, Shape};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Release events are ignored so terminals that report them do not double-fire.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        // Movement. Down follows gravity.
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GameAction::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GameAction::Move(Direction::Right))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GameAction::Move(Direction::Fall))
        }
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GameAction::Move(Direction::Rise))
        }

        // Orientation
        KeyCode::Char(' ') => Some(GameAction::RotateInPlane),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(GameAction::RotateFlip),

        // Shape selection
        KeyCode::Char('i') | KeyCode::Char('I') => Some(GameAction::SelectShape(Shape::Long)),
        KeyCode::Char('t') | KeyCode::Char('T') => Some(GameAction::SelectShape(Shape::T)),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(GameAction::SelectShape(Shape::L)),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(GameAction::SelectShape(Shape::Z)),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
