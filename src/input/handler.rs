use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::Direction;

/// What a single key press means to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Request a new heading for the next turn
    Turn(Direction),
    Quit,
    None,
}

/// Maps terminal key events onto game requests
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Releases and repeats would double up requests on some terminals
        if key.kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = Self::direction_for(key.code) {
            return KeyAction::Turn(direction);
        }

        match key.code {
            KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'q') => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    /// Arrow keys and WASD, case-insensitive
    fn direction_for(code: KeyCode) -> Option<Direction> {
        match code {
            KeyCode::Up => Some(Direction::Up),
            KeyCode::Down => Some(Direction::Down),
            KeyCode::Left => Some(Direction::Left),
            KeyCode::Right => Some(Direction::Right),
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Direction::Up),
                's' => Some(Direction::Down),
                'a' => Some(Direction::Left),
                'd' => Some(Direction::Right),
                _ => None,
            },
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
