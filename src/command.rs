use crate::game::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    /// Ctrl-C
    Quit,
    Up,
    Down,
    Left,
    Right,
    /// Enter or space: start a game, or dismiss a pop-up
    Confirm,
    Restart,
    /// `q` or Esc
    Q,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
            return Some(Command::Quit);
        }
        if !(KeyModifiers::NONE | KeyModifiers::SHIFT).contains(ev.modifiers) {
            return None;
        }
        match ev.code {
            KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Command::Up),
            KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Command::Down),
            KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Command::Left),
            KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Command::Right),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Confirm),
            KeyCode::Char('r' | 'R') => Some(Command::Restart),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Command::Q),
            _ => None,
        }
    }

    /// If this is a movement command, return the direction it moves in
    pub(crate) fn direction(self) -> Option<Direction> {
        match self {
            Command::Up => Some(Direction::Up),
            Command::Down => Some(Direction::Down),
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            _ => None,
        }
    }
}
