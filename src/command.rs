use crate::game::{Direction, Input};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Start,
    Pause,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => Some(Command::Right),
            (_, KeyCode::Enter) => Some(Command::Start),
            (KeyModifiers::NONE, KeyCode::Char(' ' | 'p') | KeyCode::Esc) => Some(Command::Pause),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Quit),
            _ => None,
        }
    }

    /// The session input this command corresponds to, if any
    pub(crate) fn to_input(self) -> Option<Input> {
        match self {
            Command::Quit => None,
            Command::Up => Some(Input::Direction(Direction::Up)),
            Command::Down => Some(Input::Direction(Direction::Down)),
            Command::Left => Some(Input::Direction(Direction::Left)),
            Command::Right => Some(Input::Direction(Direction::Right)),
            Command::Start => Some(Input::ToggleStartRestart),
            Command::Pause => Some(Input::TogglePause),
        }
    }
}
