use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Difficulty;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step `(dx, dy)` on the grid; `y` grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    SelectDifficulty(Difficulty),
    CycleDifficulty,
    Quit,
}

impl GameInput {
    /// Maps a key press onto a game command, if it is bound to one.
    #[must_use]
    pub fn from_key_event(key: KeyEvent) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Self::Quit),
            (_, KeyCode::Up | KeyCode::Char('w' | 'k')) => Some(Self::Direction(Direction::Up)),
            (_, KeyCode::Down | KeyCode::Char('s' | 'j')) => {
                Some(Self::Direction(Direction::Down))
            }
            (_, KeyCode::Left | KeyCode::Char('a' | 'h')) => {
                Some(Self::Direction(Direction::Left))
            }
            (_, KeyCode::Right | KeyCode::Char('d' | 'l')) => {
                Some(Self::Direction(Direction::Right))
            }
            (_, KeyCode::Enter | KeyCode::Char(' ' | 'r')) => Some(Self::Restart),
            (_, KeyCode::Char('1')) => Some(Self::SelectDifficulty(Difficulty::Easy)),
            (_, KeyCode::Char('2')) => Some(Self::SelectDifficulty(Difficulty::Normal)),
            (_, KeyCode::Char('3')) => Some(Self::SelectDifficulty(Difficulty::Hard)),
            (_, KeyCode::Tab) => Some(Self::CycleDifficulty),
            (_, KeyCode::Esc | KeyCode::Char('q')) => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Polls the terminal for bound key presses.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for the next bound key press.
    ///
    /// Unbound keys and non-key events are consumed and yield `None`.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(GameInput::from_key_event(key)),
            _ => Ok(None),
        }
    }
}
