use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::components::Direction;

/// One key press, already stripped of terminal event noise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Escape,
    /// Ctrl-C. Raw mode swallows the signal, so it arrives as a key.
    Interrupt,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Menu,
    Quit,
}

impl Key {
    /// In-game meaning of a key. Keys with no meaning map to `None`.
    pub fn action(self) -> Option<Action> {
        match self {
            Key::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Action::Move(Direction::Up)),
                's' => Some(Action::Move(Direction::Down)),
                'a' => Some(Action::Move(Direction::Left)),
                'd' => Some(Action::Move(Direction::Right)),
                'm' => Some(Action::Menu),
                _ => None,
            },
            Key::Escape | Key::Interrupt => Some(Action::Quit),
            Key::Enter | Key::Backspace => None,
        }
    }
}

/// Blocking source of single key presses.
pub trait KeyInput {
    fn read_key(&mut self) -> io::Result<Key>;
}

/// Reads keys from the raw-mode terminal. No echo, no line buffering.
#[derive(Default)]
pub struct TerminalInput;

impl KeyInput for TerminalInput {
    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let mapped = match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Key::Interrupt
                }
                KeyCode::Char(c) => Key::Char(c),
                KeyCode::Enter => Key::Enter,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Esc => Key::Escape,
                _ => continue,
            };
            return Ok(mapped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_is_case_insensitive() {
        assert_eq!(Key::Char('w').action(), Some(Action::Move(Direction::Up)));
        assert_eq!(Key::Char('W').action(), Some(Action::Move(Direction::Up)));
        assert_eq!(Key::Char('S').action(), Some(Action::Move(Direction::Down)));
        assert_eq!(Key::Char('a').action(), Some(Action::Move(Direction::Left)));
        assert_eq!(Key::Char('D').action(), Some(Action::Move(Direction::Right)));
        assert_eq!(Key::Char('M').action(), Some(Action::Menu));
    }

    #[test]
    fn other_keys_are_ignored() {
        for key in [Key::Char('x'), Key::Char('1'), Key::Enter, Key::Backspace] {
            assert_eq!(key.action(), None, "{key:?}");
        }
    }

    #[test]
    fn escape_and_interrupt_quit() {
        assert_eq!(Key::Escape.action(), Some(Action::Quit));
        assert_eq!(Key::Interrupt.action(), Some(Action::Quit));
    }
}
