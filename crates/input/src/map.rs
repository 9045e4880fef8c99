//! Key mapping from terminal events to game commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key press to a command
///
/// Key releases and repeats reported by enhanced terminals are ignored.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(Command::MoveRight),

        KeyCode::Up
        | KeyCode::Char('r')
        | KeyCode::Char('R')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => Some(Command::Rotate),

        KeyCode::Down
        | KeyCode::Char(' ')
        | KeyCode::Char('d')
        | KeyCode::Char('D')
        | KeyCode::Char('j')
        | KeyCode::Char('J') => Some(Command::Drop),

        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(Command::ToggleGravity),

        _ => None,
    }
}

/// Check if key should end the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(Command::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(Command::MoveRight)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('h'))),
            Some(Command::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('L'))),
            Some(Command::MoveRight)
        );
    }

    #[test]
    fn test_rotate_and_drop_keys() {
        for code in [KeyCode::Up, KeyCode::Char('r'), KeyCode::Char('k')] {
            assert_eq!(handle_key_event(KeyEvent::from(code)), Some(Command::Rotate));
        }
        for code in [
            KeyCode::Down,
            KeyCode::Char(' '),
            KeyCode::Char('d'),
            KeyCode::Char('j'),
        ] {
            assert_eq!(handle_key_event(KeyEvent::from(code)), Some(Command::Drop));
        }
    }

    #[test]
    fn test_state_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(Command::Pause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('g'))),
            Some(Command::ToggleGravity)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Esc)), None);
    }

    #[test]
    fn test_unlisted_letters_unmapped() {
        for c in ['a', 'A', 'w', 'W', 's', 'S'] {
            assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char(c))), None);
        }
    }

    #[test]
    fn test_release_events_ignored() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
