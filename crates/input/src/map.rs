//! Key mapping from terminal events to steering and control commands.

use crate::types::{ControlAction, Direction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Steer(Direction),
    Control(ControlAction),
}

/// Map keyboard input to a command.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyCommand> {
    let steer = |d| Some(KeyCommand::Steer(d));
    let control = |c| Some(KeyCommand::Control(c));

    match key.code {
        // Steering (arrows, WASD, vim keys)
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Char('k') | KeyCode::Char('K') => {
            steer(Direction::Up)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
            steer(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            steer(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            steer(Direction::Right)
        }

        // Lifecycle
        KeyCode::Enter | KeyCode::Char(' ') => control(ControlAction::Start),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => control(ControlAction::TogglePause),
        KeyCode::Char('x') | KeyCode::Char('X') => control(ControlAction::Stop),

        // Settings
        KeyCode::Char('+') | KeyCode::Char('=') => control(ControlAction::Faster),
        KeyCode::Char('-') | KeyCode::Char('_') => control(ControlAction::Slower),
        KeyCode::Char('b') | KeyCode::Char('B') => control(ControlAction::ToggleBeep),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_steering_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(KeyCommand::Steer(Direction::Up))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(KeyCommand::Steer(Direction::Left))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('S'))),
            Some(KeyCommand::Steer(Direction::Down))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('l'))),
            Some(KeyCommand::Steer(Direction::Right))
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(KeyCommand::Control(ControlAction::Start))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(KeyCommand::Control(ControlAction::TogglePause))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('+'))),
            Some(KeyCommand::Control(ControlAction::Faster))
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
