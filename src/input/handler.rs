use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Steering keys of one player; also menu navigation
    Steer(PlayerId, Direction),
    /// Enter: confirm the highlighted menu entry
    Confirm,
    /// Number key: pick a menu entry directly (0-based)
    Choose(usize),
    Pause,
    Restart,
    Menu,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Player one - Arrow keys
            KeyCode::Up => KeyAction::Steer(PlayerId::One, Direction::Up),
            KeyCode::Down => KeyAction::Steer(PlayerId::One, Direction::Down),
            KeyCode::Left => KeyAction::Steer(PlayerId::One, Direction::Left),
            KeyCode::Right => KeyAction::Steer(PlayerId::One, Direction::Right),

            // Player two - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Steer(PlayerId::Two, Direction::Up)
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Steer(PlayerId::Two, Direction::Down)
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Steer(PlayerId::Two, Direction::Left)
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Steer(PlayerId::Two, Direction::Right)
            }

            KeyCode::Enter => KeyAction::Confirm,
            KeyCode::Char(c @ '1'..='9') => KeyAction::Choose(c as usize - '1' as usize),

            // Controls
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => KeyAction::Pause,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            KeyCode::Char('m') | KeyCode::Char('M') => KeyAction::Menu,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys_steer_player_one() {
        assert_eq!(
            press(KeyCode::Up),
            KeyAction::Steer(PlayerId::One, Direction::Up)
        );
        assert_eq!(
            press(KeyCode::Down),
            KeyAction::Steer(PlayerId::One, Direction::Down)
        );
        assert_eq!(
            press(KeyCode::Left),
            KeyAction::Steer(PlayerId::One, Direction::Left)
        );
        assert_eq!(
            press(KeyCode::Right),
            KeyAction::Steer(PlayerId::One, Direction::Right)
        );
    }

    #[test]
    fn test_wasd_keys_steer_player_two() {
        assert_eq!(
            press(KeyCode::Char('w')),
            KeyAction::Steer(PlayerId::Two, Direction::Up)
        );
        assert_eq!(
            press(KeyCode::Char('a')),
            KeyAction::Steer(PlayerId::Two, Direction::Left)
        );
        assert_eq!(
            press(KeyCode::Char('s')),
            KeyAction::Steer(PlayerId::Two, Direction::Down)
        );
        assert_eq!(
            press(KeyCode::Char('d')),
            KeyAction::Steer(PlayerId::Two, Direction::Right)
        );
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::Steer(PlayerId::Two, Direction::Up)
        );
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(press(KeyCode::Enter), KeyAction::Confirm);
        assert_eq!(press(KeyCode::Char('1')), KeyAction::Choose(0));
        assert_eq!(press(KeyCode::Char('3')), KeyAction::Choose(2));
        assert_eq!(press(KeyCode::Char('m')), KeyAction::Menu);
    }

    #[test]
    fn test_pause_keys() {
        assert_eq!(press(KeyCode::Char('p')), KeyAction::Pause);
        assert_eq!(press(KeyCode::Char('P')), KeyAction::Pause);
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::Pause);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('Q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);
    }

    #[test]
    fn test_restart_key() {
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('R')), KeyAction::Restart);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(KeyCode::Char('0')), KeyAction::None);
        assert_eq!(press(KeyCode::Tab), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c), KeyAction::Quit);
    }
}
