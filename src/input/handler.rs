use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::controls::{Button, ControlPad};
use crate::game::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Start,
    Reset,
    Quit,
    None,
}

impl From<Button> for Command {
    fn from(button: Button) -> Self {
        match button {
            Button::Steer(direction) => Command::Steer(direction),
            Button::Start => Command::Start,
            Button::Reset => Command::Reset,
        }
    }
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> Command {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Command::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Command::Steer(Direction::Up),
            KeyCode::Down => Command::Steer(Direction::Down),
            KeyCode::Left => Command::Steer(Direction::Left),
            KeyCode::Right => Command::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Command::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => Command::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => Command::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => Command::Steer(Direction::Right),

            // Controls
            KeyCode::Char(' ') | KeyCode::Enter => Command::Start,
            KeyCode::Char('r') | KeyCode::Char('R') => Command::Reset,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Command::Quit,

            _ => Command::None,
        }
    }

    /// Left clicks on a control-pad button map to that button's command
    pub fn handle_mouse_event(&self, mouse: MouseEvent, pad: &ControlPad) -> Command {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Command::None;
        }

        pad.hit(mouse.column, mouse.row)
            .map(Command::from)
            .unwrap_or(Command::None)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
