use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Pause,
    Quit,
    Ignore,
}

pub fn map_key(ev: &KeyEvent) -> Command {
    if is_ctrl_c(ev) {
        return Command::Quit;
    }

    match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Command::Turn(Up),
        KeyCode::Char('a') | KeyCode::Left => Command::Turn(Left),
        KeyCode::Char('s') | KeyCode::Down => Command::Turn(Down),
        KeyCode::Char('d') | KeyCode::Right => Command::Turn(Right),
        KeyCode::Esc => Command::Pause,
        _ => Command::Ignore,
    }
}

pub fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_steer() {
        assert_eq!(map_key(&key(KeyCode::Up)), Command::Turn(Up));
        assert_eq!(map_key(&key(KeyCode::Char('a'))), Command::Turn(Left));
        assert_eq!(map_key(&key(KeyCode::Down)), Command::Turn(Down));
        assert_eq!(map_key(&key(KeyCode::Char('d'))), Command::Turn(Right));
    }

    #[test]
    fn control_keys() {
        assert_eq!(map_key(&key(KeyCode::Esc)), Command::Pause);
        assert_eq!(map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)), Command::Quit);
        assert_eq!(map_key(&key(KeyCode::Char('c'))), Command::Ignore);
        assert_eq!(map_key(&key(KeyCode::Enter)), Command::Ignore);
    }
}
