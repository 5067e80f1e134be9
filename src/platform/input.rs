//! Keyboard mapping

use crate::sim::{Command, Direction};

/// Map a `KeyboardEvent.key` value to a command. Unmapped keys give `None`.
pub fn command_for_key(key: &str) -> Option<Command> {
    let direction = match key {
        "ArrowLeft" => Direction::Left,
        "ArrowUp" => Direction::Up,
        "ArrowRight" => Direction::Right,
        "ArrowDown" => Direction::Down,
        " " | "Spacebar" => return Some(Command::Restart),
        _ => match key.to_ascii_lowercase().as_str() {
            "a" => Direction::Left,
            "w" => Direction::Up,
            "d" => Direction::Right,
            "s" => Direction::Down,
            _ => return None,
        },
    };
    Some(Command::Move(direction))
}
