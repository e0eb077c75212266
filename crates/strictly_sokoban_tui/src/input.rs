//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use strictly_sokoban::{Command, Direction};

/// Keys that move the player.
pub const MOVE_KEYS: [(KeyCode, Direction); 8] = [
    (KeyCode::Up, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::Right, Direction::Right),
    (KeyCode::Char('w'), Direction::Up),
    (KeyCode::Char('s'), Direction::Down),
    (KeyCode::Char('a'), Direction::Left),
    (KeyCode::Char('d'), Direction::Right),
];

/// Keys that restart.
pub const RESTART_KEYS: [KeyCode; 2] = [KeyCode::Enter, KeyCode::Char('r')];

/// Keys that quit.
pub const QUIT_KEYS: [KeyCode; 2] = [KeyCode::Esc, KeyCode::Char('q')];

/// Maps a key event to a command. Releases, repeats and unbound keys map to
/// nothing.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Raw mode swallows SIGINT
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };

    if let Some((_, direction)) = MOVE_KEYS.iter().find(|(k, _)| *k == code) {
        Some(Command::Move(*direction))
    } else if RESTART_KEYS.contains(&code) {
        Some(Command::Restart)
    } else if QUIT_KEYS.contains(&code) {
        Some(Command::Quit)
    } else {
        None
    }
}

/// True for any key press, used to dismiss the summary screen.
pub fn is_press(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}
