//! Key combinations and pointer clicks mapped to session commands.
//!
//! | Keys                    | Command                          |
//! |-------------------------|----------------------------------|
//! | Alt+Arrow               | move focus                       |
//! | Ctrl+Alt+Arrow          | extend selection                 |
//! | Ctrl+Shift+Left/Right   | previous / next speech           |
//! | Ctrl+N                  | next speech                      |
//! | Alt+M                   | merge selection                  |
//! | Delete                  | delete selection                 |
//! | Esc                     | return focus to the grid         |
//!
//! Merge sits on Alt rather than Ctrl: legacy terminals send Ctrl+M as a
//! carriage return, indistinguishable from Enter.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::RegionId;
use crate::ops::navigate::Direction;
use crate::session::Command;

/// Map a key event to a command, or `None` if the key is unbound.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release || matches!(key.code, KeyCode::Modifier(_)) {
        return None;
    }
    let key = normalize_key(key);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    if let Some(direction) = arrow_direction(key.code) {
        if alt {
            return Some(Command::Move {
                direction,
                extend: ctrl,
            });
        }
        if ctrl && shift && !direction.is_vertical() {
            return Some(Command::CycleSpeech(direction.offset()));
        }
        return None;
    }

    match (key.code, ctrl, alt) {
        (KeyCode::Char('n'), true, false) => Some(Command::NextSpeech),
        (KeyCode::Char('m'), false, true) => Some(Command::Merge),
        (KeyCode::Delete, false, false) => Some(Command::DeleteSelection),
        (KeyCode::Esc, _, _) => Some(Command::Escape),
        _ => None,
    }
}

/// A pointer click on `region`; holding Ctrl extends the selection.
pub fn click_command(region: RegionId, modifiers: KeyModifiers) -> Command {
    Command::Click {
        region,
        extend: modifiers.contains(KeyModifiers::CONTROL),
    }
}

fn arrow_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

/// Fold terminal differences in modifier chords.
///
/// Legacy terminals report Ctrl+Shift+n as `Char('N')`, the kitty keyboard
/// protocol as `Char('n') + SHIFT`. Ctrl and Alt letters are matched lowercase.
fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        && c.is_ascii_uppercase()
    {
        key.code = KeyCode::Char(c.to_ascii_lowercase());
    }
    key
}
